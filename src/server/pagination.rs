pub const QUESTIONS_PER_PAGE: usize = 10;

/// Parses the `page` query parameter; anything that is not a positive
/// integer means the first page.
pub fn page_number(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|page| *page > 0)
        .unwrap_or(1)
}

/// Returns the `page`-th (1-based) window of `items`, empty when the page
/// starts past the end.
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let start = page
        .saturating_sub(1)
        .saturating_mul(QUESTIONS_PER_PAGE)
        .min(items.len());
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
