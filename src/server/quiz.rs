use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::db::Question;

/// Picks a question that has not been served yet, uniformly among the
/// remaining ones. `None` means every candidate was already served.
pub fn pick_question<'a, R>(
    candidates: &'a [Question],
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Option<&'a Question>
where
    R: Rng + ?Sized,
{
    let remaining: Vec<&Question> = candidates
        .iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    remaining.choose(rng).copied()
}
