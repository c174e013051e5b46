use prometheus::{register_counter_vec, register_int_counter};
use prometheus::{CounterVec, IntCounter};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: CounterVec = register_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions served to quiz players",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTIONS_CREATED: IntCounter =
        register_int_counter!("questions_created_total", "Number of created questions").unwrap();
    pub static ref QUESTIONS_DELETED: IntCounter =
        register_int_counter!("questions_deleted_total", "Number of deleted questions").unwrap();
}

/// Directives used when `LOG_LEVEL` is unset or unparseable: request spans
/// from tower-http and this crate at debug, sqlx statement logs muted.
const DEFAULT_DIRECTIVES: &str = "info,trivia_api=debug,tower_http=debug,sqlx=warn";

// close events carry the span's busy/idle time, which is what request timing needs
fn span_events(flag: Option<&str>) -> FmtSpan {
    match flag {
        Some(value) if value.trim().eq_ignore_ascii_case("true") => FmtSpan::NEW | FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    }
}

/// Installs the global subscriber. A second call (tests, embedding) keeps
/// the first subscriber and only reports it.
pub fn init_tracing() {
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let span_flag = std::env::var("INCLUDE_SPAN_EVENTS").ok();
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_span_events(span_events(span_flag.as_deref()));

    if let Err(e) = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
    {
        tracing::warn!("Tracing subscriber already installed: {}", e);
    }
}
