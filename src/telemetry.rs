use prometheus::register_counter_vec;
use prometheus::CounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: CounterVec = register_counter_vec!(
        "trivia_quiz_questions_served_total",
        "Number of questions handed out by the quiz endpoint",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTIONS_CHANGED: CounterVec = register_counter_vec!(
        "trivia_questions_changed_total",
        "Number of questions created or deleted through the API",
        &["operation"]
    )
    .unwrap();
}

const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

/// Installs the global subscriber. `LOG_LEVEL` takes `EnvFilter` directives and
/// falls back to [`DEFAULT_DIRECTIVES`] when unset or unparsable;
/// `INCLUDE_SPAN_EVENTS=true` also logs span enter and exit.
pub fn init_tracing() -> anyhow::Result<()> {
    let span_events = match std::env::var("INCLUDE_SPAN_EVENTS") {
        Ok(value) if value.eq_ignore_ascii_case("true") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::NONE,
    };
    let filter = log_filter(std::env::var("LOG_LEVEL").ok().as_deref());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_span_events(span_events))
        .try_init()?;
    Ok(())
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

#[cfg(test)]
mod tests {
    use super::log_filter;

    #[test]
    fn unset_level_uses_defaults() {
        assert_eq!(log_filter(None).to_string(), log_filter(Some("info,sqlx=warn")).to_string());
    }

    #[test]
    fn explicit_level_is_kept() {
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn garbage_level_uses_defaults() {
        assert_eq!(
            log_filter(Some("sqlx=loudest")).to_string(),
            log_filter(None).to_string()
        );
    }
}
