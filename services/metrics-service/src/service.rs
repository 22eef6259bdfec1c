use crate::db;
use crate::errors::IngestError;
use crate::models::TelemetryEvent;
use crate::state::AppState;

/// Validate one submission and write its summary row.
pub async fn submit(state: &AppState, body: &str) -> Result<u64, IngestError> {
    let event = parse_event(body)?;
    let count = db::insert_summary(&state.db, &event).await?;
    tracing::info!(
        page = event.page.as_str(),
        host = event.host.as_str(),
        rows = count,
        "metrics summary stored"
    );
    Ok(count)
}

/// All "key missing"/"wrong type" faults collapse into one boundary error.
pub fn parse_event(body: &str) -> Result<TelemetryEvent, IngestError> {
    if body.trim().is_empty() {
        return Err(IngestError::MalformedInput("request body required".to_string()));
    }
    serde_json::from_str(body).map_err(|err| IngestError::MalformedInput(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_submission() {
        let raw = r#"{
            "page": "home",
            "host": "example.com",
            "uxMetrics": {"summaries": {
                "click": {"fireCount": 3},
                "mouseleave": {"fireCount": 1},
                "mousemove": {"fireCount": 50, "stateChangeCount": 5},
                "resize": {"fireCount": 2, "stateChangeCount": 1},
                "scroll": {"fireCount": 10, "stateChangeCount": 4}
            }}
        }"#;
        let event = parse_event(raw).unwrap();
        assert_eq!(event.ux_metrics.summaries.click.fire_count, 3);
        assert_eq!(event.ux_metrics.summaries.scroll.state_change_count, 4);
    }

    #[test]
    fn missing_click_fire_count_is_malformed() {
        let raw = r#"{
            "page": "home",
            "host": "example.com",
            "uxMetrics": {"summaries": {
                "click": {},
                "mouseleave": {"fireCount": 1},
                "mousemove": {"fireCount": 50, "stateChangeCount": 5},
                "resize": {"fireCount": 2, "stateChangeCount": 1},
                "scroll": {"fireCount": 10, "stateChangeCount": 4}
            }}
        }"#;
        let result = parse_event(raw);
        assert!(matches!(result, Err(IngestError::MalformedInput(_))));
    }

    #[test]
    fn mistyped_counter_is_malformed() {
        let raw = r#"{"page": "home", "host": "example.com", "uxMetrics": {"summaries": {
            "click": {"fireCount": "three"},
            "mouseleave": {"fireCount": 1},
            "mousemove": {"fireCount": 50, "stateChangeCount": 5},
            "resize": {"fireCount": 2, "stateChangeCount": 1},
            "scroll": {"fireCount": 10, "stateChangeCount": 4}
        }}}"#;
        assert!(matches!(parse_event(raw), Err(IngestError::MalformedInput(_))));
    }

    #[test]
    fn empty_body_is_malformed() {
        assert!(matches!(parse_event(""), Err(IngestError::MalformedInput(_))));
        assert!(matches!(parse_event("   "), Err(IngestError::MalformedInput(_))));
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(matches!(parse_event("not json"), Err(IngestError::MalformedInput(_))));
    }
}
