use serde::{Deserialize, Serialize};

/// One client-submitted payload of aggregated UI interaction counts.
///
/// Every field here is required; a missing or mistyped key fails the whole
/// request at parse time. Extra keys the client happens to send are ignored.
#[derive(Debug, Deserialize)]
pub struct TelemetryEvent {
    pub page: String,
    pub host: String,
    #[serde(rename = "uxMetrics")]
    pub ux_metrics: UxMetrics,
}

#[derive(Debug, Deserialize)]
pub struct UxMetrics {
    pub summaries: InteractionSummaries,
}

/// The fixed set of interaction kinds the client tracks.
#[derive(Debug, Deserialize)]
pub struct InteractionSummaries {
    pub click: FireSummary,
    pub mouseleave: FireSummary,
    pub mousemove: StatefulSummary,
    pub resize: StatefulSummary,
    pub scroll: StatefulSummary,
}

/// Events that only count how often they fired.
#[derive(Debug, Deserialize)]
pub struct FireSummary {
    #[serde(rename = "fireCount")]
    pub fire_count: i32,
}

/// Continuous-fire events that also count ends of activity bursts ("halts").
#[derive(Debug, Deserialize)]
pub struct StatefulSummary {
    #[serde(rename = "fireCount")]
    pub fire_count: i32,
    #[serde(rename = "stateChangeCount")]
    pub state_change_count: i32,
}

/// The response body for every non-preflight request.
#[derive(Debug, Serialize)]
pub struct SubmitEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

impl SubmitEnvelope {
    pub fn accepted(count: u64) -> Self {
        Self {
            success: true,
            count: Some(count),
            exception: None,
        }
    }

    pub fn rejected(exception: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            exception: Some(exception.into()),
        }
    }
}
