//! Wire types for the upstream GraphQL tracking API and the normalized
//! result shape returned by this gateway.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One entry in a shipment's status timeline.
///
/// Event times are kept in the offset the upstream reports them in, so the
/// client sees the carrier's local time rather than a UTC conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEvent {
    pub time: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Normalized per-request result: the paginated upstream event connection
/// is flattened into a plain ordered list. Constructed fresh per lookup,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResult {
    pub tracking_number: String,
    pub carrier: CarrierRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<TrackingEvent>,
    pub events: Vec<TrackingEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CarrierRef {
    pub id: String,
    pub name: String,
}

// ── Upstream GraphQL envelope ────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<TrackData>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TrackData {
    pub track: Option<UpstreamTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamTrack {
    pub tracking_number: String,
    #[serde(default)]
    pub last_event: Option<TrackingEvent>,
    #[serde(default)]
    pub events: Option<EventConnection>,
}

#[derive(Debug, Deserialize)]
pub struct EventConnection {
    #[serde(default)]
    pub edges: Vec<EventEdge>,
}

#[derive(Debug, Deserialize)]
pub struct EventEdge {
    pub node: TrackingEvent,
}

impl UpstreamTrack {
    /// Flatten the connection-shaped event list, preserving upstream order
    /// (most recent last).
    pub fn into_result(self, carrier: CarrierRef) -> TrackingResult {
        let events = self
            .events
            .map(|conn| conn.edges.into_iter().map(|e| e.node).collect())
            .unwrap_or_default();

        TrackingResult {
            tracking_number: self.tracking_number,
            carrier,
            last_event: self.last_event,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattening_preserves_event_count_and_order() {
        let payload = serde_json::json!({
            "trackingNumber": "123456789012",
            "lastEvent": {
                "time": "2024-03-02T09:00:00+09:00",
                "status": { "code": "DELIVERED", "name": "배송 완료" },
                "description": "배송이 완료되었습니다"
            },
            "events": {
                "edges": [
                    { "node": { "time": "2024-03-01T08:00:00+09:00", "description": "접수" } },
                    { "node": { "time": "2024-03-01T18:30:00+09:00", "description": "이동 중" } },
                    { "node": { "time": "2024-03-02T09:00:00+09:00", "description": "배송 완료" } }
                ]
            }
        });

        let track: UpstreamTrack = serde_json::from_value(payload).unwrap();
        let result = track.into_result(CarrierRef {
            id: "kr.cjlogistics".into(),
            name: "CJ대한통운".into(),
        });

        assert_eq!(result.events.len(), 3);
        assert_eq!(result.events[0].description.as_deref(), Some("접수"));
        assert_eq!(result.events[2].description.as_deref(), Some("배송 완료"));
        assert!(result.last_event.is_some());
    }

    #[test]
    fn missing_event_connection_flattens_to_empty_list() {
        let track: UpstreamTrack = serde_json::from_value(serde_json::json!({
            "trackingNumber": "999"
        }))
        .unwrap();

        let result = track.into_result(CarrierRef {
            id: "kr.hanjin".into(),
            name: "한진택배".into(),
        });
        assert!(result.events.is_empty());
        assert!(result.last_event.is_none());
    }

    #[test]
    fn event_time_round_trips_with_original_offset() {
        let event: TrackingEvent = serde_json::from_value(serde_json::json!({
            "time": "2024-03-01T08:00:00+09:00"
        }))
        .unwrap();

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["time"], "2024-03-01T08:00:00+09:00");
    }
}
