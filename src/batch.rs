//! CSV batch lookups: parse rows, resolve carriers, then track each row
//! sequentially through the proxy client.

use serde::Serialize;

use crate::carriers;
use crate::errors::AppError;
use crate::models::tracking::TrackingResult;
use crate::proxy::client::TrackingClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Pending,
    Success,
    Error,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Pending => "pending",
            BatchStatus::Success => "success",
            BatchStatus::Error => "error",
        }
    }
}

/// One resolved CSV row, tracked through its own lifecycle
/// (pending → success/error). Discarded when the batch response is sent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub id: String,
    pub carrier_id: String,
    pub carrier_name: String,
    pub tracking_number: String,
    pub status: BatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TrackingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parse CSV text into pending batch items.
///
/// The first line is a header and is discarded. Rows are split on `,` with
/// both fields trimmed; rows with a missing field are skipped, and rows
/// naming an unrecognized carrier are skipped with a warning. Item ids keep
/// the row's position among the data lines, so skipped rows leave gaps.
pub fn parse_csv(csv_text: &str) -> Vec<BatchItem> {
    let mut items = Vec::new();

    for (index, line) in csv_text.trim().lines().skip(1).enumerate() {
        let mut fields = line.split(',');
        let carrier_input = fields.next().unwrap_or("").trim();
        let tracking_number = fields.next().unwrap_or("").trim();

        if carrier_input.is_empty() || tracking_number.is_empty() {
            continue;
        }

        match carriers::resolve(carrier_input) {
            Some(carrier) => items.push(BatchItem {
                id: format!("item-{}", index),
                carrier_id: carrier.id.to_string(),
                carrier_name: carrier.display_name.to_string(),
                tracking_number: tracking_number.to_string(),
                status: BatchStatus::Pending,
                result: None,
                error: None,
            }),
            None => {
                let err = AppError::CarrierResolution(carrier_input.to_string());
                tracing::warn!("skipping row: {}", err);
            }
        }
    }

    items
}

/// Run every parsed row through the tracking client, one at a time in input
/// order. A failed row settles as `error` and the batch continues; the full
/// list is returned once every item has settled.
pub async fn run(tracker: &TrackingClient, csv_text: &str) -> Vec<BatchItem> {
    let mut items = parse_csv(csv_text);

    for item in items.iter_mut() {
        match tracker.track(&item.carrier_id, &item.tracking_number).await {
            Ok(result) => {
                item.status = BatchStatus::Success;
                item.result = Some(result);
            }
            Err(e) => {
                tracing::warn!(
                    "batch lookup failed for {} ({}): {}",
                    item.tracking_number,
                    item.carrier_id,
                    e
                );
                item.status = BatchStatus::Error;
                item.error = Some(e.to_string());
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_rows_with_missing_fields() {
        let csv = "carrier,tracking\ncj,111111111111\n,222222222222\nhanjin,";
        let items = parse_csv(csv);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].carrier_id, "kr.cjlogistics");
        assert_eq!(items[0].tracking_number, "111111111111");
        assert_eq!(items[0].status, BatchStatus::Pending);
    }

    #[test]
    fn resolves_korean_carrier_names() {
        let csv = "carrier,tracking\n한진,123456789012";
        let items = parse_csv(csv);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].carrier_id, "kr.hanjin");
        assert_eq!(items[0].carrier_name, "한진택배");
    }

    #[test]
    fn skips_unrecognized_carriers_without_aborting() {
        let csv = "carrier,tracking\ndoesNotExist,1\n롯데,987654321098";
        let items = parse_csv(csv);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].carrier_id, "kr.lotte");
    }

    #[test]
    fn header_line_is_discarded_even_when_it_looks_like_data() {
        let csv = "한진,구분\ncj,111111111111";
        let items = parse_csv(csv);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].carrier_id, "kr.cjlogistics");
    }

    #[test]
    fn item_ids_keep_data_line_positions() {
        let csv = "carrier,tracking\ncj,111\n,missing\nhanjin,333";
        let items = parse_csv(csv);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "item-0");
        assert_eq!(items[1].id, "item-2");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let csv = "carrier,tracking\r\ncj,111111111111\r\nhanjin,222222222222\r\n";
        let items = parse_csv(csv);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].tracking_number, "111111111111");
        assert_eq!(items[1].carrier_id, "kr.hanjin");
    }

    #[test]
    fn empty_input_yields_no_items() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("carrier,tracking").is_empty());
    }
}
