//! HTTP client for the upstream GraphQL tracking endpoint.

use std::time::Duration;

use serde_json::json;

use crate::auth::TokenCache;
use crate::carriers;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::tracking::{CarrierRef, GraphqlResponse, TrackingResult};

/// One query fetches the latest event plus the 10 most recent timeline
/// entries; the connection shape is flattened before the result is returned.
const TRACK_QUERY: &str = r#"
query Track($carrierId: ID!, $trackingNumber: String!) {
  track(carrierId: $carrierId, trackingNumber: $trackingNumber) {
    lastEvent {
      time
      status {
        code
        name
      }
      description
      location {
        name
      }
    }
    events(last: 10) {
      edges {
        node {
          time
          status {
            code
            name
          }
          description
          location {
            name
          }
        }
      }
    }
    trackingNumber
  }
}
"#;

#[derive(Clone)]
pub struct TrackingClient {
    client: reqwest::Client,
    api_url: String,
    tokens: TokenCache,
}

impl TrackingClient {
    pub fn new(config: &Config, tokens: TokenCache) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_url: config.api_url.clone(),
            tokens,
        }
    }

    /// Look up one tracking record. Results are not cached; every call is a
    /// single one-shot upstream query.
    pub async fn track(
        &self,
        carrier_id: &str,
        tracking_number: &str,
    ) -> Result<TrackingResult, AppError> {
        if carrier_id.trim().is_empty() {
            return Err(AppError::Validation("carrierId"));
        }
        if tracking_number.trim().is_empty() {
            return Err(AppError::Validation("trackingNumber"));
        }

        let token = self.tokens.get_token().await?;

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&json!({
                "query": TRACK_QUERY,
                "variables": {
                    "carrierId": carrier_id,
                    "trackingNumber": tracking_number,
                },
            }))
            .send()
            .await
            .map_err(|e| AppError::UpstreamHttp(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::UpstreamHttp(format!(
                "tracking endpoint returned {}",
                status
            )));
        }

        let body: GraphqlResponse = resp
            .json()
            .await
            .map_err(|e| AppError::UpstreamHttp(e.to_string()))?;

        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
                return Err(AppError::UpstreamProtocol(messages.join("; ")));
            }
        }

        let track = body
            .data
            .and_then(|d| d.track)
            .ok_or(AppError::NotFound)?;

        let carrier = match carriers::find_by_id(carrier_id) {
            Some(c) => CarrierRef {
                id: c.id.to_string(),
                name: c.name.to_string(),
            },
            // Unknown ids are forwarded verbatim; the upstream decides
            // whether it can track them.
            None => CarrierRef {
                id: carrier_id.to_string(),
                name: carrier_id.to_string(),
            },
        };

        tracing::info!(
            "tracking lookup succeeded: {} - {}",
            carrier_id,
            tracking_number
        );
        Ok(track.into_result(carrier))
    }
}
