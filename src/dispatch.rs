//! Report dispatch
//!
//! Hands a finished calculation plus the visitor's contact details to the
//! external mailing/CRM endpoint, and builds the pre-filled form URL the
//! visitor is sent to afterwards.
//!
//! # Wire format
//!
//! One HTTP POST with a flat JSON object whose keys are the human-readable
//! field names the mailing backend expects (`"First Name"`, `"Savings Amount
//! ($)"`, ...). Any 2xx response carrying a JSON body is an acknowledgement.
//! Anything else is a [`DispatchError`]; a rejected request is expected to
//! carry `{"error": "..."}`.
//!
//! A single attempt is made, bounded by the client timeout. Retry, queueing
//! and persistence belong to the endpoint.

use crate::config::AppConfig;
use crate::engine::SavingsResult;
use crate::types::BuildingType;
use crate::wizard::ContactRecord;
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

/// Sentinel sent as the competitor for baseline comparisons
pub const NOT_APPLICABLE: &str = "N/A";

/// Message used when a rejection carries no readable error body
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to send email";

/// On-screen notice for any failed dispatch. Server detail goes to the log.
pub const RETRY_NOTICE: &str = "There was an error sending your report. Please try again.";

/// Flat record posted to the report endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Building Type")]
    pub building_type: String,
    #[serde(rename = "Project Type")]
    pub project_type: String,
    #[serde(rename = "Savings Amount ($)")]
    pub savings_amount: u64,
    #[serde(rename = "Current System Cost ($)")]
    pub current_system_cost: u64,
    #[serde(rename = "MAXTERRA System Cost ($)")]
    pub own_system_cost: u64,
    #[serde(rename = "Project Size (sq ft)", serialize_with = "serialize_area")]
    pub project_size: f64,
    #[serde(rename = "Competitor")]
    pub competitor: String,
}

impl ReportRecord {
    /// Flatten a result and the contact details into the wire record.
    pub fn new(
        contact: &ContactRecord,
        building_type: Option<BuildingType>,
        result: &SavingsResult,
    ) -> Self {
        let figures = result.figures();
        Self {
            first_name: contact.first_name.trim().to_string(),
            last_name: contact.last_name.trim().to_string(),
            email: contact.email.trim().to_string(),
            building_type: building_type
                .map(|b| b.label().to_string())
                .unwrap_or_default(),
            project_type: result.category().label().to_string(),
            savings_amount: figures.total_savings,
            current_system_cost: figures.baseline_total_cost,
            own_system_cost: figures.own_total_cost,
            project_size: figures.area_size,
            competitor: result
                .competitor_name()
                .unwrap_or(NOT_APPLICABLE)
                .to_string(),
        }
    }
}

/// Whole areas go out as integers (`10000`, not `10000.0`).
fn serialize_area<S: Serializer>(area: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if area.fract() == 0.0 && *area >= 0.0 && *area <= u64::MAX as f64 {
        serializer.serialize_u64(*area as u64)
    } else {
        serializer.serialize_f64(*area)
    }
}

/// JSON body returned by the endpoint on success.
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgement(pub serde_json::Value);

/// Dispatch failures. Cloneable so they can cross the worker channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The endpoint answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    /// Network unreachable, timeout, TLS failure, ...
    #[error("could not reach the report service: {0}")]
    Transport(String),

    /// A success status whose body is not JSON
    #[error("unreadable response from the report service: {0}")]
    InvalidResponse(String),
}

impl DispatchError {
    /// Message for the on-screen notice. The same for every failure; the
    /// `Display` form carries the detail for logs.
    pub fn user_message(&self) -> String {
        RETRY_NOTICE.to_string()
    }
}

/// Anything that can deliver a report. The HTTP endpoint in production,
/// an in-memory double in tests.
pub trait ReportDispatcher: Send + Sync {
    /// Deliver one record. Blocks until the endpoint answers or the
    /// transport gives up.
    fn send_report(&self, record: &ReportRecord) -> Result<Acknowledgement, DispatchError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Posts reports as JSON to a configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpDispatcher {
    /// Create a dispatcher with a bounded request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DispatchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DispatchError> {
        Self::new(config.dispatch_endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ReportDispatcher for HttpDispatcher {
    fn send_report(&self, record: &ReportRecord) -> Result<Acknowledgement, DispatchError> {
        info!(endpoint = %self.endpoint, email = %record.email, "sending report");

        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .map_err(|e| {
                warn!("report request failed: {}", e);
                DispatchError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            warn!(status = status.as_u16(), %message, "report rejected");
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| DispatchError::InvalidResponse(e.to_string()))?;
        info!(status = status.as_u16(), "report acknowledged");
        Ok(Acknowledgement(value))
    }
}

/// Build the pre-filled form URL: `base?firstname=..&lastname=..&email=..`.
///
/// Values are form-urlencoded; any query already on `base` is kept.
pub fn redirect_url(base: &Url, contact: &ContactRecord) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("firstname", contact.first_name.trim())
        .append_pair("lastname", contact.last_name.trim())
        .append_pair("email", contact.email.trim());
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::engine::{ProjectSelection, compute_savings};
    use crate::types::ProjectCategory;

    fn contact() -> ContactRecord {
        ContactRecord {
            first_name: "Ada".into(),
            last_name: "O'Neil".into(),
            email: "ada+calc@example.com".into(),
        }
    }

    #[test]
    fn test_record_uses_backend_field_names() {
        let catalog = Catalog::standard();
        let result = compute_savings(
            &ProjectSelection::new(ProjectCategory::WetUnderlayment, 10_000.0),
            &catalog,
        )
        .unwrap();
        let record = ReportRecord::new(&contact(), Some(BuildingType::Commercial), &result);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["First Name"], "Ada");
        assert_eq!(json["Building Type"], "Commercial Office");
        assert_eq!(json["Project Type"], "Wet Gypsum Underlayment");
        assert_eq!(json["Savings Amount ($)"], 16650);
        assert_eq!(json["Current System Cost ($)"], 35750);
        assert_eq!(json["MAXTERRA System Cost ($)"], 19100);
        assert_eq!(json["Project Size (sq ft)"], 10000);
        assert!(json["Project Size (sq ft)"].is_u64());
        assert_eq!(json["Competitor"], NOT_APPLICABLE);
        assert_eq!(json.as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_record_names_competitor() {
        let catalog = Catalog::standard();
        let selection = ProjectSelection::new(ProjectCategory::FullSubfloor, 10_000.0)
            .with_comparator("nocom")
            .with_building_type(BuildingType::Retail);
        let result = compute_savings(&selection, &catalog).unwrap();
        let record = ReportRecord::new(&contact(), selection.building_type, &result);
        assert_eq!(record.competitor, "NOCOM");
        assert_eq!(record.project_type, "Entire Subfloor System");
    }

    #[test]
    fn test_redirect_url_encodes_contact() {
        let base = Url::parse("https://share.hsforms.com/abc").unwrap();
        let url = redirect_url(&base, &contact());
        assert_eq!(
            url.as_str(),
            "https://share.hsforms.com/abc?firstname=Ada&lastname=O%27Neil&email=ada%2Bcalc%40example.com"
        );
    }

    #[test]
    fn test_fractional_area_keeps_its_fraction() {
        let catalog = Catalog::standard();
        let result = compute_savings(
            &ProjectSelection::new(ProjectCategory::WetUnderlayment, 1_250.5),
            &catalog,
        )
        .unwrap();
        let record = ReportRecord::new(&contact(), None, &result);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Project Size (sq ft)"], 1250.5);
    }

    #[test]
    fn test_user_message_hides_server_error() {
        let err = DispatchError::Rejected {
            status: 400,
            message: "Invalid email".into(),
        };
        assert_eq!(err.user_message(), RETRY_NOTICE);
        assert!(err.to_string().contains("Invalid email"));
        assert_eq!(DispatchError::Transport("timeout".into()).user_message(), RETRY_NOTICE);
    }
}
