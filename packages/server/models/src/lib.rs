#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the campus safety server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the ledger's domain types so the API contract can evolve
//! independently. Field names are `snake_case` on the wire, which is what
//! the existing frontend sends and expects.

use campus_safety_models::{HeatmapEntry, LedgerRecord, LedgerStats, PatrolUnit, SafetyScore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Reads an identifier-like field that clients send as a string, number or
/// boolean, keeping numbers and booleans as their JSON text.
///
/// `null` reads as `None`. Arrays and objects are rejected.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(value.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string, number or boolean, got {other}"
        ))),
    }
}

/// Value of the `status` field on successful responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    /// The request was applied.
    Success,
    /// Health check passed.
    Healthy,
    /// A voice command raised an emergency.
    EmergencyTriggered,
    /// A voice command was handled without raising an emergency.
    CommandProcessed,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Always [`ApiStatus::Healthy`].
    pub status: ApiStatus,
    /// Service name.
    pub service: String,
    /// Server time (ISO 8601).
    pub timestamp: DateTime<Utc>,
}

/// Error body returned with every 4xx/5xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// Response from `POST /api/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    /// Always [`ApiStatus::Success`].
    pub status: ApiStatus,
    /// Assigned incident ID.
    pub incident_id: String,
}

/// Body of `POST /api/trigger-emergency`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerEmergencyRequest {
    /// Reporting user (defaults to the demo user).
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub user_id: Option<String>,
    /// Location ID string or `{lat, lng}` object.
    pub location: Option<Value>,
    /// Emergency type (defaults to `emergency_sos`).
    #[serde(rename = "type", default, deserialize_with = "scalar_as_string")]
    pub kind: Option<String>,
    /// What raised the alert (defaults to `manual`).
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub source: Option<String>,
    /// Device battery percentage at trigger time, stored as sent.
    pub battery_level: Option<Value>,
}

/// Response from `POST /api/trigger-emergency`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerEmergencyResponse {
    /// Always [`ApiStatus::Success`].
    pub status: ApiStatus,
    /// Assigned emergency ID.
    pub emergency_id: String,
    /// Number of nearby devices alerted (2-8).
    pub nearby_devices: u8,
    /// Advertised response time.
    pub response_time_estimate: String,
}

/// Body of `POST /api/cancel-emergency`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelEmergencyRequest {
    /// User whose latest emergency is cancelled when no ID is given.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub user_id: Option<String>,
    /// Emergency to cancel; absent or `"current"` means the user's latest.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub emergency_id: Option<String>,
}

/// Response from `POST /api/cancel-emergency`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelEmergencyResponse {
    /// Always [`ApiStatus::Success`].
    pub status: ApiStatus,
    /// Confirmation text.
    pub message: String,
    /// The emergency that was cancelled.
    pub emergency_id: String,
}

/// Body of `POST /api/voice-command`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceCommandRequest {
    /// Transcribed speech.
    pub command: Option<String>,
}

/// Response from `POST /api/voice-command`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoiceCommandResponse {
    /// The command contained an emergency keyword.
    Emergency {
        /// [`ApiStatus::EmergencyTriggered`].
        status: ApiStatus,
        /// Frontend action to navigate to.
        action: String,
        /// The emergency that was raised.
        emergency_id: String,
        /// Feedback text.
        message: String,
    },
    /// Any other command.
    Processed {
        /// [`ApiStatus::CommandProcessed`].
        status: ApiStatus,
        /// The command as received.
        command: String,
        /// Feedback text.
        message: String,
    },
}

/// Body of `POST /api/update-battery`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatteryUpdateRequest {
    /// User to update (defaults to the demo user).
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub user_id: Option<String>,
    /// New battery percentage. Fractions are accepted.
    pub battery_level: Option<f64>,
}

/// Response from `POST /api/update-battery`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryUpdateResponse {
    /// Always [`ApiStatus::Success`].
    pub status: ApiStatus,
    /// Battery level as stored.
    pub battery_level: u8,
}

/// Response from `GET /api/safety-map`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyMapResponse {
    /// Risk level per location.
    pub heatmap: Vec<HeatmapEntry>,
    /// The underlying location table.
    pub locations: Vec<SafetyScore>,
}

/// Response from `GET /api/admin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSummary {
    /// Emergencies still active.
    pub emergencies: Vec<LedgerRecord>,
    /// Most recent incidents, oldest first.
    pub incidents: Vec<LedgerRecord>,
    /// Patrol units on shift.
    pub patrols: Vec<PatrolUnit>,
    /// Aggregate numbers.
    pub stats: LedgerStats,
}

/// Query parameters for `GET /api/profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileQueryParams {
    /// User to look up (defaults to the demo user).
    pub user_id: Option<String>,
}

/// Query parameters for `GET /api/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductQueryParams {
    /// Only return products in this category.
    pub category: Option<String>,
}

/// Body of `POST /api/safewalk`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SafeWalkRequest {
    /// Walking user (defaults to the demo user).
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub user_id: Option<String>,
    /// Start point.
    pub from: Option<Value>,
    /// Destination.
    pub to: Option<Value>,
}

/// Response from `POST /api/safewalk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeWalkResponse {
    /// Always [`ApiStatus::Success`].
    pub status: ApiStatus,
    /// Session ID for the walk.
    pub walk_id: String,
    /// Confirmation text.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trigger(body: Value) -> Result<TriggerEmergencyRequest, serde_json::Error> {
        serde_json::from_value(body)
    }

    #[test]
    fn numeric_user_id_reads_as_text() {
        let request = trigger(json!({"user_id": 123, "source": true})).unwrap();
        assert_eq!(request.user_id.as_deref(), Some("123"));
        assert_eq!(request.source.as_deref(), Some("true"));
        assert!(request.kind.is_none());
    }

    #[test]
    fn null_and_absent_ids_read_as_none() {
        let request = trigger(json!({"user_id": null})).unwrap();
        assert!(request.user_id.is_none());
        assert!(trigger(json!({})).unwrap().user_id.is_none());
    }

    #[test]
    fn structured_user_id_is_rejected() {
        assert!(trigger(json!({"user_id": ["user123"]})).is_err());
        assert!(trigger(json!({"type": {"kind": "medical"}})).is_err());
    }

    #[test]
    fn battery_level_is_kept_as_sent() {
        let request = trigger(json!({"battery_level": 42.5})).unwrap();
        assert_eq!(request.battery_level, Some(json!(42.5)));

        let body = json!({"user_id": 7, "battery_level": 30});
        let update: BatteryUpdateRequest = serde_json::from_value(body).unwrap();
        assert_eq!(update.user_id.as_deref(), Some("7"));
        assert_eq!(update.battery_level, Some(30.0));
    }
}
