#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Campus safety domain types.
//!
//! Defines the records held by the safety ledger (incidents and
//! emergencies), the fixed campus location table with its safety scores,
//! patrol units, user profiles and the shop catalog. The risk-level
//! transform that turns a safety score into a heatmap value also lives
//! here so that every consumer derives it the same way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumString};

/// Keys assigned by the ledger. Caller-supplied values for these keys are
/// replaced on insertion.
pub const RESERVED_FIELDS: &[&str] = &["id", "timestamp", "status"];

/// Lifecycle status of a ledger record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordStatus {
    /// Initial status of every incident.
    Reported,
    /// Initial status of every emergency.
    Active,
    /// An emergency the user called off.
    Cancelled,
}

/// The two kinds of record the ledger stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    /// A filed incident report.
    Incident,
    /// A triggered emergency alert.
    Emergency,
}

impl RecordKind {
    /// Returns the ID prefix for this kind (`INC` or `EMG`).
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Incident => "INC",
            Self::Emergency => "EMG",
        }
    }

    /// Returns the status a freshly created record of this kind carries.
    #[must_use]
    pub const fn initial_status(self) -> RecordStatus {
        match self {
            Self::Incident => RecordStatus::Reported,
            Self::Emergency => RecordStatus::Active,
        }
    }
}

/// Formats a record ID as the kind prefix followed by the 1-based
/// sequence number, zero-padded to four digits.
#[must_use]
pub fn format_record_id(kind: RecordKind, sequence: usize) -> String {
    format!("{}{sequence:04}", kind.prefix())
}

/// An incident or emergency held by the ledger.
///
/// The caller-supplied payload is kept as an open map and flattened next
/// to the three ledger-assigned fields when serialized, so a stored record
/// looks like the submitted JSON object with `id`, `timestamp` and
/// `status` added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Assigned ID (`INC0001`, `EMG0003`, ...).
    pub id: String,
    /// When the ledger accepted the record (ISO 8601).
    pub timestamp: DateTime<Utc>,
    /// Current status.
    pub status: RecordStatus,
    /// Everything else the caller supplied.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LedgerRecord {
    /// Creates a record of the given kind with the given 1-based sequence
    /// number, stamped with the current time.
    ///
    /// Reserved keys in `fields` are dropped so the assigned values are the
    /// only ones that survive serialization.
    #[must_use]
    pub fn new(kind: RecordKind, sequence: usize, mut fields: Map<String, Value>) -> Self {
        for key in RESERVED_FIELDS {
            fields.remove(*key);
        }

        Self {
            id: format_record_id(kind, sequence),
            timestamp: Utc::now(),
            status: kind.initial_status(),
            fields,
        }
    }

    /// Looks up a caller-supplied field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Looks up a caller-supplied field as a string.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// Whether this record is an emergency that has not been called off.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}

/// Fixed campus locations that carry a safety score.
///
/// The set is closed: it is defined at startup and cannot be extended by
/// callers. [`LocationId::all`] yields the variants in declaration order,
/// which is also the heatmap order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LocationId {
    /// Library main entrance
    LibraryMain,
    /// Girls hostel, A block
    HostelA,
    /// North parking lot
    ParkingNorth,
    /// Main cafeteria
    Cafeteria,
    /// Sports complex
    SportsComplex,
    /// Academic block B
    AcademicBlockB,
}

impl LocationId {
    /// Returns all variants in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::LibraryMain,
            Self::HostelA,
            Self::ParkingNorth,
            Self::Cafeteria,
            Self::SportsComplex,
            Self::AcademicBlockB,
        ]
    }
}

/// Safety score for one fixed location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyScore {
    /// Location key.
    pub location: LocationId,
    /// Display name.
    pub name: String,
    /// Score, nominally 1.0 (unsafe) to 5.0 (safe).
    pub score: f64,
    /// Number of reports that fed the score.
    pub reports: u32,
}

/// Lowest risk level a location can have.
pub const MIN_RISK_LEVEL: u8 = 1;

/// Highest risk level a location can have.
pub const MAX_RISK_LEVEL: u8 = 10;

/// Converts a safety score into a risk level.
///
/// `(5 - score) * 2` is truncated toward zero (not rounded) and clamped
/// into `1..=10`, so `4.5 -> 1`, `2.8 -> 4` and `0.0 -> 10`. A `NaN` score
/// maps to the lowest level.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn risk_level(score: f64) -> u8 {
    let raw = ((5.0 - score) * 2.0) as i64;
    raw.clamp(i64::from(MIN_RISK_LEVEL), i64::from(MAX_RISK_LEVEL)) as u8
}

/// One cell of the campus risk heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapEntry {
    /// Location key.
    pub location: LocationId,
    /// Display name.
    pub name: String,
    /// Risk level, 1 (lowest) to 10 (highest).
    pub risk_level: u8,
    /// Underlying safety score.
    pub score: f64,
    /// Underlying report count.
    pub reports: u32,
}

impl From<&SafetyScore> for HeatmapEntry {
    fn from(score: &SafetyScore) -> Self {
        Self {
            location: score.location,
            name: score.name.clone(),
            risk_level: risk_level(score.score),
            score: score.score,
            reports: score.reports,
        }
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Whether both coordinates fall inside their valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Availability of a patrol unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PatrolStatus {
    /// Idle and ready for dispatch.
    Available,
    /// On a routine patrol.
    Patrolling,
    /// Dispatched to an emergency.
    Responding,
    /// Not on shift.
    OffDuty,
}

/// A campus security patrol unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolUnit {
    /// Unit ID (`P001`, ...).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current availability.
    pub status: PatrolStatus,
    /// Last known position.
    pub location: GeoPoint,
}

/// Someone to notify when a user raises an emergency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    /// Contact name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Relationship to the user.
    pub relationship: String,
}

/// Highest battery percentage a profile can report.
pub const MAX_BATTERY_LEVEL: u8 = 100;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Full name.
    pub name: String,
    /// Student ID (`STU2024001`).
    pub id: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Emergency contacts, in notification order.
    pub emergency_contacts: Vec<EmergencyContact>,
    /// Free-form medical notes.
    pub medical_info: String,
    /// Device battery percentage (0-100).
    pub battery_level: u8,
}

impl UserProfile {
    /// Profile shown for users the ledger does not know.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            name: "User".to_string(),
            id: "STU000000".to_string(),
            email: "user@campus.edu".to_string(),
            phone: "+91-0000000000".to_string(),
            emergency_contacts: Vec::new(),
            medical_info: "None".to_string(),
            battery_level: 85,
        }
    }
}

/// An item in the safety-product shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog ID.
    pub id: u32,
    /// Product name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Price in whole rupees.
    pub price: u32,
    /// Shop category (`wearables`, `personal_alarms`, ...).
    pub category: String,
    /// Feature bullet points.
    pub features: Vec<String>,
    /// Icon name used by the frontend.
    pub icon: String,
}

/// Aggregate numbers shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Incidents filed since startup.
    pub total_incidents: usize,
    /// Emergencies currently active.
    pub active_emergencies: usize,
    /// Advertised average response time.
    pub avg_response_time: String,
    /// Advertised patrol coverage.
    pub coverage: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr as _;

    #[test]
    fn risk_level_known_scores() {
        assert_eq!(risk_level(4.5), 1);
        assert_eq!(risk_level(2.8), 4);
        assert_eq!(risk_level(4.0), 2);
        assert_eq!(risk_level(3.5), 3);
        assert_eq!(risk_level(4.2), 1);
        assert_eq!(risk_level(4.3), 1);
    }

    #[test]
    fn risk_level_clamps_out_of_range_scores() {
        assert_eq!(risk_level(5.0), 1);
        assert_eq!(risk_level(7.5), 1);
        assert_eq!(risk_level(0.0), 10);
        assert_eq!(risk_level(-3.0), 10);
        assert_eq!(risk_level(f64::NAN), 1);
    }

    #[test]
    fn risk_level_is_non_increasing_and_bounded() {
        let mut previous = u8::MAX;
        for step in 0..=120 {
            let score = -1.0 + f64::from(step) * 0.05;
            let level = risk_level(score);
            assert!(
                (MIN_RISK_LEVEL..=MAX_RISK_LEVEL).contains(&level),
                "score {score} gave level {level}"
            );
            assert!(level <= previous, "score {score} increased risk");
            previous = level;
        }
    }

    #[test]
    fn record_ids_are_zero_padded() {
        assert_eq!(format_record_id(RecordKind::Incident, 1), "INC0001");
        assert_eq!(format_record_id(RecordKind::Emergency, 42), "EMG0042");
        assert_eq!(format_record_id(RecordKind::Incident, 12345), "INC12345");
    }

    #[test]
    fn new_record_replaces_reserved_fields() {
        let fields = json!({
            "id": "spoofed",
            "status": "resolved",
            "description": "broken light",
        });
        let Value::Object(fields) = fields else {
            unreachable!()
        };

        let record = LedgerRecord::new(RecordKind::Incident, 3, fields);

        assert_eq!(record.id, "INC0003");
        assert_eq!(record.status, RecordStatus::Reported);
        assert_eq!(record.str_field("description"), Some("broken light"));
        assert!(record.field("id").is_none());
        assert!(record.field("status").is_none());
    }

    #[test]
    fn record_serializes_flat() {
        let mut fields = Map::new();
        fields.insert("type".to_string(), json!("theft"));
        let record = LedgerRecord::new(RecordKind::Emergency, 1, fields);

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["id"], "EMG0001");
        assert_eq!(value["status"], "active");
        assert_eq!(value["type"], "theft");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn location_keys_match_wire_names() {
        let names: Vec<&str> = LocationId::all().iter().map(AsRef::as_ref).collect();
        assert_eq!(
            names,
            [
                "library_main",
                "hostel_a",
                "parking_north",
                "cafeteria",
                "sports_complex",
                "academic_block_b",
            ]
        );
        for id in LocationId::all() {
            assert_eq!(LocationId::from_str(id.as_ref()).unwrap(), *id);
            assert_eq!(
                serde_json::to_value(id).unwrap(),
                Value::String(id.to_string())
            );
        }
        assert!(LocationId::from_str("rooftop").is_err());
    }

    #[test]
    fn geo_point_range_check() {
        let point = |lat, lng| GeoPoint { lat, lng };
        assert!(point(28.61, 77.22).is_valid());
        assert!(!point(91.0, 0.0).is_valid());
        assert!(!point(0.0, -180.5).is_valid());
    }
}
