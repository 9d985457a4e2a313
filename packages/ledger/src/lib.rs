#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory safety ledger for the campus safety service.
//!
//! Holds the append-only incident and emergency sequences, the user
//! profiles, and the static tables (location safety scores, patrol units,
//! shop catalog) seeded at startup. Nothing is persisted: a restart starts
//! from the seed data again.
//!
//! Each record sequence sits behind its own `Mutex`, and the sequence
//! number for a new record is taken from the sequence length inside the
//! same critical section that appends it, so concurrent callers never see
//! duplicate or skipped IDs.

pub mod seed;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use campus_safety_models::{
    HeatmapEntry, LedgerRecord, LedgerStats, MAX_BATTERY_LEVEL, PatrolUnit, Product, RecordKind,
    RecordStatus, SafetyScore, UserProfile,
};
use serde_json::{Map, Value};
use thiserror::Error;

/// Number of incidents shown on the admin dashboard.
pub const RECENT_INCIDENT_LIMIT: usize = 5;

/// Errors from ledger lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// No emergency matched the cancellation target.
    #[error("No emergency found for {target}")]
    EmergencyNotFound {
        /// Description of what was searched for.
        target: String,
    },

    /// The user ID is not registered.
    #[error("Unknown user: {user_id}")]
    UnknownUser {
        /// The user ID that was looked up.
        user_id: String,
    },
}

/// Which emergency a cancellation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelTarget {
    /// A specific emergency ID.
    Id(String),
    /// The most recent active emergency raised by this user.
    LatestForUser(String),
}

impl std::fmt::Display for CancelTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "emergency {id}"),
            Self::LatestForUser(user_id) => write!(f, "active emergency of user {user_id}"),
        }
    }
}

/// A consistent read of the records the admin dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Emergencies still active, oldest first.
    pub active_emergencies: Vec<LedgerRecord>,
    /// The most recent incidents, oldest first.
    pub recent_incidents: Vec<LedgerRecord>,
    /// Aggregate numbers taken from the same read as the lists.
    pub stats: LedgerStats,
}

/// The campus safety ledger.
///
/// Construct one per process (or per test) and share it by reference;
/// every method takes `&self`. Methods that need both record sequences
/// lock incidents before emergencies.
pub struct SafetyLedger {
    incidents: Mutex<Vec<LedgerRecord>>,
    emergencies: Mutex<Vec<LedgerRecord>>,
    users: Mutex<BTreeMap<String, UserProfile>>,
    safety_scores: Vec<SafetyScore>,
    patrols: Vec<PatrolUnit>,
    products: Vec<Product>,
}

impl Default for SafetyLedger {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Recovers the guard from a poisoned lock. The guarded data is only ever
/// appended to or has a single field overwritten, so it is consistent even
/// if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn stats_for(total_incidents: usize, active_emergencies: usize) -> LedgerStats {
    LedgerStats {
        total_incidents,
        active_emergencies,
        avg_response_time: "45s".to_string(),
        coverage: "100%".to_string(),
    }
}

impl SafetyLedger {
    /// Creates an empty ledger over the given static tables.
    #[must_use]
    pub fn new(
        safety_scores: Vec<SafetyScore>,
        patrols: Vec<PatrolUnit>,
        users: BTreeMap<String, UserProfile>,
        products: Vec<Product>,
    ) -> Self {
        Self {
            incidents: Mutex::new(Vec::new()),
            emergencies: Mutex::new(Vec::new()),
            users: Mutex::new(users),
            safety_scores,
            patrols,
            products,
        }
    }

    /// Creates an empty ledger over the built-in campus seed data.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(
            seed::safety_scores(),
            seed::patrols(),
            seed::users(),
            seed::products(),
        )
    }

    fn append(
        records: &Mutex<Vec<LedgerRecord>>,
        kind: RecordKind,
        fields: Map<String, Value>,
    ) -> String {
        let mut records = lock(records);
        let record = LedgerRecord::new(kind, records.len() + 1, fields);
        let id = record.id.clone();
        records.push(record);
        id
    }

    /// Files an incident report and returns its assigned ID.
    ///
    /// Every supplied field is stored as-is; `id`, `timestamp` and `status`
    /// (`reported`) are assigned by the ledger.
    pub fn add_incident(&self, fields: Map<String, Value>) -> String {
        let id = Self::append(&self.incidents, RecordKind::Incident, fields);
        log::debug!("Recorded incident {id}");
        id
    }

    /// Raises an emergency and returns its assigned ID.
    ///
    /// Same contract as [`Self::add_incident`], with an `EMG` ID and an
    /// initial status of `active`.
    pub fn add_emergency(&self, fields: Map<String, Value>) -> String {
        let id = Self::append(&self.emergencies, RecordKind::Emergency, fields);
        log::warn!("Emergency {id} raised");
        id
    }

    /// Computes the risk heatmap over the location table, in table order.
    #[must_use]
    pub fn compute_risk_heatmap(&self) -> Vec<HeatmapEntry> {
        self.safety_scores.iter().map(HeatmapEntry::from).collect()
    }

    /// Returns the emergencies that are still active, oldest first.
    #[must_use]
    pub fn list_active_emergencies(&self) -> Vec<LedgerRecord> {
        lock(&self.emergencies)
            .iter()
            .filter(|e| e.is_active())
            .cloned()
            .collect()
    }

    /// Returns the last `n` incidents, oldest first.
    #[must_use]
    pub fn recent_incidents(&self, n: usize) -> Vec<LedgerRecord> {
        let incidents = lock(&self.incidents);
        let start = incidents.len().saturating_sub(n);
        incidents[start..].to_vec()
    }

    /// Returns every emergency, oldest first.
    #[must_use]
    pub fn emergencies(&self) -> Vec<LedgerRecord> {
        lock(&self.emergencies).clone()
    }

    /// Number of incidents filed since startup.
    #[must_use]
    pub fn incident_count(&self) -> usize {
        lock(&self.incidents).len()
    }

    /// Marks an emergency as cancelled and returns its ID.
    ///
    /// Cancelling an emergency that is already cancelled succeeds without
    /// change. [`CancelTarget::LatestForUser`] only matches active
    /// emergencies whose `user_id` field equals the given user.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmergencyNotFound`] if nothing matches.
    pub fn cancel_emergency(&self, target: &CancelTarget) -> Result<String, LedgerError> {
        let mut emergencies = lock(&self.emergencies);

        let found = match target {
            CancelTarget::Id(id) => emergencies.iter_mut().find(|e| &e.id == id),
            CancelTarget::LatestForUser(user_id) => emergencies
                .iter_mut()
                .rev()
                .find(|e| e.is_active() && e.str_field("user_id") == Some(user_id.as_str())),
        };

        let Some(emergency) = found else {
            return Err(LedgerError::EmergencyNotFound {
                target: target.to_string(),
            });
        };

        if emergency.is_active() {
            emergency.status = RecordStatus::Cancelled;
            log::info!("Emergency {} cancelled", emergency.id);
        }

        Ok(emergency.id.clone())
    }

    /// Looks up a registered user.
    #[must_use]
    pub fn find_user(&self, user_id: &str) -> Option<UserProfile> {
        lock(&self.users).get(user_id).cloned()
    }

    /// Returns the user's profile, or the guest profile if the user is not
    /// registered.
    #[must_use]
    pub fn user_profile(&self, user_id: &str) -> UserProfile {
        self.find_user(user_id).unwrap_or_else(UserProfile::guest)
    }

    /// Stores a new battery level on the user's profile and returns the
    /// updated profile. Levels above 100 are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownUser`] if the user is not registered.
    pub fn update_battery(&self, user_id: &str, level: u8) -> Result<UserProfile, LedgerError> {
        let mut users = lock(&self.users);
        let profile = users
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::UnknownUser {
                user_id: user_id.to_string(),
            })?;

        profile.battery_level = level.min(MAX_BATTERY_LEVEL);
        log::debug!("Battery for {user_id} now {}%", profile.battery_level);

        Ok(profile.clone())
    }

    /// Aggregate numbers for the admin dashboard.
    #[must_use]
    pub fn stats(&self) -> LedgerStats {
        let incidents = lock(&self.incidents);
        let emergencies = lock(&self.emergencies);
        let active = emergencies.iter().filter(|e| e.is_active()).count();
        stats_for(incidents.len(), active)
    }

    /// Reads the active emergencies, the last `n` incidents and the
    /// aggregate numbers while holding both sequence locks, so the counts
    /// always agree with the lists.
    #[must_use]
    pub fn dashboard(&self, n: usize) -> DashboardSnapshot {
        let incidents = lock(&self.incidents);
        let emergencies = lock(&self.emergencies);

        let active_emergencies: Vec<LedgerRecord> = emergencies
            .iter()
            .filter(|e| e.is_active())
            .cloned()
            .collect();
        let start = incidents.len().saturating_sub(n);

        DashboardSnapshot {
            stats: stats_for(incidents.len(), active_emergencies.len()),
            recent_incidents: incidents[start..].to_vec(),
            active_emergencies,
        }
    }

    /// The fixed location table.
    #[must_use]
    pub fn safety_scores(&self) -> &[SafetyScore] {
        &self.safety_scores
    }

    /// Patrol units on shift.
    #[must_use]
    pub fn patrols(&self) -> &[PatrolUnit] {
        &self.patrols
    }

    /// The shop catalog.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}
