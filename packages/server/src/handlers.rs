//! HTTP handler functions for the campus safety API.

use actix_web::{HttpResponse, web};
use campus_safety_ledger::seed::DEFAULT_USER_ID;
use campus_safety_ledger::{CancelTarget, RECENT_INCIDENT_LIMIT};
use campus_safety_models::{GeoPoint, MAX_BATTERY_LEVEL, Product};
use campus_safety_server_models::{
    AdminSummary, ApiErrorBody, ApiHealth, ApiStatus, BatteryUpdateRequest, BatteryUpdateResponse,
    CancelEmergencyRequest, CancelEmergencyResponse, ProductQueryParams, ProfileQueryParams,
    ReportResponse, SafeWalkRequest, SafeWalkResponse, SafetyMapResponse, TriggerEmergencyRequest,
    TriggerEmergencyResponse, VoiceCommandRequest, VoiceCommandResponse,
};
use rand::Rng as _;
use serde_json::{Map, Value, json};

use crate::AppState;
use crate::error::ApiError;
use crate::validation::check_location;
use crate::voice::is_emergency_command;

/// Where an emergency is placed when the client sends no location.
const DEFAULT_EMERGENCY_LOCATION: GeoPoint = GeoPoint {
    lat: 28.6129,
    lng: 77.2295,
};

/// Battery level recorded when the client does not report one.
const DEFAULT_BATTERY_LEVEL: i64 = 85;

/// Range of nearby devices reported as alerted.
const NEARBY_DEVICES: std::ops::RangeInclusive<u8> = 2..=8;

const RESPONSE_TIME_ESTIMATE: &str = "45 seconds";

/// Fields shared by every emergency the API raises.
struct EmergencyDraft {
    user_id: Option<String>,
    location: Option<Value>,
    kind: String,
    source: String,
    battery_level: Option<Value>,
}

impl EmergencyDraft {
    fn into_fields(self, state: &AppState) -> Map<String, Value> {
        let user_id = self.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string());
        let user_name = state
            .ledger
            .find_user(&user_id)
            .map_or_else(|| "User".to_string(), |profile| profile.name);
        let location = self
            .location
            .filter(|l| !l.is_null())
            .unwrap_or_else(|| json!(DEFAULT_EMERGENCY_LOCATION));
        let battery_level = self
            .battery_level
            .filter(|b| !b.is_null())
            .unwrap_or_else(|| json!(DEFAULT_BATTERY_LEVEL));

        let mut fields = Map::new();
        fields.insert("user_id".to_string(), Value::String(user_id));
        fields.insert("user_name".to_string(), Value::String(user_name));
        fields.insert("location".to_string(), location);
        fields.insert("type".to_string(), Value::String(self.kind));
        fields.insert("source".to_string(), Value::String(self.source));
        fields.insert("battery_level".to_string(), battery_level);
        fields
    }
}

/// `GET /health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        status: ApiStatus::Healthy,
        service: state.service_name.clone(),
        timestamp: chrono::Utc::now(),
    })
}

/// `POST /api/report`
///
/// Files an incident. Any JSON object is accepted; only `location` is
/// checked.
pub async fn report_incident(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let Value::Object(fields) = body.into_inner() else {
        return Err(ApiError::InvalidBody(
            "incident report must be a JSON object".to_string(),
        ));
    };
    check_location(fields.get("location"))?;

    let incident_id = state.ledger.add_incident(fields);
    log::info!("Incident {incident_id} reported");

    Ok(HttpResponse::Ok().json(ReportResponse {
        status: ApiStatus::Success,
        incident_id,
    }))
}

/// `POST /api/trigger-emergency`
pub async fn trigger_emergency(
    state: web::Data<AppState>,
    body: web::Json<TriggerEmergencyRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    check_location(body.location.as_ref())?;

    let fields = EmergencyDraft {
        user_id: body.user_id,
        location: body.location,
        kind: body.kind.unwrap_or_else(|| "emergency_sos".to_string()),
        source: body.source.unwrap_or_else(|| "manual".to_string()),
        battery_level: body.battery_level,
    }
    .into_fields(&state);

    let emergency_id = state.ledger.add_emergency(fields);
    let nearby_devices = rand::thread_rng().gen_range(NEARBY_DEVICES);

    Ok(HttpResponse::Ok().json(TriggerEmergencyResponse {
        status: ApiStatus::Success,
        emergency_id,
        nearby_devices,
        response_time_estimate: RESPONSE_TIME_ESTIMATE.to_string(),
    }))
}

/// `POST /api/cancel-emergency`
///
/// Cancels the given emergency, or the user's latest active one when the
/// ID is absent or `"current"`.
pub async fn cancel_emergency(
    state: web::Data<AppState>,
    body: web::Json<CancelEmergencyRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let user_id = body.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string());
    let target = match body.emergency_id {
        Some(id) if id != "current" => CancelTarget::Id(id),
        _ => CancelTarget::LatestForUser(user_id),
    };

    let emergency_id = state.ledger.cancel_emergency(&target)?;

    Ok(HttpResponse::Ok().json(CancelEmergencyResponse {
        status: ApiStatus::Success,
        message: format!("Emergency {emergency_id} cancelled"),
        emergency_id,
    }))
}

/// `POST /api/voice-command`
///
/// Raises a `voice_emergency` when the command contains an emergency
/// keyword; otherwise acknowledges it.
pub async fn voice_command(
    state: web::Data<AppState>,
    body: web::Json<VoiceCommandRequest>,
) -> Result<HttpResponse, ApiError> {
    let command = body
        .into_inner()
        .command
        .ok_or(ApiError::MissingField("command"))?;

    if !is_emergency_command(&command) {
        return Ok(HttpResponse::Ok().json(VoiceCommandResponse::Processed {
            status: ApiStatus::CommandProcessed,
            message: format!("Command processed: {command}"),
            command,
        }));
    }

    let mut fields = EmergencyDraft {
        user_id: None,
        location: None,
        kind: "voice_emergency".to_string(),
        source: "voice_command".to_string(),
        battery_level: None,
    }
    .into_fields(&state);
    fields.insert("command".to_string(), Value::String(command));

    let emergency_id = state.ledger.add_emergency(fields);

    Ok(HttpResponse::Ok().json(VoiceCommandResponse::Emergency {
        status: ApiStatus::EmergencyTriggered,
        action: "emergency".to_string(),
        message: format!("Emergency {emergency_id} triggered by voice command"),
        emergency_id,
    }))
}

/// Truncates a reported battery level to a whole percentage in `0..=100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn battery_percent(level: f64) -> u8 {
    level.clamp(0.0, f64::from(MAX_BATTERY_LEVEL)) as u8
}

/// `POST /api/update-battery`
pub async fn update_battery(
    state: web::Data<AppState>,
    body: web::Json<BatteryUpdateRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let level = body
        .battery_level
        .map(battery_percent)
        .ok_or(ApiError::MissingField("battery_level"))?;
    let user_id = body.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string());

    let profile = state.ledger.update_battery(&user_id, level)?;

    Ok(HttpResponse::Ok().json(BatteryUpdateResponse {
        status: ApiStatus::Success,
        battery_level: profile.battery_level,
    }))
}

/// `GET /api/safety-map`
pub async fn safety_map(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(SafetyMapResponse {
        heatmap: state.ledger.compute_risk_heatmap(),
        locations: state.ledger.safety_scores().to_vec(),
    })
}

/// `GET /api/admin`
pub async fn admin_summary(state: web::Data<AppState>) -> HttpResponse {
    let snapshot = state.ledger.dashboard(RECENT_INCIDENT_LIMIT);

    HttpResponse::Ok().json(AdminSummary {
        emergencies: snapshot.active_emergencies,
        incidents: snapshot.recent_incidents,
        patrols: state.ledger.patrols().to_vec(),
        stats: snapshot.stats,
    })
}

/// `GET /api/profile`
pub async fn profile(
    state: web::Data<AppState>,
    params: web::Query<ProfileQueryParams>,
) -> HttpResponse {
    let user_id = params.user_id.as_deref().unwrap_or(DEFAULT_USER_ID);
    HttpResponse::Ok().json(state.ledger.user_profile(user_id))
}

/// `GET /api/locations`
pub async fn locations(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.ledger.safety_scores())
}

/// `GET /api/products`
///
/// Lists the shop catalog, optionally narrowed to one category.
pub async fn products(
    state: web::Data<AppState>,
    params: web::Query<ProductQueryParams>,
) -> HttpResponse {
    let category = params.category.as_deref();
    let products: Vec<&Product> = state
        .ledger
        .products()
        .iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .collect();

    HttpResponse::Ok().json(products)
}

/// `POST /api/safewalk`
///
/// Starts a tracked walk. Only the session ID is issued; no tracking
/// happens server-side.
pub async fn start_safewalk(body: web::Json<SafeWalkRequest>) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    check_location(body.from.as_ref())?;
    check_location(body.to.as_ref())?;

    let walk_id = uuid::Uuid::new_v4().to_string();
    let user_id = body.user_id.as_deref().unwrap_or(DEFAULT_USER_ID);
    log::info!("SafeWalk {walk_id} started for {user_id}");

    Ok(HttpResponse::Ok().json(SafeWalkResponse {
        status: ApiStatus::Success,
        message: "SafeWalk started. Your contacts can follow your route.".to_string(),
        walk_id,
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorBody {
        error: "Not found".to_string(),
    })
}
