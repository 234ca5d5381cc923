use axum::extract::{Path, State};
use axum::Json;
use rfbridge_core::command::Command;

use crate::error::AppError;
use crate::routes::run_exchange;
use crate::state::AppState;

/// GET /on — light the remote's LED.
pub async fn turn_on(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let reply = run_exchange(&app, Command::PowerOn).await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "LED turned on",
        "reply": reply,
    })))
}

/// GET /off — dark the remote's LED.
pub async fn turn_off(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let reply = run_exchange(&app, Command::PowerOff).await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "LED turned off",
        "reply": reply,
    })))
}

/// GET /servo/{angle} — move the servo; angle validated 0-180.
pub async fn move_servo(
    State(app): State<AppState>,
    Path(angle): Path<u32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let command = Command::servo(angle)?;
    let reply = run_exchange(&app, command).await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": format!("Servo moved to {angle}°"),
        "reply": reply,
    })))
}

/// GET /btlvl — read the remote's battery level.
pub async fn battery_level(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let reply = run_exchange(&app, Command::BatteryLevel).await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Battery level",
        "reply": reply,
    })))
}

/// GET /rdoff/{minutes} — power the remote's radio down; minutes validated
/// 0-720.
pub async fn radio_off(
    State(app): State<AppState>,
    Path(minutes): Path<u32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let command = Command::radio_off(minutes)?;
    let reply = run_exchange(&app, command).await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": format!("RD off for {minutes} min"),
        "reply": reply,
    })))
}
