use axum::{extract::State, response::IntoResponse, Json};
use mongodb::bson::{doc, to_bson, DateTime as BsonDateTime};
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::{SettingsInput, SettingsResponse};
use crate::middleware::AdminGuard;
use crate::startup::AppState;

pub async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let settings = state.db.load_or_init_settings().await?;
    Ok(Json(SettingsResponse::from(settings)))
}

pub async fn update_settings(
    State(state): State<AppState>,
    _guard: AdminGuard,
    Json(payload): Json<SettingsInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let patch = doc! {
        "$set": {
            "company": to_bson(&payload.company)?,
            "letterhead": to_bson(&payload.letterhead)?,
            "numbering": to_bson(&payload.numbering)?,
            "updated_at": BsonDateTime::now(),
        },
        "$setOnInsert": { "created_at": BsonDateTime::now() },
    };

    state.db.upsert_settings(patch).await?;

    tracing::info!("Company settings updated");

    Ok(Json(json!({ "ok": true })))
}
