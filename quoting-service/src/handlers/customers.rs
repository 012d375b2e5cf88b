use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use mongodb::options::FindOptions;
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::{CustomerInput, CustomerResponse};
use crate::models::{Customer, CustomerDetails};
use crate::startup::AppState;

pub async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let find_options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .build();

    let mut cursor = state
        .db
        .customers()
        .find(doc! {}, find_options)
        .await
        .map_err(AppError::from)?;

    let mut customers = Vec::new();
    while let Some(customer) = cursor.try_next().await.map_err(AppError::from)? {
        customers.push(CustomerResponse::from(customer));
    }

    Ok(Json(customers))
}

pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CustomerInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = Customer::new(CustomerDetails {
        name: payload.name,
        vat_no: payload.vat_no,
        address_lines: payload.address_lines,
        contact_name: payload.contact_name,
        phone: payload.phone,
        email: payload.email,
    });

    state
        .db
        .customers()
        .insert_one(&customer, None)
        .await
        .map_err(AppError::from)?;

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CustomerInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let result = state
        .db
        .customers()
        .update_one(
            doc! { "_id": &id },
            doc! {
                "$set": {
                    "name": &payload.name,
                    "vat_no": &payload.vat_no,
                    "address_lines": &payload.address_lines,
                    "contact_name": &payload.contact_name,
                    "phone": &payload.phone,
                    "email": &payload.email,
                    "updated_at": BsonDateTime::now(),
                }
            },
            None,
        )
        .await
        .map_err(AppError::from)?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Customer {} not found",
            id
        )));
    }

    Ok(Json(json!({ "ok": true })))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .customers()
        .delete_one(doc! { "_id": &id }, None)
        .await
        .map_err(AppError::from)?;

    if result.deleted_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Customer {} not found",
            id
        )));
    }

    Ok(Json(json!({ "ok": true })))
}
