use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, to_bson, DateTime as BsonDateTime};
use mongodb::options::FindOptions;
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::{ProductInput, ProductListParams, ProductResponse};
use crate::models::Product;
use crate::startup::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);

    let mut filter = doc! {};
    if !params.include_deleted.unwrap_or(false) {
        filter.insert("deleted", doc! { "$ne": true });
    }
    if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        filter.insert("name", doc! { "$regex": q, "$options": "i" });
    }

    let find_options = FindOptions::builder()
        .sort(doc! { "name": 1 })
        .limit(limit)
        .build();

    let mut cursor = state
        .db
        .products()
        .find(filter, find_options)
        .await
        .map_err(AppError::from)?;

    let mut products = Vec::new();
    while let Some(product) = cursor.try_next().await.map_err(AppError::from)? {
        products.push(ProductResponse::from(product));
    }

    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = Product::new(
        payload.name.trim().to_string(),
        payload.sku,
        payload.unit_label,
        payload.default_price,
        payload.is_taxable,
    );

    state
        .db
        .products()
        .insert_one(&product, None)
        .await
        .map_err(AppError::from)?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let result = state
        .db
        .products()
        .update_one(
            doc! { "_id": &id },
            doc! {
                "$set": {
                    "name": &payload.name,
                    "sku": &payload.sku,
                    "unit_label": &payload.unit_label,
                    "default_price": to_bson(&payload.default_price)?,
                    "is_taxable": payload.is_taxable,
                    "updated_at": BsonDateTime::now(),
                }
            },
            None,
        )
        .await
        .map_err(AppError::from)?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Product {} not found",
            id
        )));
    }

    Ok(Json(json!({ "ok": true })))
}

/// Soft delete: the product disappears from the default listing but
/// historical quotes keep resolving their references.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = state
        .db
        .products()
        .update_one(
            doc! { "_id": &id },
            doc! { "$set": { "deleted": true, "updated_at": BsonDateTime::now() } },
            None,
        )
        .await
        .map_err(AppError::from)?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Product {} not found",
            id
        )));
    }

    Ok(Json(json!({ "ok": true })))
}
