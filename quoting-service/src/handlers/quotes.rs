use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, to_bson, DateTime as BsonDateTime};
use mongodb::options::FindOptions;
use serde_json::json;
use service_core::error::AppError;

use crate::domain::totals::compute_totals;
use crate::domain::validation::{validate_quote, ValidationMode};
use crate::dtos::{
    CreateQuoteResponse, FinalizeResponse, PdfParams, QuoteDraftInput, QuoteListParams,
    QuoteListResponse, QuoteResponse,
};
use crate::models::{CompanySnapshot, Quote, QuoteStatus};
use crate::services::{finalize, RenderInput};
use crate::startup::AppState;

pub async fn create_quote(
    State(state): State<AppState>,
    Json(payload): Json<QuoteDraftInput>,
) -> Result<impl IntoResponse, AppError> {
    validate_quote(
        &payload.customer,
        &payload.items,
        payload.vat_rate,
        ValidationMode::Draft,
    )?;

    let quote = Quote::new_draft(
        payload.customer,
        payload.items,
        payload.discount,
        payload.vat_rate,
        payload.currency,
        payload.notes,
    );

    state
        .db
        .quotes()
        .insert_one(&quote, None)
        .await
        .map_err(AppError::from)?;

    tracing::info!(quote_id = %quote.id, "Draft quote created");

    Ok((
        StatusCode::CREATED,
        Json(CreateQuoteResponse { id: quote.id }),
    ))
}

pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<QuoteListParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);

    let mut filter = doc! {};
    if let Some(status) = params.status {
        let bson_status = to_bson(&status)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to serialize status: {}", e)))?;
        filter.insert("status", bson_status);
    }
    if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        filter.insert(
            "$or",
            vec![
                doc! { "quote_number": { "$regex": q, "$options": "i" } },
                doc! { "customer.name": { "$regex": q, "$options": "i" } },
            ],
        );
    }

    let find_options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .limit(limit)
        .build();

    let mut cursor = state
        .db
        .quotes()
        .find(filter, find_options)
        .await
        .map_err(AppError::from)?;

    let mut items = Vec::new();
    while let Some(quote) = cursor.try_next().await.map_err(AppError::from)? {
        items.push(QuoteResponse::from(quote));
    }

    Ok(Json(QuoteListResponse { items }))
}

pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quote = state
        .db
        .find_quote(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quote {} not found", id)))?;

    Ok(Json(QuoteResponse::from(quote)))
}

pub async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<QuoteDraftInput>,
) -> Result<impl IntoResponse, AppError> {
    validate_quote(
        &payload.customer,
        &payload.items,
        payload.vat_rate,
        ValidationMode::Draft,
    )?;

    let quote = state
        .db
        .find_quote(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quote {} not found", id)))?;
    if !quote.is_draft() {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Cannot edit finalized quote {}",
            id
        )));
    }

    let patch = doc! {
        "$set": {
            "customer": to_bson(&payload.customer)?,
            "items": to_bson(&payload.items)?,
            "discount": to_bson(&payload.discount)?,
            "vat_rate": to_bson(&payload.vat_rate)?,
            "currency": &payload.currency,
            "notes": &payload.notes,
            "updated_at": BsonDateTime::now(),
        }
    };

    // Guarded again at write time; a finalize may have won in between.
    let matched = state.db.update_draft(&id, patch).await?;
    if !matched {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Cannot edit finalized quote {}",
            id
        )));
    }

    Ok(Json(json!({ "ok": true })))
}

/// Totals for an unsaved draft payload, computed fresh on every call.
pub async fn preview_totals(
    State(state): State<AppState>,
    Json(payload): Json<QuoteDraftInput>,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.db.load_or_init_settings().await?;
    let vat_rate = payload
        .vat_rate
        .unwrap_or(settings.company.default_vat_rate);

    Ok(Json(compute_totals(
        &payload.items,
        &payload.discount,
        vat_rate,
    )))
}

pub async fn finalize_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = finalize::finalize_quote(&state.db, &id).await?;

    Ok(Json(FinalizeResponse {
        quote_number: outcome.quote_number,
        totals: outcome.totals,
    }))
}

pub async fn quote_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PdfParams>,
) -> Result<impl IntoResponse, AppError> {
    let quote = state
        .db
        .find_quote(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quote {} not found", id)))?;

    let input = if params.draft.unwrap_or(false) {
        draft_render_input(&state, quote).await?
    } else {
        final_render_input(quote)?
    };

    let rendered = state.renderer.render(&input).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", rendered.filename),
            ),
        ],
        rendered.bytes,
    ))
}

/// Preview path: ad-hoc totals, placeholder number, company data from the
/// live settings document.
async fn draft_render_input(state: &AppState, quote: Quote) -> Result<RenderInput, AppError> {
    let settings = state.db.load_or_init_settings().await?;
    let vat_rate = quote
        .vat_rate
        .unwrap_or(settings.company.default_vat_rate);
    let totals = compute_totals(&quote.items, &quote.discount, vat_rate);

    Ok(RenderInput {
        quote_number: format!("{}-DRAFT", settings.numbering.prefix),
        issue_date: None,
        customer: quote.customer,
        items: quote.items,
        totals,
        company: CompanySnapshot {
            company_name: settings.company.name,
            vat_no: settings.company.vat_no,
            address: settings.company.address,
            footer_text: settings.company.footer_text,
            currency: if quote.currency.is_empty() {
                settings.company.currency
            } else {
                quote.currency
            },
            vat_rate,
            letterhead_url: settings.letterhead.url,
            margins: settings.letterhead.margins,
            numbering_prefix: settings.numbering.prefix,
        },
        notes: quote.notes,
        draft: true,
    })
}

/// Final path: everything comes from the frozen snapshot; nothing is
/// recomputed.
fn final_render_input(quote: Quote) -> Result<RenderInput, AppError> {
    if quote.status != QuoteStatus::Finalized {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Quote must be finalized before PDF export"
        )));
    }

    let quote_number = quote.quote_number.ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("Finalized quote missing quote_number"))
    })?;
    let totals = quote
        .totals
        .ok_or_else(|| AppError::InternalError(anyhow::anyhow!("Finalized quote missing totals")))?;
    let customer = quote.customer_snapshot.ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("Finalized quote missing customer snapshot"))
    })?;
    let company = quote.company_snapshot.ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("Finalized quote missing company snapshot"))
    })?;

    Ok(RenderInput {
        quote_number,
        issue_date: quote.issue_date.map(|d| d.to_chrono()),
        customer,
        items: quote.items,
        totals,
        company,
        notes: quote.notes,
        draft: false,
    })
}
