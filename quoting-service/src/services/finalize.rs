//! Quote finalization: the one-way draft -> finalized transition.
//!
//! Ordering matters here. The status guard and strict validation run before
//! the sequence counter is touched, so a rejected attempt never burns a
//! number. Allocation happens as late as possible, immediately before the
//! persisting write; if that write loses a race the allocated number is
//! skipped, which is tolerable (a duplicate would not be).

use chrono::{Datelike, Utc};
use mongodb::bson::{doc, to_bson, DateTime as BsonDateTime};
use service_core::error::AppError;

use crate::domain::totals::compute_totals;
use crate::domain::validation::{validate_quote, ValidationMode};
use crate::models::{CompanySnapshot, Totals};
use crate::services::database::QuoteDb;
use crate::services::numbering::{format_quote_number, scope_key};

#[derive(Debug)]
pub struct FinalizeOutcome {
    pub quote_number: String,
    pub totals: Totals,
}

pub async fn finalize_quote(db: &QuoteDb, quote_id: &str) -> Result<FinalizeOutcome, AppError> {
    let quote = db
        .find_quote(quote_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quote {} not found", quote_id)))?;

    if !quote.is_draft() {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Quote {} is already finalized",
            quote_id
        )));
    }

    validate_quote(
        &quote.customer,
        &quote.items,
        quote.vat_rate,
        ValidationMode::Strict,
    )?;

    let settings = db.load_or_init_settings().await?;

    let vat_rate = quote
        .vat_rate
        .unwrap_or(settings.company.default_vat_rate);
    let totals = compute_totals(&quote.items, &quote.discount, vat_rate);

    // Deep copies: later edits to the customer record or the settings
    // document must never reach this quote.
    let customer_snapshot = quote.customer.clone();
    let company_snapshot = CompanySnapshot {
        company_name: settings.company.name.clone(),
        vat_no: settings.company.vat_no.clone(),
        address: settings.company.address.clone(),
        footer_text: settings.company.footer_text.clone(),
        currency: if quote.currency.is_empty() {
            settings.company.currency.clone()
        } else {
            quote.currency.clone()
        },
        vat_rate,
        letterhead_url: settings.letterhead.url.clone(),
        margins: settings.letterhead.margins,
        numbering_prefix: settings.numbering.prefix.clone(),
    };

    let year = Utc::now().year();
    let scope = scope_key(settings.numbering.year_reset, year);
    let seq = db.next_sequence(&scope, year).await?;
    let quote_number = format_quote_number(&settings.numbering.prefix, year, seq);

    let now = Utc::now();
    let patch = doc! {
        "$set": {
            "status": "finalized",
            "quote_number": &quote_number,
            "issue_date": BsonDateTime::from_chrono(now),
            "customer_snapshot": to_bson(&customer_snapshot)?,
            "company_snapshot": to_bson(&company_snapshot)?,
            "totals": to_bson(&totals)?,
            "updated_at": BsonDateTime::from_chrono(now),
        }
    };

    // Conditioned on draft status at write time, not just the check above:
    // if a concurrent finalize won in between, this matches nothing.
    let transitioned = db.finalize_draft(quote_id, patch).await?;
    if !transitioned {
        tracing::warn!(
            quote_id = %quote_id,
            skipped_number = %quote_number,
            "Lost finalize race, sequence number skipped"
        );
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Quote {} is already finalized",
            quote_id
        )));
    }

    tracing::info!(
        quote_id = %quote_id,
        quote_number = %quote_number,
        grand_total = %totals.grand_total,
        "Quote finalized"
    );

    Ok(FinalizeOutcome {
        quote_number,
        totals,
    })
}
