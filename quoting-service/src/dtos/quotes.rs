use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    CompanySnapshot, CustomerDetails, Discount, LineItem, Quote, QuoteStatus, Totals,
};

fn default_currency() -> String {
    "BHD".to_string()
}

/// Draft payload: everything is optional or defaulted so a half-composed
/// quote can be saved at any point.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteDraftInput {
    #[serde(default)]
    pub customer: CustomerDetails,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct CreateQuoteResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct FinalizeResponse {
    pub quote_number: String,
    pub totals: Totals,
}

#[derive(Debug, Deserialize)]
pub struct QuoteListParams {
    pub status: Option<QuoteStatus>,
    pub q: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PdfParams {
    pub draft: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: String,
    pub status: QuoteStatus,
    pub customer: CustomerDetails,
    pub items: Vec<LineItem>,
    pub discount: Discount,
    pub vat_rate: Option<Decimal>,
    pub currency: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_snapshot: Option<CustomerDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_snapshot: Option<CompanySnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<Totals>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            status: quote.status,
            customer: quote.customer,
            items: quote.items,
            discount: quote.discount,
            vat_rate: quote.vat_rate,
            currency: quote.currency,
            notes: quote.notes,
            quote_number: quote.quote_number,
            issue_date: quote.issue_date.map(|d| d.to_chrono().to_rfc3339()),
            customer_snapshot: quote.customer_snapshot,
            company_snapshot: quote.company_snapshot,
            totals: quote.totals,
            created_at: quote.created_at.to_rfc3339(),
            updated_at: quote.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteListResponse {
    pub items: Vec<QuoteResponse>,
}
