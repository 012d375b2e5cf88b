//! Quote document and its embedded value types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::settings::Margins;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Draft,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    None,
    Percent,
    Amount,
}

/// Discount applied to the whole quote. `percent` is 0-100, `amount` is an
/// absolute value in the quote currency (clamped to the subtotal when applied).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Discount {
    #[serde(rename = "type", default)]
    pub kind: DiscountType,
    #[serde(default)]
    pub value: Decimal,
}

fn default_unit_label() -> String {
    "pcs".to_string()
}

fn default_true() -> bool {
    true
}

/// One line of a quote. Owned by the quote document, never persisted on its
/// own. Missing numeric fields deserialize to zero so a half-typed draft
/// never fails to load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default = "default_unit_label")]
    pub unit_label: String,
    #[serde(default = "default_true")]
    pub is_taxable: bool,
}

/// Customer fields as embedded in a quote (and frozen into
/// `customer_snapshot` at finalize time).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vat_no: String,
    #[serde(default)]
    pub address_lines: Vec<String>,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Monetary totals. Derived on every preview, frozen into the quote at
/// finalize time. All fields are rounded to 3 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub taxable_base: Decimal,
    pub vat_amount: Decimal,
    pub grand_total: Decimal,
}

/// Company data frozen into a quote at finalize time. A deep copy of the
/// settings fields relevant to rendering; later settings edits never reach
/// a finalized quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySnapshot {
    pub company_name: String,
    #[serde(default)]
    pub vat_no: String,
    #[serde(default)]
    pub address: Vec<String>,
    #[serde(default)]
    pub footer_text: String,
    pub currency: String,
    pub vat_rate: Decimal,
    #[serde(default)]
    pub letterhead_url: String,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub numbering_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: QuoteStatus,
    pub customer: CustomerDetails,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discount: Discount,
    /// Decimal fraction, e.g. 0.1 = 10%. Falls back to the company default
    /// when unset.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub notes: String,

    // Set only at finalize; never mutated afterwards.
    #[serde(default)]
    pub quote_number: Option<String>,
    #[serde(default)]
    pub issue_date: Option<mongodb::bson::DateTime>,
    #[serde(default)]
    pub customer_snapshot: Option<CustomerDetails>,
    #[serde(default)]
    pub company_snapshot: Option<CompanySnapshot>,
    #[serde(default)]
    pub totals: Option<Totals>,

    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    pub fn new_draft(
        customer: CustomerDetails,
        items: Vec<LineItem>,
        discount: Discount,
        vat_rate: Option<Decimal>,
        currency: String,
        notes: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            status: QuoteStatus::Draft,
            customer,
            items,
            discount,
            vat_rate,
            currency,
            notes,
            quote_number: None,
            issue_date: None,
            customer_snapshot: None,
            company_snapshot: None,
            totals: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.status == QuoteStatus::Draft
    }
}
