use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Product;

fn default_unit_label() -> String {
    "pcs".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default = "default_unit_label")]
    pub unit_label: String,
    #[serde(default)]
    pub default_price: Decimal,
    #[serde(default = "default_true")]
    pub is_taxable: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    pub q: Option<String>,
    pub include_deleted: Option<bool>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub unit_label: String,
    pub default_price: Decimal,
    pub is_taxable: bool,
    pub deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            sku: product.sku,
            unit_label: product.unit_label,
            default_price: product.default_price,
            is_taxable: product.is_taxable,
            deleted: product.deleted,
            created_at: product.created_at.to_rfc3339(),
            updated_at: product.updated_at.to_rfc3339(),
        }
    }
}
