use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog product. Deleting is a soft operation so historical quotes keep
/// resolving their `product_id` references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub unit_label: String,
    pub default_price: Decimal,
    pub is_taxable: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: String,
        sku: String,
        unit_label: String,
        default_price: Decimal,
        is_taxable: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            sku,
            unit_label,
            default_price,
            is_taxable,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
