use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::quote::CustomerDetails;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub details: CustomerDetails,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(details: CustomerDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            details,
            created_at: now,
            updated_at: now,
        }
    }
}
