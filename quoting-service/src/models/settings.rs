//! Company settings: a singleton document read (never written) by the
//! finalization workflow. Defaults are synthesized when no document exists.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 24,
            right: 24,
            bottom: 24,
            left: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default = "default_company_name")]
    pub name: String,
    #[serde(default)]
    pub vat_no: String,
    #[serde(default)]
    pub address: Vec<String>,
    #[serde(default)]
    pub footer_text: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_vat_rate")]
    pub default_vat_rate: Decimal,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            vat_no: String::new(),
            address: Vec::new(),
            footer_text: String::new(),
            currency: default_currency(),
            default_vat_rate: default_vat_rate(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Letterhead {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub margins: Margins,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Numbering {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_year_reset")]
    pub year_reset: bool,
}

impl Default for Numbering {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            year_reset: default_year_reset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySettings {
    #[serde(default)]
    pub company: CompanyProfile,
    #[serde(default)]
    pub letterhead: Letterhead,
    #[serde(default)]
    pub numbering: Numbering,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Default for CompanySettings {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            company: CompanyProfile::default(),
            letterhead: Letterhead::default(),
            numbering: Numbering::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

fn default_company_name() -> String {
    "Your Company".to_string()
}

fn default_currency() -> String {
    "BHD".to_string()
}

fn default_vat_rate() -> Decimal {
    // 10%
    Decimal::new(1, 1)
}

fn default_prefix() -> String {
    "QF".to_string()
}

fn default_year_reset() -> bool {
    true
}
