use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{CompanyProfile, CompanySettings, Letterhead, Numbering};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SettingsInput {
    #[validate(custom(function = "validate_company"))]
    pub company: CompanyProfile,
    #[serde(default)]
    pub letterhead: Letterhead,
    #[serde(default)]
    pub numbering: Numbering,
}

fn validate_company(company: &CompanyProfile) -> Result<(), ValidationError> {
    if company.name.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("company name must not be empty".into());
        return Err(error);
    }
    if company.default_vat_rate.is_sign_negative() {
        let mut error = ValidationError::new("range");
        error.message = Some("default_vat_rate must be non-negative".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub company: CompanyProfile,
    pub letterhead: Letterhead,
    pub numbering: Numbering,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CompanySettings> for SettingsResponse {
    fn from(settings: CompanySettings) -> Self {
        Self {
            company: settings.company,
            letterhead: settings.letterhead,
            numbering: settings.numbering,
            created_at: settings.created_at.to_rfc3339(),
            updated_at: settings.updated_at.to_rfc3339(),
        }
    }
}
