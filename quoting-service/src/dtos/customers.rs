use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Customer;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
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

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub vat_no: String,
    pub address_lines: Vec<String>,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.details.name,
            vat_no: customer.details.vat_no,
            address_lines: customer.details.address_lines,
            contact_name: customer.details.contact_name,
            phone: customer.details.phone,
            email: customer.details.email,
            created_at: customer.created_at.to_rfc3339(),
            updated_at: customer.updated_at.to_rfc3339(),
        }
    }
}
