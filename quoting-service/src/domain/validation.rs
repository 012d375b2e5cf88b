//! Draft vs strict validation of the quote shape.
//!
//! The same logical entity is checked under two explicit leniency modes:
//! `Draft` lets a half-composed quote through (blank names are fine while
//! the user is still typing), `Strict` is the finalize-time gate. Failures
//! carry field-level messages so the caller can point at what to fix.

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use crate::models::{CustomerDetails, LineItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Draft,
    Strict,
}

pub fn validate_quote(
    customer: &CustomerDetails,
    items: &[LineItem],
    vat_rate: Option<Decimal>,
    mode: ValidationMode,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(rate) = vat_rate {
        if rate < Decimal::ZERO {
            errors.add(
                "vat_rate",
                field_error("range", "vat_rate must be non-negative"),
            );
        }
    }

    if mode == ValidationMode::Strict && customer.name.trim().is_empty() {
        errors.add(
            "customer",
            field_error("required", "customer name must not be empty"),
        );
    }

    for (index, item) in items.iter().enumerate() {
        if mode == ValidationMode::Strict && item.product_name.trim().is_empty() {
            errors.add(
                "items",
                field_error(
                    "required",
                    format!("item {}: product_name must not be empty", index),
                ),
            );
        }
        if item.unit_price < Decimal::ZERO {
            errors.add(
                "items",
                field_error(
                    "range",
                    format!("item {}: unit_price must be non-negative", index),
                ),
            );
        }
        if item.quantity < Decimal::ZERO {
            errors.add(
                "items",
                field_error(
                    "range",
                    format!("item {}: quantity must be non-negative", index),
                ),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn field_error(code: &'static str, message: impl Into<String>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into().into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_customer(name: &str) -> CustomerDetails {
        CustomerDetails {
            name: name.to_string(),
            ..CustomerDetails::default()
        }
    }

    fn named_item(product_name: &str) -> LineItem {
        LineItem {
            product_id: None,
            product_name: product_name.to_string(),
            description: String::new(),
            unit_price: Decimal::from(10),
            quantity: Decimal::ONE,
            unit_label: "pcs".to_string(),
            is_taxable: true,
        }
    }

    #[test]
    fn draft_mode_accepts_blank_names() {
        let result = validate_quote(
            &named_customer(""),
            &[named_item("")],
            None,
            ValidationMode::Draft,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn strict_mode_rejects_blank_customer_name() {
        let result = validate_quote(&named_customer("  "), &[], None, ValidationMode::Strict);
        let errors = result.unwrap_err();
        assert!(errors.field_errors().contains_key("customer"));
    }

    #[test]
    fn strict_mode_reports_each_offending_item() {
        let result = validate_quote(
            &named_customer("Acme"),
            &[named_item("Widget"), named_item(""), named_item("")],
            None,
            ValidationMode::Strict,
        );
        let errors = result.unwrap_err();
        let item_errors = &errors.field_errors()["items"];
        assert_eq!(item_errors.len(), 2);
        assert!(item_errors[0]
            .message
            .as_deref()
            .unwrap()
            .contains("item 1"));
    }

    #[test]
    fn negative_amounts_fail_in_both_modes() {
        let mut item = named_item("Widget");
        item.unit_price = Decimal::from(-1);

        for mode in [ValidationMode::Draft, ValidationMode::Strict] {
            let result = validate_quote(&named_customer("Acme"), &[item.clone()], None, mode);
            assert!(result.is_err(), "mode {:?} should reject", mode);
        }
    }

    #[test]
    fn negative_vat_rate_fails_in_both_modes() {
        for mode in [ValidationMode::Draft, ValidationMode::Strict] {
            let result = validate_quote(
                &named_customer("Acme"),
                &[named_item("Widget")],
                Some(Decimal::new(-1, 1)),
                mode,
            );
            let errors = result.unwrap_err();
            assert!(errors.field_errors().contains_key("vat_rate"));
        }
    }
}
