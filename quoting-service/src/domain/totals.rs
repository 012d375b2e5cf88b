//! Totals engine: pure, deterministic computation of monetary totals from
//! line items, a discount and a VAT rate. No I/O, no failure modes:
//! malformed numeric input degrades to zero rather than erroring, since a
//! totals preview must never blow up while a user is mid-edit.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Discount, DiscountType, LineItem, Totals};

/// All monetary values are carried at 3 decimal places (3-subunit
/// currencies such as BHD), applied uniformly so preview and finalize
/// never drift by a fil.
pub const MONEY_DECIMALS: u32 = 3;

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

fn line_total(item: &LineItem) -> Decimal {
    // Negative inputs are treated as zero, same as any other bad number.
    let unit_price = item.unit_price.max(Decimal::ZERO);
    let quantity = item.quantity.max(Decimal::ZERO);
    round_money(unit_price * quantity)
}

/// Compute subtotal, discount, prorated taxable base, VAT and grand total.
///
/// The discount reduces the VAT base proportionally to how much of the
/// order was taxable (ratio of money, not count of lines). Invariants:
/// `0 <= taxable_base <= subtotal`, `discount_amount <= subtotal`,
/// `grand_total >= 0`.
pub fn compute_totals(items: &[LineItem], discount: &Discount, vat_rate: Decimal) -> Totals {
    let subtotal: Decimal = items.iter().map(line_total).sum();

    let mut discount_amount = match discount.kind {
        DiscountType::None => Decimal::ZERO,
        DiscountType::Percent => {
            subtotal * discount.value.max(Decimal::ZERO) / Decimal::ONE_HUNDRED
        }
        DiscountType::Amount => discount.value.max(Decimal::ZERO),
    };
    if discount_amount > subtotal {
        discount_amount = subtotal;
    }

    let after_discount = (subtotal - discount_amount).max(Decimal::ZERO);

    let taxable_subtotal: Decimal = items
        .iter()
        .filter(|item| item.is_taxable)
        .map(line_total)
        .sum();

    // Prorate the discount across taxable vs non-taxable lines. With
    // subtotal == 0 there is nothing to prorate and no division happens.
    let mut taxable_base = taxable_subtotal;
    if discount_amount > Decimal::ZERO && subtotal > Decimal::ZERO {
        let ratio = taxable_subtotal / subtotal;
        taxable_base = (taxable_subtotal - discount_amount * ratio).max(Decimal::ZERO);
    }

    let vat_amount = (taxable_base * vat_rate.max(Decimal::ZERO)).max(Decimal::ZERO);
    let grand_total = (after_discount + vat_amount).max(Decimal::ZERO);

    Totals {
        subtotal: round_money(subtotal),
        discount_amount: round_money(discount_amount),
        taxable_base: round_money(taxable_base),
        vat_amount: round_money(vat_amount),
        grand_total: round_money(grand_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(unit_price: &str, quantity: &str, is_taxable: bool) -> LineItem {
        LineItem {
            product_id: None,
            product_name: "Test item".to_string(),
            description: String::new(),
            unit_price: unit_price.parse().unwrap(),
            quantity: quantity.parse().unwrap(),
            unit_label: "pcs".to_string(),
            is_taxable,
        }
    }

    fn discount(kind: DiscountType, value: &str) -> Discount {
        Discount {
            kind,
            value: value.parse().unwrap(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn percent_discount_on_fully_taxable_order() {
        // 2 x 100 with 10% discount at 10% VAT
        let totals = compute_totals(
            &[item("100", "2", true)],
            &discount(DiscountType::Percent, "10"),
            dec("0.1"),
        );

        assert_eq!(totals.subtotal, dec("200.000"));
        assert_eq!(totals.discount_amount, dec("20.000"));
        assert_eq!(totals.taxable_base, dec("180.000"));
        assert_eq!(totals.vat_amount, dec("18.000"));
        assert_eq!(totals.grand_total, dec("198.000"));
    }

    #[test]
    fn amount_discount_prorated_across_taxable_and_exempt_lines() {
        // Half the order is taxable, so only half of the 20 discount
        // reduces the VAT base: 50 - 20 * (50/100) = 40.
        let totals = compute_totals(
            &[item("50", "1", true), item("50", "1", false)],
            &discount(DiscountType::Amount, "20"),
            dec("0.05"),
        );

        assert_eq!(totals.subtotal, dec("100.000"));
        assert_eq!(totals.discount_amount, dec("20.000"));
        assert_eq!(totals.taxable_base, dec("40.000"));
        assert_eq!(totals.vat_amount, dec("2.000"));
        assert_eq!(totals.grand_total, dec("82.000"));
    }

    #[test]
    fn amount_discount_clamps_to_subtotal() {
        let totals = compute_totals(
            &[item("100", "1", true)],
            &discount(DiscountType::Amount, "500"),
            dec("0.1"),
        );

        assert_eq!(totals.discount_amount, dec("100.000"));
        assert_eq!(totals.taxable_base, Decimal::ZERO);
        // Only VAT remains, and the base was fully discounted away.
        assert_eq!(totals.grand_total, totals.vat_amount);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn empty_items_produce_all_zeroes() {
        let totals = compute_totals(&[], &discount(DiscountType::Percent, "50"), dec("0.1"));

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.taxable_base, Decimal::ZERO);
        assert_eq!(totals.vat_amount, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn zero_priced_items_do_not_divide_by_zero() {
        let totals = compute_totals(
            &[item("0", "3", true)],
            &discount(DiscountType::Amount, "10"),
            dec("0.1"),
        );

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.taxable_base, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn no_discount_leaves_taxable_base_at_taxable_subtotal() {
        let totals = compute_totals(
            &[item("30", "2", true), item("40", "1", false)],
            &Discount::default(),
            dec("0.1"),
        );

        assert_eq!(totals.subtotal, dec("100.000"));
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.taxable_base, dec("60.000"));
        assert_eq!(totals.vat_amount, dec("6.000"));
        assert_eq!(totals.grand_total, dec("106.000"));
    }

    #[test]
    fn negative_inputs_are_coerced_to_zero() {
        let totals = compute_totals(
            &[item("-5", "2", true), item("10", "-1", true)],
            &discount(DiscountType::Percent, "-20"),
            dec("-0.1"),
        );

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.vat_amount, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn three_decimal_subunits_round_consistently() {
        // 0.105 * 3 = 0.315; VAT at 10% = 0.0315 -> 0.032 at 3 dp.
        let totals = compute_totals(&[item("0.105", "3", true)], &Discount::default(), dec("0.1"));

        assert_eq!(totals.subtotal, dec("0.315"));
        assert_eq!(totals.vat_amount, dec("0.032"));
        assert_eq!(totals.grand_total, dec("0.347"));
    }

    #[test]
    fn bounds_hold_across_discount_kinds() {
        let items = [
            item("12.345", "2", true),
            item("7.5", "4", false),
            item("0.001", "1000", true),
        ];
        let cases = [
            discount(DiscountType::None, "0"),
            discount(DiscountType::Percent, "33"),
            discount(DiscountType::Percent, "150"),
            discount(DiscountType::Amount, "17.5"),
            discount(DiscountType::Amount, "9999"),
        ];

        for case in &cases {
            let totals = compute_totals(&items, case, dec("0.1"));
            assert!(totals.taxable_base >= Decimal::ZERO);
            assert!(totals.taxable_base <= totals.subtotal);
            assert!(totals.discount_amount <= totals.subtotal);
            assert!(totals.grand_total >= Decimal::ZERO);
        }
    }
}
