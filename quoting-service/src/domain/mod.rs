pub mod totals;
pub mod validation;
