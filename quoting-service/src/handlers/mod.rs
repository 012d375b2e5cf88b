mod customers;
mod health;
mod products;
mod quotes;
mod settings;

pub use customers::{create_customer, delete_customer, list_customers, update_customer};
pub use health::health_check;
pub use products::{create_product, delete_product, list_products, update_product};
pub use quotes::{
    create_quote, finalize_quote, get_quote, list_quotes, preview_totals, quote_pdf, update_quote,
};
pub use settings::{get_settings, update_settings};
