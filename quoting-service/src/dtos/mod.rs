mod customers;
mod products;
mod quotes;
mod settings;

pub use customers::{CustomerInput, CustomerResponse};
pub use products::{ProductInput, ProductListParams, ProductResponse};
pub use quotes::{
    CreateQuoteResponse, FinalizeResponse, PdfParams, QuoteDraftInput, QuoteListParams,
    QuoteListResponse, QuoteResponse,
};
pub use settings::{SettingsInput, SettingsResponse};
