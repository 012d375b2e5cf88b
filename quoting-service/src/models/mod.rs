mod counter;
mod customer;
mod product;
mod quote;
mod settings;

pub use counter::SequenceCounter;
pub use customer::Customer;
pub use product::Product;
pub use quote::{
    CompanySnapshot, CustomerDetails, Discount, DiscountType, LineItem, Quote, QuoteStatus, Totals,
};
pub use settings::{CompanyProfile, CompanySettings, Letterhead, Margins, Numbering};
