pub mod database;
pub mod finalize;
pub mod numbering;
pub mod renderer;

pub use database::QuoteDb;
pub use renderer::{PdfRenderer, QuoteRenderer, RenderInput, RenderedDocument};
