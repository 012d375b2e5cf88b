use serde::{Deserialize, Serialize};

/// One sequence counter per numbering scope. The scope key is `"quote"` for
/// a shared sequence, or `"quote:<year>"` when numbering restarts each year.
///
/// Mutated only through an atomic `$inc` upsert; never read-then-written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceCounter {
    #[serde(rename = "_id")]
    pub scope: String,
    pub seq: i64,
    /// Metadata only, set when the counter document is first created.
    #[serde(default)]
    pub year: Option<i32>,
}
