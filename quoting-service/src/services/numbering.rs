//! Quote number scoping and formatting.
//!
//! The counter scope is `"quote"` for one shared sequence, or
//! `"quote:<year>"` so the sequence restarts at the first allocation of
//! each new year. The display string always embeds the current calendar
//! year for readability, whether or not the counter scope resets.

pub fn scope_key(year_reset: bool, year: i32) -> String {
    if year_reset {
        format!("quote:{}", year)
    } else {
        "quote".to_string()
    }
}

pub fn format_quote_number(prefix: &str, year: i32, seq: i64) -> String {
    format!("{}-{}-{:03}", prefix, year, seq)
}
