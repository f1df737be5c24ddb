//! Pure helpers shared by the domain and the engine (no I/O).

pub mod datetime;

pub use datetime::{format_timestamp, format_timestamp_str, parse_datetime, parse_datetime_or};
