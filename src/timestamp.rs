//! Creation and update instants.
//!
//! Stored as fixed-width UTC text (`2024-05-01T10:20:30.123456Z`) so that
//! `ORDER BY created_at` in SQL is chronological. Precision is microseconds,
//! which keeps a value read back from the database equal to the one written.

use time::{format_description::FormatItem, macros::format_description, OffsetDateTime, PrimitiveDateTime};

use crate::AppResult;

const STORAGE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z");

pub fn now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    let micros = now.microsecond();
    now.replace_microsecond(micros).unwrap_or(now)
}

pub fn to_storage(at: OffsetDateTime) -> AppResult<String> {
    let utc = at.to_offset(time::UtcOffset::UTC);
    Ok(utc.format(STORAGE_FORMAT)?)
}

pub fn from_storage(text: &str) -> AppResult<OffsetDateTime> {
    Ok(PrimitiveDateTime::parse(text, STORAGE_FORMAT)?.assume_utc())
}
