//! Stringification of SQL Server row values.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use tiberius::Row;
use tiberius::numeric::Numeric;
use uuid::Uuid;

/// Render every column of a row as text, in column order. `None` is NULL.
pub fn row_values(row: &Row) -> Vec<Option<String>> {
    (0..row.columns().len())
        .map(|idx| column_text(row, idx))
        .collect()
}

/// Render one column as text.
///
/// Typed reads are tried in turn; a read of the wrong type fails and the next
/// one is attempted. A NULL of any type yields `None`.
pub fn column_text(row: &Row, idx: usize) -> Option<String> {
    // bool before integers so BIT does not fall through to bytes.
    if let Ok(Some(v)) = row.try_get::<bool, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<u8, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<i16, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<i32, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<i64, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<f32, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<f64, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Numeric, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<&str, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Uuid, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<NaiveDateTime, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<NaiveDate, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<NaiveTime, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<DateTime<FixedOffset>, _>(idx) {
        return Some(v.to_rfc3339());
    }
    if let Ok(Some(bytes)) = row.try_get::<&[u8], _>(idx) {
        return Some(hex_literal(bytes));
    }

    None
}

/// `0x`-prefixed uppercase hex, as SQL Server tools display binary values.
pub fn hex_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for byte in bytes {
        let _ = write!(out, "{:02X}", byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_literal() {
        assert_eq!(hex_literal(&[]), "0x");
        assert_eq!(hex_literal(&[0x00, 0xAB, 0x7f]), "0x00AB7F");
    }

    // Typed column reads require integration testing with a real SQL Server
}
