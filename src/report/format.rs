use crate::helper::{scale_amount, scale_float, scale_signed};
use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use log::debug;
use mongodb::bson::Bson;

pub const PLACEHOLDER: &str = "-";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The value as stored, without quotes for strings.
pub fn format_raw(value: Option<&Bson>) -> String {
    match value {
        None | Some(Bson::Null) => PLACEHOLDER.to_string(),
        Some(Bson::String(s)) => s.clone(),
        Some(Bson::Int32(i)) => i.to_string(),
        Some(Bson::Int64(i)) => i.to_string(),
        Some(Bson::Double(f)) => format!("{f:?}"),
        Some(Bson::Boolean(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Falls back to the raw value when `assets` is not a number.
pub fn format_assets(value: Option<&Bson>, decimals: u32) -> String {
    match scale_assets(value, decimals) {
        Ok(assets) => assets,
        Err(e) => {
            debug!("Printing raw assets: {}", e);
            format_raw(value)
        }
    }
}

fn scale_assets(value: Option<&Bson>, decimals: u32) -> Result<String> {
    match value {
        Some(Bson::String(s)) => scale_amount(s, decimals),
        Some(Bson::Int32(i)) => scale_signed(i64::from(*i), decimals),
        Some(Bson::Int64(i)) => scale_signed(*i, decimals),
        Some(Bson::Double(f)) => scale_float(*f, decimals),
        Some(other) => Err(eyre!("assets is not numeric: {:?}", other)),
        None => Err(eyre!("assets is missing")),
    }
}

/// UTC date of a Unix seconds timestamp, or the placeholder.
pub fn format_timestamp(value: Option<&Bson>) -> String {
    unix_seconds(value)
        .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn unix_seconds(value: Option<&Bson>) -> Option<i64> {
    match value? {
        Bson::String(s) => s.trim().parse().ok(),
        Bson::Int32(i) => Some(i64::from(*i)),
        Bson::Int64(i) => Some(*i),
        Bson::Double(f) if f.is_finite() => Some(f.trunc() as i64),
        _ => None,
    }
}
