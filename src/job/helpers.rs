//! Identifier and formatting helpers for job records.

use chrono::{Datelike, Utc};
use rand::Rng;

/// Generate a client-facing job identifier: `TX-MOLD-<year>-<3-digit>`.
pub fn generate_job_id() -> String {
    let year = Utc::now().year();
    let random: u16 = rand::thread_rng().gen_range(0..1000);
    format!("TX-MOLD-{year}-{random:03}")
}

/// Generate an identifier for an inspection sub-entry: `<prefix>-<millis>`.
pub fn entry_id(prefix: &str) -> String {
    format!("{prefix}-{}", Utc::now().timestamp_millis())
}

/// Generate a photo identifier: `photo-<millis>-<random>`.
pub fn photo_id() -> String {
    let random: u16 = rand::thread_rng().gen_range(0..1000);
    format!("photo-{}-{random}", Utc::now().timestamp_millis())
}

/// Normalize a 10-digit US phone number to `(xxx) xxx-xxxx`. Anything else
/// is returned unchanged.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..])
    } else {
        phone.to_string()
    }
}
