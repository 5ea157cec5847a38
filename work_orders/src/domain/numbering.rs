//! Human-readable work order numbers: `WO-<year>-<seq>`, zero-padded to four
//! digits, sequenced within a calendar year.
//!
//! The sequencer reads the most recently created number and increments it.
//! It cannot serialize concurrent creators on its own; uniqueness is only
//! guaranteed together with the database's unique constraint on the number
//! column, and the creation flow retries once when that constraint fires.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumberingError {
    /// The most recent stored number does not look like WO-YYYY-NNNN. That
    /// is a data-integrity problem: silently reseeding at 0001 could hand
    /// out duplicate numbers, so generation is refused instead.
    #[error("most recent work order number {found:?} does not match WO-YYYY-NNNN")]
    Malformed { found: String },
}

/// Compute the next work order number.
///
/// `most_recent` is the number of the most recently created work order (by
/// creation time, not string order). No prior number, or a prior number from
/// a different year, seeds the current year at 0001.
pub fn next_wo_number(most_recent: Option<&str>, year: i32) -> Result<String, NumberingError> {
    let sequence = match most_recent {
        None => 1,
        Some(found) => {
            let (last_year, last_sequence) = parse(found).ok_or_else(|| {
                NumberingError::Malformed {
                    found: found.to_string(),
                }
            })?;
            if last_year == year { last_sequence + 1 } else { 1 }
        }
    };
    Ok(format!("WO-{year}-{sequence:04}"))
}

fn parse(number: &str) -> Option<(i32, u32)> {
    let mut parts = number.splitn(3, '-');
    if parts.next()? != "WO" {
        return None;
    }
    let year_part = parts.next()?;
    let sequence_part = parts.next()?;
    if year_part.len() != 4 || sequence_part.is_empty() {
        return None;
    }
    let year = year_part.parse().ok()?;
    let sequence = sequence_part.parse().ok()?;
    Some((year, sequence))
}
