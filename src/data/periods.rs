//! Quarterly Period Parsing
//! Maps `"YYYY-Qn"` period labels to calendar dates.

use chrono::NaiveDate;

use super::LoaderError;

/// Representative month for each quarter (mid-quarter convention).
const QUARTER_MONTHS: [u32; 4] = [2, 5, 8, 11];

/// Parse a `"YYYY-Qn"` period label into a calendar date.
///
/// The date uses the quarter's mid-quarter month (Q1 -> February,
/// Q2 -> May, Q3 -> August, Q4 -> November) with the day fixed to the 1st.
pub fn parse_period_label(label: &str) -> Result<NaiveDate, LoaderError> {
    let malformed = || LoaderError::MalformedPeriodLabel(label.to_string());

    let (year_part, quarter_part) = label.split_once('-').ok_or_else(&malformed)?;

    if year_part.len() != 4 {
        return Err(malformed());
    }
    let year: i32 = year_part.parse().map_err(|_| malformed())?;

    let quarter: u32 = quarter_part
        .strip_prefix('Q')
        .filter(|digits| digits.len() == 1)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(&malformed)?;
    if !(1..=4).contains(&quarter) {
        return Err(malformed());
    }

    let month = QUARTER_MONTHS[(quarter - 1) as usize];
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(malformed)
}
