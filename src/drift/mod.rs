//! Lunisolar drift estimation
//!
//! Approximates how far a lunisolar birthday has wandered from its solar
//! (Gregorian) anchor in a given year. The model is deliberately simple:
//! the lunar year runs 11 days short of the solar year, and a 30-day
//! intercalary month (Adhika Masa) is inserted roughly every 2.7 years.
//!
//! Everything here is a pure function of the queried year. Nothing is
//! cached between calls, so a year slider can call [`estimate_drift`] on
//! every input event.

pub mod narrative;

pub use narrative::{explain, sync_pointer_left, DriftNote};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Year the drift is measured from
pub const ANCHOR_YEAR: i64 = 2025;

/// Days the lunar year falls short of the solar year
pub const LUNAR_SHORTFALL_DAYS: i64 = 11;

/// Length of one intercalary month in days
pub const LEAP_MONTH_DAYS: i64 = 30;

/// Average spacing between intercalary months, in years
pub const LEAP_MONTH_INTERVAL_YEARS: f64 = 2.7;

/// Phase offset of the leap-month cycle relative to the anchor year
pub const LEAP_MONTH_PHASE: f64 = 1.2;

/// Sync meter bounds (percent)
pub const SYNC_MIN: f64 = 5.0;
pub const SYNC_MAX: f64 = 95.0;

/// Drift magnitudes below this many days count as "cosmic sync"
pub const COSMIC_SYNC_THRESHOLD_DAYS: u32 = 3;

/// Inclusive year range accepted from untyped callers
pub const MIN_YEAR: i64 = -100_000;
pub const MAX_YEAR: i64 = 100_000;

/// Errors raised while turning host input into a year
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriftError {
    #[error("Invalid year input: {0}")]
    InvalidInput(String),
}

/// Which way the lunisolar date has moved relative to the solar one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Earlier,
    Later,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Earlier => "earlier",
            Direction::Later => "later",
        }
    }
}

/// A single drift query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftQuery {
    pub target_year: i64,
    pub anchor_year: i64,
}

impl DriftQuery {
    /// Query against the standard anchor year
    pub fn new(target_year: i64) -> Self {
        Self {
            target_year,
            anchor_year: ANCHOR_YEAR,
        }
    }

    /// Query against a custom anchor year
    pub fn with_anchor(target_year: i64, anchor_year: i64) -> Self {
        Self {
            target_year,
            anchor_year,
        }
    }

    /// Signed distance from the anchor, widened so any two `i64` years fit
    pub fn years_passed(&self) -> i128 {
        i128::from(self.target_year) - i128::from(self.anchor_year)
    }

    /// Evaluate the drift model for this query
    ///
    /// Defined for every pair of `i64` years.
    pub fn estimate(&self) -> DriftResult {
        let years_passed = self.years_passed();
        let raw_drift_days = years_passed * i128::from(LUNAR_SHORTFALL_DAYS);
        let leap_months_added = leap_months_since(years_passed);

        // `%` on integers truncates toward zero, so the remainder keeps the
        // sign of the dividend. Negative drift means "earlier".
        let effective = (raw_drift_days - i128::from(leap_months_added) * i128::from(LEAP_MONTH_DAYS))
            % i128::from(LEAP_MONTH_DAYS);
        let effective_drift_days = effective as f64;

        let sync_percentage = (50.0 + effective_drift_days * 2.5).clamp(SYNC_MIN, SYNC_MAX);
        let direction = if effective_drift_days > 0.0 {
            Direction::Later
        } else {
            Direction::Earlier
        };
        let leap_month_just_added = leap_months_added != leap_months_since(years_passed - 1);
        let drift_magnitude_days = effective_drift_days.abs().round() as u32;

        DriftResult {
            target_year: self.target_year,
            effective_drift_days,
            direction,
            sync_percentage,
            leap_month_just_added,
            leap_months_added,
            drift_magnitude_days,
            cosmic_sync: drift_magnitude_days < COSMIC_SYNC_THRESHOLD_DAYS,
        }
    }
}

/// Outcome of one drift query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftResult {
    pub target_year: i64,
    /// Signed drift in days, roughly within (-30, 30)
    pub effective_drift_days: f64,
    pub direction: Direction,
    /// Position of the sync meter, clamped to [5, 95]
    pub sync_percentage: f64,
    /// True when the leap-month count changed since the previous year
    pub leap_month_just_added: bool,
    pub leap_months_added: i64,
    pub drift_magnitude_days: u32,
    pub cosmic_sync: bool,
}

/// Estimate drift for `target_year` against [`ANCHOR_YEAR`]
pub fn estimate_drift(target_year: i64) -> DriftResult {
    DriftQuery::new(target_year).estimate()
}

/// Number of intercalary months inserted after `years_passed` years
///
/// Evaluated in floating point, including the rounding quirks that come
/// with it (15 years gives 5, not 6).
pub fn leap_months_for(years_passed: i64) -> i64 {
    leap_months_since(i128::from(years_passed))
}

// The float-to-int cast saturates; over the full i64 year range the count
// stays well inside i64.
fn leap_months_since(years_passed: i128) -> i64 {
    ((years_passed as f64 + LEAP_MONTH_PHASE) / LEAP_MONTH_INTERVAL_YEARS).floor() as i64
}

/// Strict conversion of a host number into a year
///
/// Rejects non-finite values, fractional values, and years outside
/// [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn year_from_number(value: f64) -> Result<i64, DriftError> {
    if !value.is_finite() {
        return Err(DriftError::InvalidInput(format!("{} is not a finite number", value)));
    }
    if value.fract() != 0.0 {
        return Err(DriftError::InvalidInput(format!("{} is not a whole year", value)));
    }
    check_range(value)
}

/// Lenient conversion: truncates toward zero before range checking
pub fn coerce_year(value: f64) -> Result<i64, DriftError> {
    if !value.is_finite() {
        return Err(DriftError::InvalidInput(format!("{} is not a finite number", value)));
    }
    check_range(value.trunc())
}

fn check_range(value: f64) -> Result<i64, DriftError> {
    if value < MIN_YEAR as f64 || value > MAX_YEAR as f64 {
        return Err(DriftError::InvalidInput(format!(
            "year {} out of range ({}..={})",
            value, MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_year_is_neutral() {
        let result = estimate_drift(2025);
        assert_eq!(result.effective_drift_days, 0.0);
        assert_eq!(result.direction, Direction::Earlier);
        assert_eq!(result.sync_percentage, 50.0);
        assert!(result.cosmic_sync);
        assert!(!result.leap_month_just_added);
    }

    #[test]
    fn test_three_years_out() {
        let result = estimate_drift(2028);
        assert_eq!(result.leap_months_added, 1);
        assert_eq!(result.effective_drift_days, 3.0);
        assert_eq!(result.sync_percentage, 57.5);
        assert_eq!(result.direction, Direction::Later);
        assert_eq!(result.drift_magnitude_days, 3);
        assert!(!result.cosmic_sync);
    }

    #[test]
    fn test_negative_remainder_keeps_sign() {
        // 22 - 30 = -8; a Euclidean remainder would give 22
        let result = estimate_drift(2027);
        assert_eq!(result.effective_drift_days, -8.0);
        assert_eq!(result.direction, Direction::Earlier);
        assert_eq!(result.sync_percentage, 30.0);
        assert!(result.leap_month_just_added);
    }

    #[test]
    fn test_past_years() {
        let result = estimate_drift(2024);
        assert_eq!(result.effective_drift_days, -11.0);
        assert_eq!(result.sync_percentage, 22.5);
        assert_eq!(result.drift_magnitude_days, 11);

        let result = estimate_drift(2000);
        assert_eq!(result.leap_months_added, -9);
        assert_eq!(result.effective_drift_days, -5.0);
    }

    #[test]
    fn test_leap_months_float_boundary() {
        assert_eq!(leap_months_for(0), 0);
        assert_eq!(leap_months_for(2), 1);
        assert_eq!(leap_months_for(15), 5);
        assert_eq!(leap_months_for(-1), 0);
        assert_eq!(leap_months_for(-2), -1);
    }

    #[test]
    fn test_sync_percentage_always_clamped() {
        for year in -3000..5000 {
            let sync = estimate_drift(year).sync_percentage;
            assert!((SYNC_MIN..=SYNC_MAX).contains(&sync), "year {} gave {}", year, sync);
        }
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        let low = estimate_drift(MIN_YEAR);
        let high = estimate_drift(MAX_YEAR);
        assert!(low.effective_drift_days.abs() < 30.0);
        assert!(high.effective_drift_days.abs() < 30.0);
    }

    #[test]
    fn test_any_i64_year_is_defined() {
        for year in [i64::MAX, i64::MIN, i64::MAX / 10, i64::MIN / 10] {
            let result = estimate_drift(year);
            assert!(result.effective_drift_days.abs() < 30.0, "year {} gave {}", year, result.effective_drift_days);
            assert!((SYNC_MIN..=SYNC_MAX).contains(&result.sync_percentage));
        }

        let result = DriftQuery::with_anchor(i64::MIN, i64::MAX).estimate();
        assert!(result.effective_drift_days.abs() < 30.0);
    }

    #[test]
    fn test_custom_anchor() {
        let shifted = DriftQuery::with_anchor(2003, 2000).estimate();
        let standard = estimate_drift(2028);
        assert_eq!(shifted.target_year, 2003);
        assert_eq!(shifted.effective_drift_days, standard.effective_drift_days);
        assert_eq!(shifted.sync_percentage, standard.sync_percentage);
    }

    #[test]
    fn test_year_from_number() {
        assert_eq!(year_from_number(2030.0), Ok(2030));
        assert!(matches!(year_from_number(2030.5), Err(DriftError::InvalidInput(_))));
        assert!(matches!(year_from_number(f64::NAN), Err(DriftError::InvalidInput(_))));
        assert!(matches!(year_from_number(1e9), Err(DriftError::InvalidInput(_))));
    }

    #[test]
    fn test_coerce_year_truncates() {
        assert_eq!(coerce_year(2030.9), Ok(2030));
        assert_eq!(coerce_year(-44.7), Ok(-44));
        assert!(coerce_year(f64::INFINITY).is_err());
    }
}
