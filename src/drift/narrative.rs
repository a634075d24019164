//! Human-readable text for the birthday time machine

use super::DriftResult;
use serde::{Deserialize, Serialize};

/// Extra remark appended to the drift explanation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DriftNote {
    /// Solar and lunar cycles line up within a couple of days
    CosmicSync,
    /// A leap month was inserted since the previous year
    LeapMonthReset,
    None,
}

impl DriftNote {
    /// Pick the note for a result. Cosmic sync takes precedence.
    pub fn for_result(result: &DriftResult) -> Self {
        if result.cosmic_sync {
            DriftNote::CosmicSync
        } else if result.leap_month_just_added {
            DriftNote::LeapMonthReset
        } else {
            DriftNote::None
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            DriftNote::CosmicSync => {
                " ✨ <strong>COSMIC SYNC!</strong> In this year, the solar and lunar cycles align perfectly."
            }
            DriftNote::LeapMonthReset => {
                " 🚀 <strong>ADHIKA MASA RESET!</strong> A leap month was added recently to stop your birthday from drifting out of its season."
            }
            DriftNote::None => "",
        }
    }
}

/// Explanation sentence shown under the sync meter (HTML fragment)
pub fn explain(result: &DriftResult) -> String {
    format!(
        "<strong>Year {}:</strong> Your Panchanga birthday falls approximately <strong>{} days {}</strong> than your Gregorian birthday. Since the Moon travels faster than our seasonal calendar, it creates this rhythmic drift.{}",
        result.target_year,
        result.drift_magnitude_days,
        result.direction.as_str(),
        DriftNote::for_result(result).text()
    )
}

/// CSS `left` value for the sync meter pointer
pub fn sync_pointer_left(result: &DriftResult) -> String {
    format!("{}%", result.sync_percentage)
}
