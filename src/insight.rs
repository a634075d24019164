//! Calculation context carried onto the insights page
//!
//! Only the fields the page reads are modelled; anything else in the
//! calculation payload is ignored on deserialisation.

use crate::glossary::Calendar;
use crate::visuals::VisualContext;
use serde::{Deserialize, Serialize};

/// Rashi assumed when the calculation did not provide one
pub const DEFAULT_RASHI: &str = "Leo";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rashi {
    #[serde(default)]
    pub name: Option<String>,
}

/// Mayan cycle values carry a preformatted string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedCycle {
    #[serde(default)]
    pub formatted: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightContext {
    #[serde(default)]
    pub samvatsara: Option<String>,
    #[serde(default)]
    pub masa: Option<String>,
    #[serde(default)]
    pub tithi: Option<String>,
    #[serde(default)]
    pub nakshatra: Option<String>,
    #[serde(default)]
    pub rashi: Option<Rashi>,
    #[serde(default)]
    pub long_count: Option<FormattedCycle>,
    #[serde(default)]
    pub tzolkin: Option<FormattedCycle>,
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

impl InsightContext {
    /// Parse the JSON blob the calculation page stores
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn rashi_name(&self) -> Option<&str> {
        self.rashi.as_ref().and_then(|r| r.name.as_deref())
    }

    /// Headline describing the configuration being explained
    pub fn config_title(&self, calendar: Calendar) -> String {
        match calendar {
            Calendar::Panchanga => format!(
                "{} {} | {}",
                or_empty(&self.masa),
                or_empty(&self.samvatsara),
                or_empty(&self.tithi)
            ),
            Calendar::Mayan => {
                let long_count = self.long_count.as_ref().and_then(|c| c.formatted.as_deref());
                let tzolkin = self.tzolkin.as_ref().and_then(|c| c.formatted.as_deref());
                format!("{} | {}", long_count.unwrap_or(""), tzolkin.unwrap_or(""))
            }
        }
    }

    /// Query parameters handed to embedded visual modules
    pub fn visual_context(&self) -> VisualContext {
        VisualContext::new()
            .with("samvatsara", or_empty(&self.samvatsara))
            .with("tithi", or_empty(&self.tithi))
            .with("rashi", self.rashi_name().unwrap_or(DEFAULT_RASHI))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANCHANGA_JSON: &str = r#"{
        "samvatsara": "Vishvavasu",
        "masa": "Chaitra",
        "tithi": "Shukla Navami",
        "nakshatra": "Pushya",
        "rashi": { "name": "Cancer", "index": 3 },
        "sunrise": "06:12"
    }"#;

    #[test]
    fn test_panchanga_title_and_context() {
        let ctx = InsightContext::from_json(PANCHANGA_JSON).unwrap();
        assert_eq!(ctx.config_title(Calendar::Panchanga), "Chaitra Vishvavasu | Shukla Navami");
        assert_eq!(
            ctx.visual_context().to_query_string(),
            "samvatsara=Vishvavasu&tithi=Shukla%20Navami&rashi=Cancer"
        );
    }

    #[test]
    fn test_mayan_title() {
        let ctx = InsightContext::from_json(
            r#"{ "long_count": { "formatted": "13.0.12.8.3" }, "tzolkin": { "formatted": "4 Ak'b'al" } }"#,
        )
        .unwrap();
        assert_eq!(ctx.config_title(Calendar::Mayan), "13.0.12.8.3 | 4 Ak'b'al");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let ctx = InsightContext::default();
        assert_eq!(ctx.visual_context().to_query_string(), "samvatsara=&tithi=&rashi=Leo");
        assert_eq!(ctx.config_title(Calendar::Panchanga), "  | ");
    }
}
