//! Visual modules embeddable in insight text
//!
//! A `[[RENDER:<TAG>]]` marker in insight text refers to one of the
//! interactive visual modules served by the backend. [`VisualTagId`] is the
//! closed set of tags the pages know about; [`VisualCatalog`] holds the
//! descriptors for the ones that can actually be embedded.

pub mod highlight;

pub use highlight::{HighlightCommand, HighlightMessage};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors resolving a visual tag reference
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisualTagError {
    #[error("Unknown visual tag: {0}")]
    Unknown(String),

    #[error("Visual tag {0} has no embeddable module")]
    NotInCatalog(VisualTagId),
}

/// Every visual tag referenced by glossaries or insight text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisualTagId {
    ZodiacComparison,
    #[serde(rename = "MOON_PHASE_3D")]
    MoonPhase3d,
    PrecessionWobble,
    ConstellationMap,
    SamvatsaraResonance,
    CalendarDrift,
    VigeselOdoometer,
    #[serde(rename = "GEAR_INTERLOCK_52YR")]
    GearInterlock52yr,
    VenusMarsAlignment,
}

impl VisualTagId {
    pub const ALL: [VisualTagId; 9] = [
        VisualTagId::ZodiacComparison,
        VisualTagId::MoonPhase3d,
        VisualTagId::PrecessionWobble,
        VisualTagId::ConstellationMap,
        VisualTagId::SamvatsaraResonance,
        VisualTagId::CalendarDrift,
        VisualTagId::VigeselOdoometer,
        VisualTagId::GearInterlock52yr,
        VisualTagId::VenusMarsAlignment,
    ];

    /// Marker name as it appears in text
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualTagId::ZodiacComparison => "ZODIAC_COMPARISON",
            VisualTagId::MoonPhase3d => "MOON_PHASE_3D",
            VisualTagId::PrecessionWobble => "PRECESSION_WOBBLE",
            VisualTagId::ConstellationMap => "CONSTELLATION_MAP",
            VisualTagId::SamvatsaraResonance => "SAMVATSARA_RESONANCE",
            VisualTagId::CalendarDrift => "CALENDAR_DRIFT",
            VisualTagId::VigeselOdoometer => "VIGESEL_ODOOMETER",
            VisualTagId::GearInterlock52yr => "GEAR_INTERLOCK_52YR",
            VisualTagId::VenusMarsAlignment => "VENUS_MARS_ALIGNMENT",
        }
    }

    /// Page element a glossary click scrolls to
    pub fn highlight_anchor(&self) -> &'static str {
        match self {
            VisualTagId::ZodiacComparison => "visual-zodiac",
            VisualTagId::MoonPhase3d => "visual-moon",
            VisualTagId::PrecessionWobble => "visual-precession",
            VisualTagId::ConstellationMap => "visual-constellations",
            VisualTagId::SamvatsaraResonance => "visual-samvatsara",
            VisualTagId::CalendarDrift => "time-machine-section",
            VisualTagId::VigeselOdoometer => "visual-mayan-gears",
            VisualTagId::GearInterlock52yr => "visual-calendar-round",
            VisualTagId::VenusMarsAlignment => "visual-venus-cycle",
        }
    }
}

impl fmt::Display for VisualTagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualTagId {
    type Err = VisualTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == name)
            .ok_or_else(|| VisualTagError::Unknown(name.to_string()))
    }
}

/// Descriptor of one embeddable visual module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualTag {
    pub id: VisualTagId,
    /// Element id of the rendered block
    pub display_id: String,
    pub endpoint_path: String,
    /// CSS height of the frame, e.g. "520px"
    pub preferred_height: String,
    pub caption: String,
    pub significance: String,
}

impl VisualTag {
    fn new(
        id: VisualTagId,
        display_id: &str,
        endpoint_path: &str,
        preferred_height: &str,
        caption: &str,
        significance: &str,
    ) -> Self {
        Self {
            id,
            display_id: display_id.to_string(),
            endpoint_path: endpoint_path.to_string(),
            preferred_height: preferred_height.to_string(),
            caption: caption.to_string(),
            significance: significance.to_string(),
        }
    }

    /// Frame URL: endpoint plus the URL-encoded context as query string
    pub fn embed_url(&self, context: &VisualContext) -> String {
        if context.is_empty() {
            self.endpoint_path.clone()
        } else {
            format!("{}?{}", self.endpoint_path, context.to_query_string())
        }
    }
}

/// Table of embeddable visual modules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualCatalog {
    tags: BTreeMap<VisualTagId, VisualTag>,
}

impl VisualCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The modules served under `/visuals/*`
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.insert(VisualTag::new(
            VisualTagId::ZodiacComparison,
            "visual-zodiac",
            "/visuals/zodiac-comparison",
            "800px",
            "Interactive Zodiac Aligner",
            "This simulation shows the \"Great Drift\" between Modern and Hindu astronomy.",
        ));
        catalog.insert(VisualTag::new(
            VisualTagId::MoonPhase3d,
            "visual-moon",
            "/visuals/moon-phase",
            "520px",
            "Tithi Phase Protractor",
            "A Tithi (Lunar Day) is not a 24-hour clock. It is a geometric measurement of the angle between the Sun and Moon. Every 12° of separation creates one Tithi. This protractor shows how the phases we see from Earth are actually results of this specific celestial angle.",
        ));
        catalog.insert(VisualTag::new(
            VisualTagId::PrecessionWobble,
            "visual-precession",
            "/visuals/precession",
            "520px",
            "The Earth's Great Wobble",
            "Imagine Earth as a spinning top that is starting to tilt. This \"Precession\" takes 25,800 years for one full circle. This wobble is the reason the Zodiac Aligner (above) needs a shift—the \"beginning\" of the stars has moved relative to our seasons!",
        ));
        catalog.insert(VisualTag::new(
            VisualTagId::ConstellationMap,
            "visual-constellations",
            "/visuals/constellations",
            "520px",
            "Sky Focus: Lunar Tracking",
            "Interactive 3D Zodiac belt with symbols and names. Moon is shown in the foreground with slow orbital motion and simulated phases. Use mouse to rotate and zoom the view.",
        ));
        catalog.insert(VisualTag::new(
            VisualTagId::SamvatsaraResonance,
            "visual-samvatsara",
            "/visuals/samvatsara",
            "520px",
            "Jovian-Saturn Samvatsara Resonance",
            "This visual shows why the Samvatsara cycle is 60 years. It tracks the resonance between Jupiter (~11.86y) and Saturn (~29.46y). Broadly, every 5 Jupiter orbits align with 2 Saturn orbits, creating a rhythmic \"Great Conjunction\" that resets the traditional calendar cycle.",
        ));
        catalog
    }

    /// Add or replace the descriptor for `tag.id`
    pub fn insert(&mut self, tag: VisualTag) -> Option<VisualTag> {
        self.tags.insert(tag.id, tag)
    }

    pub fn get(&self, id: VisualTagId) -> Option<&VisualTag> {
        self.tags.get(&id)
    }

    /// Resolve a marker name to a descriptor
    pub fn resolve(&self, name: &str) -> Result<&VisualTag, VisualTagError> {
        let id: VisualTagId = name.parse()?;
        self.get(id).ok_or(VisualTagError::NotInCatalog(id))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Query parameters handed to every embedded visual module
///
/// Pairs keep their insertion order; setting an existing key overwrites it
/// in place. On the wire it is a plain `{ key: value }` object, read in the
/// caller's key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualContext {
    params: Vec<(String, String)>,
}

impl VisualContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl FromIterator<VisualTag> for VisualCatalog {
    fn from_iter<I: IntoIterator<Item = VisualTag>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for tag in iter {
            catalog.insert(tag);
        }
        catalog
    }
}

impl Serialize for VisualContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.params.len()))?;
        for (k, v) in &self.params {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VisualContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(VisualContextVisitor)
    }
}

struct VisualContextVisitor;

impl<'de> Visitor<'de> for VisualContextVisitor {
    type Value = VisualContext;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of string query parameters")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut context = VisualContext::new();
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            context.set(key, value);
        }
        Ok(context)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VisualContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (k, v) in iter {
            context.set(k, v);
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_round_trip() {
        for tag in VisualTagId::ALL {
            assert_eq!(tag.as_str().parse::<VisualTagId>(), Ok(tag));
        }
        assert_eq!(" MOON_PHASE_3D ".parse::<VisualTagId>(), Ok(VisualTagId::MoonPhase3d));
        assert_eq!(
            "UNKNOWN_X".parse::<VisualTagId>(),
            Err(VisualTagError::Unknown("UNKNOWN_X".to_string()))
        );
    }

    #[test]
    fn test_serde_names_match_marker_names() {
        for tag in VisualTagId::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
        }
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = VisualCatalog::standard();
        assert_eq!(catalog.len(), 5);

        let moon = catalog.resolve("MOON_PHASE_3D").unwrap();
        assert_eq!(moon.caption, "Tithi Phase Protractor");
        assert_eq!(moon.display_id, "visual-moon");

        assert_eq!(
            catalog.resolve("CALENDAR_DRIFT"),
            Err(VisualTagError::NotInCatalog(VisualTagId::CalendarDrift))
        );
    }

    #[test]
    fn test_embed_url_encodes_context() {
        let catalog = VisualCatalog::standard();
        let context = VisualContext::new()
            .with("samvatsara", "Vishvavasu")
            .with("tithi", "Shukla Paksha Pratipada")
            .with("rashi", "Leo");
        let url = catalog.get(VisualTagId::MoonPhase3d).unwrap().embed_url(&context);
        assert_eq!(
            url,
            "/visuals/moon-phase?samvatsara=Vishvavasu&tithi=Shukla%20Paksha%20Pratipada&rashi=Leo"
        );
    }

    #[test]
    fn test_embed_url_without_context() {
        let catalog = VisualCatalog::standard();
        let url = catalog.get(VisualTagId::PrecessionWobble).unwrap().embed_url(&VisualContext::new());
        assert_eq!(url, "/visuals/precession");
    }

    #[test]
    fn test_context_keeps_caller_key_order() {
        let context: VisualContext =
            serde_json::from_str(r#"{ "tithi": "Purnima", "samvatsara": "Vishvavasu" }"#).unwrap();
        assert_eq!(context.to_query_string(), "tithi=Purnima&samvatsara=Vishvavasu");
        assert_eq!(
            serde_json::to_string(&context).unwrap(),
            r#"{"tithi":"Purnima","samvatsara":"Vishvavasu"}"#
        );
        assert!(serde_json::from_str::<VisualContext>(r#"{ "tithi": 3 }"#).is_err());
    }

    #[test]
    fn test_context_set_overwrites_in_place() {
        let mut context = VisualContext::new().with("a", "1").with("b", "2");
        context.set("a", "3");
        assert_eq!(context.to_query_string(), "a=3&b=2");
    }
}
