//! Glossary tables for reactive term annotation
//!
//! Terms are matched case-insensitively, so keys are unique ignoring case:
//! inserting "Tithi" after "tithi" replaces the earlier entry.

use crate::visuals::VisualTagId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calendar system whose insight page is being rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calendar {
    #[default]
    Panchanga,
    Mayan,
}

impl Calendar {
    /// Parse the trailing path segment of the page URL
    ///
    /// Anything unrecognised falls back to Panchanga.
    pub fn from_path_segment(segment: &str) -> Self {
        match segment.trim().to_ascii_lowercase().as_str() {
            "mayan" => Calendar::Mayan,
            _ => Calendar::Panchanga,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Calendar::Panchanga => "panchanga",
            Calendar::Mayan => "mayan",
        }
    }
}

/// One glossary term and what it links to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
    pub visual_ref: Option<VisualTagId>,
}

impl GlossaryEntry {
    pub fn new(term: impl Into<String>, definition: impl Into<String>, visual_ref: Option<VisualTagId>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            visual_ref,
        }
    }
}

/// Table shape used by the pages: `{ "<term>": { "def": ..., "target": ... } }`
#[derive(Debug, Clone, Deserialize)]
pub struct RawDefinition {
    pub def: String,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, RawDefinition>")]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in glossary for a calendar's insight page
    pub fn for_calendar(calendar: Calendar) -> Self {
        match calendar {
            Calendar::Panchanga => Self::panchanga(),
            Calendar::Mayan => Self::new(),
        }
    }

    pub fn panchanga() -> Self {
        use VisualTagId::*;

        [
            ("epoch", "A fixed point in time used as a reference point.", None),
            ("jovian", "Relating to Jupiter. The 60-year Samvatsara cycle follows Jupiter's path.", Some(SamvatsaraResonance)),
            ("precession", "The slow conical wobble of Earth's axis (25,800 year cycle).", Some(PrecessionWobble)),
            ("sidereal", "Measured relative to fixed stars (Hindu system).", Some(ZodiacComparison)),
            ("ayanamsha", "The angular drift (24°) between seasons and stars.", Some(ZodiacComparison)),
            ("tithi", "A lunar day, defined by every 12° of Sun-Moon separation.", Some(MoonPhase3d)),
            ("nakshatra", "Star clusters the moon visits daily.", Some(ConstellationMap)),
            ("masa", "A month in the Hindu calendar. It can be Solar (Saura) or Lunar (Chandra).", None),
            ("saura mana", "Solar Month system. Defined by the Sun's entry into a new Zodiac sign.", Some(ZodiacComparison)),
            ("chandra mana", "Luni-Solar Month system. Defined by the Moon's phase cycle.", Some(MoonPhase3d)),
            ("adhik masa", "The 'Extra Month' (Pit Stop) added every ~3 years to let the Sun catch up.", Some(CalendarDrift)),
        ]
        .into_iter()
        .map(|(term, def, target)| GlossaryEntry::new(term, def, target))
        .collect()
    }

    /// Add an entry, replacing any entry whose term matches ignoring case
    ///
    /// Entries with blank terms are ignored.
    pub fn insert(&mut self, entry: GlossaryEntry) {
        if entry.term.trim().is_empty() {
            log::warn!("Ignoring glossary entry with empty term");
            return;
        }
        let key = entry.term.to_lowercase();
        match self.entries.iter_mut().find(|e| e.term.to_lowercase() == key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, term: &str) -> Option<&GlossaryEntry> {
        let key = term.to_lowercase();
        self.entries.iter().find(|e| e.term.to_lowercase() == key)
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<GlossaryEntry> for Glossary {
    fn from_iter<I: IntoIterator<Item = GlossaryEntry>>(iter: I) -> Self {
        let mut glossary = Self::new();
        for entry in iter {
            glossary.insert(entry);
        }
        glossary
    }
}

impl From<BTreeMap<String, RawDefinition>> for Glossary {
    fn from(table: BTreeMap<String, RawDefinition>) -> Self {
        table
            .into_iter()
            .map(|(term, raw)| {
                let visual_ref = raw.target.as_deref().and_then(|name| match name.parse() {
                    Ok(tag) => Some(tag),
                    Err(e) => {
                        log::warn!("Glossary term '{}': {}", term, e);
                        None
                    }
                });
                GlossaryEntry::new(term, raw.def, visual_ref)
            })
            .collect()
    }
}
