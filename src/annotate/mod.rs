//! Insight text annotation pipeline
//!
//! Turns the raw insight text into the HTML fragment shown on the insights
//! page. The stages always run in this order:
//!
//! 1. [`markup`]: headings, bullets, bold and line breaks
//! 2. [`terms`]: glossary terms become tooltip spans
//! 3. [`tags`]: `[[RENDER:<TAG>]]` markers become embedded visual blocks
//!
//! None of the stages can fail the whole render. Bad markup falls back to
//! line breaks only, and unknown visual tags leave an inline error marker.

pub mod markup;
pub mod tags;
pub mod terms;

pub use markup::MarkupError;
pub use tags::VisualBlock;

use crate::glossary::Glossary;
use crate::visuals::{VisualCatalog, VisualContext, VisualTagId};
use serde::{Deserialize, Serialize};

/// Result of annotating one insight text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedOutput {
    pub html: String,
    /// Visual tags that were rendered, in document order
    pub resolved_tags: Vec<VisualTagId>,
    pub blocks: Vec<VisualBlock>,
}

/// Reusable annotation settings for one page
#[derive(Debug, Clone, Copy)]
pub struct Annotator<'a> {
    glossary: &'a Glossary,
    catalog: &'a VisualCatalog,
    context: &'a VisualContext,
}

impl<'a> Annotator<'a> {
    pub fn new(glossary: &'a Glossary, catalog: &'a VisualCatalog, context: &'a VisualContext) -> Self {
        Self {
            glossary,
            catalog,
            context,
        }
    }

    pub fn annotate(&self, source: &str) -> AnnotatedOutput {
        let html = markup::render(source);
        let html = terms::annotate_terms(&html, self.glossary);
        let (html, blocks) = tags::expand_tags(&html, self.catalog, self.context);

        let resolved_tags = blocks.iter().map(|b| b.id).collect();
        AnnotatedOutput {
            html,
            resolved_tags,
            blocks,
        }
    }
}

/// Annotate `source` with the given tables
pub fn annotate(
    source: &str,
    glossary: &Glossary,
    catalog: &VisualCatalog,
    context: &VisualContext,
) -> AnnotatedOutput {
    Annotator::new(glossary, catalog, context).annotate(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glossary::GlossaryEntry;

    #[test]
    fn test_stages_compose() {
        let glossary = Glossary::panchanga();
        let catalog = VisualCatalog::standard();
        let context = VisualContext::new().with("tithi", "Ekadashi");

        let out = annotate(
            "## The Tithi\nEach **tithi** matters.\n[[RENDER:MOON_PHASE_3D]]",
            &glossary,
            &catalog,
            &context,
        );

        assert!(out.html.contains("🛰️ The <span class=\"reactive-term\""));
        assert!(out.html.contains("<strong style=\"color:var(--secondary);\"><span class=\"reactive-term\""));
        assert_eq!(out.resolved_tags, vec![VisualTagId::MoonPhase3d]);
        assert_eq!(out.blocks[0].embed_url, "/visuals/moon-phase?tithi=Ekadashi");
    }

    #[test]
    fn test_glossary_text_never_touches_blocks() {
        // "significance" text of the block mentions Tithi; it must stay plain
        let glossary: Glossary = [GlossaryEntry::new("tithi", "lunar day", None)].into_iter().collect();
        let out = annotate(
            "[[RENDER:MOON_PHASE_3D]]",
            &glossary,
            &VisualCatalog::standard(),
            &VisualContext::new(),
        );
        assert!(!out.html.contains("reactive-term"));
    }

    #[test]
    fn test_empty_input() {
        let out = annotate("", &Glossary::panchanga(), &VisualCatalog::standard(), &VisualContext::new());
        assert_eq!(out, AnnotatedOutput::default());
    }
}
