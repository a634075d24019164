//! Stage 3: expand `[[RENDER:<TAG>]]` markers into visual blocks

use crate::utils::html::escape_text;
use crate::visuals::{VisualCatalog, VisualContext, VisualTag, VisualTagId};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

static RENDER_MARKER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\[\[RENDER:(.*?)\]\]").ok());

const BLOCK_TEMPLATE_SOURCE: &str = include_str!("templates/visual_block.html.mustache");

static BLOCK_TEMPLATE: Lazy<Result<mustache::Template, String>> =
    Lazy::new(|| mustache::compile_str(BLOCK_TEMPLATE_SOURCE).map_err(|e| e.to_string()));

#[derive(Debug, Error)]
pub enum BlockRenderError {
    #[error("Visual block template failed to compile: {0}")]
    Compile(String),

    #[error("Visual block template failed to render: {0}")]
    Render(#[from] mustache::Error),
}

/// Everything the host needs to embed one visual module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualBlock {
    pub id: VisualTagId,
    pub display_id: String,
    pub caption: String,
    pub significance: String,
    pub preferred_height: String,
    pub embed_url: String,
}

impl VisualBlock {
    pub fn new(tag: &VisualTag, context: &VisualContext) -> Self {
        Self {
            id: tag.id,
            display_id: tag.display_id.clone(),
            caption: tag.caption.clone(),
            significance: tag.significance.clone(),
            preferred_height: tag.preferred_height.clone(),
            embed_url: tag.embed_url(context),
        }
    }

    pub fn to_html(&self) -> Result<String, BlockRenderError> {
        let template = BLOCK_TEMPLATE
            .as_ref()
            .map_err(|e| BlockRenderError::Compile(e.clone()))?;
        let html = template.render_to_string(&BlockView {
            display_id: &self.display_id,
            preferred_height: &self.preferred_height,
            embed_url: &self.embed_url,
            caption: &self.caption,
            significance: &self.significance,
        })?;
        Ok(html)
    }
}

#[derive(Serialize)]
struct BlockView<'a> {
    display_id: &'a str,
    preferred_height: &'a str,
    embed_url: &'a str,
    caption: &'a str,
    significance: &'a str,
}

/// Inline marker for a visual that could not be rendered
pub fn failure_marker(name: &str) -> String {
    format!(
        "<p class=\"visual-error\" style=\"color:red\">[System: Rendering {} failed - Module not found]</p>",
        escape_text(name)
    )
}

/// Replace every render marker in `html`
///
/// Returns the rewritten html and the blocks that were rendered, in
/// document order.
pub fn expand_tags(html: &str, catalog: &VisualCatalog, context: &VisualContext) -> (String, Vec<VisualBlock>) {
    let Some(marker) = RENDER_MARKER.as_ref() else {
        return (html.to_string(), Vec::new());
    };

    let mut blocks = Vec::new();
    let expanded = marker.replace_all(html, |caps: &Captures| {
        let name = caps[1].trim();
        let tag = match catalog.resolve(name) {
            Ok(tag) => tag,
            Err(e) => {
                log::warn!("{}", e);
                return failure_marker(name);
            }
        };

        let block = VisualBlock::new(tag, context);
        match block.to_html() {
            Ok(rendered) => {
                blocks.push(block);
                rendered
            }
            Err(e) => {
                log::error!("Visual block template failed for {}: {}", name, e);
                failure_marker(name)
            }
        }
    });

    (expanded.into_owned(), blocks)
}
