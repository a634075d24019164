//! Stage 1: lightweight markup → display HTML
//!
//! Handles the handful of constructs the insight writer produces:
//! `#`/`##`/`###` headings, `-`/`*` bullets, `**bold**` and line breaks.
//! If the rules cannot be applied the text still comes through, with only
//! the line breaks converted.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Inputs above this size skip the rule pass and use the plain fallback
pub const MAX_MARKUP_INPUT: usize = 1 << 20;

#[derive(Debug, Clone, Error)]
pub enum MarkupError {
    #[error("Markup rule failed to compile: {0}")]
    Rule(#[from] regex::Error),

    #[error("Input too large for markup rules: {0} bytes")]
    InputTooLarge(usize),
}

struct MarkupRules {
    rules: Vec<(Regex, &'static str)>,
}

impl MarkupRules {
    fn compile() -> Result<Self, regex::Error> {
        let table: [(&str, &'static str); 5] = [
            (
                r"(?mR)^# (.*)$",
                r#"<h1 style="color:var(--secondary);border-bottom:2px solid var(--secondary);padding-bottom:10px;margin-bottom:20px;">🚀 ${1}</h1>"#,
            ),
            (
                r"(?mR)^## (.*)$",
                r#"<h2 style="color:var(--secondary);margin-top:30px;">🛰️ ${1}</h2>"#,
            ),
            (
                r"(?mR)^### (.*)$",
                r#"<h3 style="color:var(--secondary);margin-top:20px;">🔬 ${1}</h3>"#,
            ),
            (
                r"(?mR)^[ \t]*[-*] (.*)$",
                r#"<li style="margin-left:20px;list-style:none;">✨ ${1}</li>"#,
            ),
            (
                r"\*\*(.*?)\*\*",
                r#"<strong style="color:var(--secondary);">${1}</strong>"#,
            ),
        ];

        let rules = table
            .iter()
            .map(|(pattern, template)| Ok((Regex::new(pattern)?, *template)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }
}

static RULES: Lazy<Result<MarkupRules, regex::Error>> = Lazy::new(MarkupRules::compile);

/// Apply the full rule set
pub fn try_render(text: &str) -> Result<String, MarkupError> {
    if text.len() > MAX_MARKUP_INPUT {
        return Err(MarkupError::InputTooLarge(text.len()));
    }
    let rules = RULES.as_ref().map_err(Clone::clone)?;

    let mut html = text.to_string();
    for (regex, template) in &rules.rules {
        html = regex.replace_all(&html, *template).into_owned();
    }
    Ok(line_breaks(&html))
}

/// Convert line breaks only
pub fn line_breaks(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// Apply the rule set, falling back to [`line_breaks`] on failure
pub fn render(text: &str) -> String {
    match try_render(text) {
        Ok(html) => html,
        Err(e) => {
            log::warn!("Markup transform failed, using line-break fallback: {}", e);
            line_breaks(text)
        }
    }
}
