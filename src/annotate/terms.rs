//! Stage 2: wrap glossary terms in reactive tooltip spans
//!
//! All terms are matched against the same stage-1 text in one pass, so a
//! definition inserted for one term is never scanned for another. Text
//! inside HTML tags and inside `[[...]]` markers is left alone. When two
//! matches overlap the leftmost wins, then the longest, which keeps
//! "adhik masa" intact instead of annotating the "masa" inside it.

use crate::glossary::{Glossary, GlossaryEntry};
use crate::utils::html::escape_attr;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Regions that must not be annotated: tags and render markers
///
/// A tag needs a name (or `!`) right after the `<`, so a bare comparison
/// such as `tithi < 30` stays ordinary text.
static PROTECTED: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"</?[A-Za-z!][^>]*>|\[\[.*?\]\]").ok());

const VISUAL_HINT: &str = " <br><i>(Click to see 3D visual)</i>";

#[derive(Debug, Clone, PartialEq, Eq)]
struct TermMatch {
    range: Range<usize>,
    entry: usize,
}

/// Annotate every glossary term in `html`
pub fn annotate_terms(html: &str, glossary: &Glossary) -> String {
    if glossary.is_empty() {
        return html.to_string();
    }

    let matchers: Vec<(usize, Regex)> = glossary
        .entries()
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| term_regex(&entry.term).map(|re| (i, re)))
        .collect();

    let mut candidates = Vec::new();
    for run in text_runs(html) {
        let segment = &html[run.clone()];
        for (entry, regex) in &matchers {
            for m in regex.find_iter(segment) {
                candidates.push(TermMatch {
                    range: (run.start + m.start())..(run.start + m.end()),
                    entry: *entry,
                });
            }
        }
    }

    let selected = select_non_overlapping(candidates);
    log::debug!("Glossary pass: {} term occurrences annotated", selected.len());

    let mut out = String::with_capacity(html.len() + selected.len() * 128);
    let mut cursor = 0;
    for m in selected {
        out.push_str(&html[cursor..m.range.start]);
        out.push_str(&term_span(&html[m.range.clone()], &glossary.entries()[m.entry]));
        cursor = m.range.end;
    }
    out.push_str(&html[cursor..]);
    out
}

fn term_regex(term: &str) -> Option<Regex> {
    let pattern = format!(r"\b{}\b", regex::escape(term.trim()));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Skipping glossary term '{}': {}", term, e);
            None
        }
    }
}

/// Byte ranges of `html` that lie outside protected regions
fn text_runs(html: &str) -> Vec<Range<usize>> {
    let Some(protected) = PROTECTED.as_ref() else {
        return vec![0..html.len()];
    };

    let mut runs = Vec::new();
    let mut cursor = 0;
    for m in protected.find_iter(html) {
        if m.start() > cursor {
            runs.push(cursor..m.start());
        }
        cursor = m.end();
    }
    if cursor < html.len() {
        runs.push(cursor..html.len());
    }
    runs
}

/// Leftmost-longest selection of non-overlapping matches
fn select_non_overlapping(mut candidates: Vec<TermMatch>) -> Vec<TermMatch> {
    candidates.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });

    let mut selected: Vec<TermMatch> = Vec::new();
    for candidate in candidates {
        let overlaps = selected
            .last()
            .map(|last| candidate.range.start < last.range.end)
            .unwrap_or(false);
        if !overlaps {
            selected.push(candidate);
        }
    }
    selected
}

fn term_span(matched: &str, entry: &GlossaryEntry) -> String {
    let onclick = entry
        .visual_ref
        .map(|tag| format!(" onclick=\"triggerVisualHighlight('{}')\"", tag))
        .unwrap_or_default();
    let hint = if entry.visual_ref.is_some() { VISUAL_HINT } else { "" };

    format!(
        "<span class=\"reactive-term\" data-term=\"{}\"{}>{}<span class=\"tooltip-bubble\">{}{}</span></span>",
        escape_attr(&entry.term),
        onclick,
        matched,
        entry.definition,
        hint
    )
}
