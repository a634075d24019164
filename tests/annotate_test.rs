// Test the insight annotation pipeline end to end

use celestial_insights_wasm::annotate::terms::annotate_terms;
use celestial_insights_wasm::{
    annotate, Calendar, Glossary, GlossaryEntry, InsightContext, VisualCatalog, VisualContext, VisualTagId,
};

fn tithi_glossary() -> Glossary {
    [GlossaryEntry::new("tithi", "A lunar day.", Some(VisualTagId::MoonPhase3d))]
        .into_iter()
        .collect()
}

#[test]
fn test_single_term_wrapped_once() {
    let out = annotate("A Tithi is a lunar day", &tithi_glossary(), &VisualCatalog::standard(), &VisualContext::new());

    assert_eq!(out.html.matches("class=\"reactive-term\"").count(), 1,
               "exactly one occurrence should be annotated");
    assert!(out.html.starts_with("A <span class=\"reactive-term\""));
    assert!(out.html.contains(">Tithi<span class=\"tooltip-bubble\">A lunar day."),
            "visible text keeps its original case");
    assert!(out.html.contains("triggerVisualHighlight('MOON_PHASE_3D')"));
    assert!(out.html.ends_with(" is a lunar day"));
}

#[test]
fn test_known_render_tag_expands() {
    let out = annotate("[[RENDER:MOON_PHASE_3D]]", &Glossary::new(), &VisualCatalog::standard(), &VisualContext::new());

    assert_eq!(out.resolved_tags, vec![VisualTagId::MoonPhase3d]);
    assert_eq!(out.blocks[0].caption, "Tithi Phase Protractor");
    assert!(out.html.contains("Tithi Phase Protractor"));
}

#[test]
fn test_unknown_render_tag_does_not_abort() {
    let out = annotate(
        "before\n[[RENDER:UNKNOWN_X]]\n[[RENDER:PRECESSION_WOBBLE]]",
        &Glossary::new(),
        &VisualCatalog::standard(),
        &VisualContext::new(),
    );

    assert!(out.html.contains("[System: Rendering UNKNOWN_X failed - Module not found]"));
    assert!(out.html.starts_with("before<br>"));
    assert_eq!(out.resolved_tags, vec![VisualTagId::PrecessionWobble],
               "rendering continues after an unknown tag");
}

#[test]
fn test_overlapping_terms_keep_their_own_boundaries() {
    let glossary = Glossary::panchanga();
    let out = annotate(
        "Chandra mana months need an adhik masa; each masa is lunar.",
        &glossary,
        &VisualCatalog::standard(),
        &VisualContext::new(),
    );

    assert!(out.html.contains("data-term=\"chandra mana\""));
    assert!(out.html.contains(">Chandra mana<span"));
    assert!(out.html.contains(">adhik masa<span"));
    assert_eq!(out.html.matches("data-term=\"masa\"").count(), 1,
               "the masa inside 'adhik masa' is not annotated separately");
}

#[test]
fn test_comparison_in_text_does_not_hide_terms() {
    let out = annotate(
        "If tithi < 30 then nakshatra > 5",
        &Glossary::panchanga(),
        &VisualCatalog::standard(),
        &VisualContext::new(),
    );

    assert_eq!(out.html.matches("class=\"reactive-term\"").count(), 2,
               "terms between '<' and '>' are still annotated");
    assert!(out.html.contains("data-term=\"nakshatra\""));
}

#[test]
fn test_empty_glossary_is_idempotent_on_annotated_output() {
    let first = annotate("A tithi.", &tithi_glossary(), &VisualCatalog::standard(), &VisualContext::new());
    let again = annotate_terms(&first.html, &Glossary::new());
    assert_eq!(again, first.html);
}

#[test]
fn test_malformed_tables_are_inert() {
    let glossary: Glossary = serde_json::from_str(r#"{ "": { "def": "blank" }, "yuga": { "def": "age", "target": 7 } }"#)
        .unwrap_or_default();
    let out = annotate("yuga text", &glossary, &VisualCatalog::new(), &VisualContext::new());
    assert!(glossary.is_empty(), "a table with a malformed target is rejected as a whole");
    assert_eq!(out.html, "yuga text");

    let out = annotate("[[RENDER:MOON_PHASE_3D]]", &Glossary::new(), &VisualCatalog::new(), &VisualContext::new());
    assert!(out.resolved_tags.is_empty());
    assert!(out.html.contains("Rendering MOON_PHASE_3D failed"));
}

#[test]
fn test_insight_page_flow() {
    let context = InsightContext::from_json(r#"{ "samvatsara": "Vishvavasu", "tithi": "Purnima" }"#)
        .expect("context should parse");
    let glossary = Glossary::for_calendar(Calendar::Panchanga);
    let visual_context = context.visual_context();

    let out = annotate(
        "# Your Sky\n- The **Nakshatra** tonight\n[[RENDER:CONSTELLATION_MAP]]",
        &glossary,
        &VisualCatalog::standard(),
        &visual_context,
    );

    assert!(out.html.contains("🚀 Your Sky</h1>"));
    assert!(out.html.contains("triggerVisualHighlight('CONSTELLATION_MAP')"));
    assert_eq!(out.blocks[0].embed_url,
               "/visuals/constellations?samvatsara=Vishvavasu&tithi=Purnima&rashi=Leo");
}

#[test]
fn test_output_serializes_with_camel_case_fields() {
    let out = annotate("[[RENDER:ZODIAC_COMPARISON]]", &Glossary::new(), &VisualCatalog::standard(), &VisualContext::new());
    let json = serde_json::to_value(&out).expect("output should serialize");

    assert_eq!(json["resolvedTags"][0], "ZODIAC_COMPARISON");
    assert_eq!(json["blocks"][0]["displayId"], "visual-zodiac");
    assert_eq!(json["blocks"][0]["preferredHeight"], "800px");
}
