use super::*;
use serde_json::json;
use std::io::Write;

fn write_roster(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_personas_from_json_object() {
    let file = write_roster(
        r#"{
            "robert_kiyosaki": {
                "personality": "insightful",
                "expertise": ["finance", "investing"]
            },
            "sanjay_gupta": {
                "communication_style": "informative"
            }
        }"#,
    );

    let roster = PersonaRoster::load(file.path()).unwrap();
    assert_eq!(roster.len(), 2);

    let robert = roster.get("robert_kiyosaki").unwrap();
    assert_eq!(robert.attributes["personality"], json!("insightful"));
    assert_eq!(robert.attributes["expertise"], json!(["finance", "investing"]));
    assert!(roster.get("unknown").is_none());
}

#[test]
fn roster_keeps_file_order() {
    // Deliberately not alphabetical; prompts and output should see the
    // personas in the order the file lists them.
    let file = write_roster(
        r#"{
            "zig_ziglar": {"tone": "motivational"},
            "anthony_bourdain": {"tone": "wry"}
        }"#,
    );

    let roster = PersonaRoster::load(file.path()).unwrap();
    assert_eq!(roster.names(), vec!["zig_ziglar", "anthony_bourdain"]);
}

#[test]
fn attribute_block_keeps_insertion_order() {
    let persona = Persona::new("coach")
        .with_attribute("tone", "motivational")
        .with_attribute("background", "sales");
    assert_eq!(
        persona.attribute_block(),
        r#"{"tone":"motivational","background":"sales"}"#
    );
}

#[test]
fn rejects_non_object_attributes() {
    let file = write_roster(r#"{"broken": "just a string"}"#);
    assert!(PersonaRoster::load(file.path()).is_err());
}

#[test]
fn rejects_empty_roster() {
    let file = write_roster("{}");
    assert!(PersonaRoster::load(file.path()).is_err());
}

#[test]
fn system_prompt_falls_back_when_absent() {
    let plain = Persona::new("plain");
    assert_eq!(plain.system_prompt(), DEFAULT_SYSTEM_PROMPT);

    let custom = Persona::new("custom")
        .with_attribute("system_prompt", "You are impersonating Robert Kiyosaki.");
    assert_eq!(custom.system_prompt(), "You are impersonating Robert Kiyosaki.");
}

#[test]
fn prompts_embed_attribute_block_and_passage() {
    let persona = Persona::new("coach").with_attribute("tone", "motivational");

    let q = question_prompt(&persona, "the passage text");
    assert!(q.contains(r#""tone":"motivational""#));
    assert!(q.contains("the passage text"));

    let a = answer_prompt(&persona, "Why save money?", "the passage text");
    assert!(a.starts_with("Question: Why save money?"));
    assert!(a.contains("Passage: the passage text"));
    assert!(a.contains(r#""tone":"motivational""#));
}
