use super::*;
use tempfile::tempdir;

const GALA_ID: &str = "507f1f77bcf86cd799439011";

fn sample() -> MentionDirectory {
    MentionDirectory::from_entries([
        MentionEntry::new(GALA_ID, "Spring Gala"),
        MentionEntry::new("64b7f0c2a1e4d3b2c1a09f8e", "Game Night"),
        MentionEntry::new("aaaaaaaaaaaaaaaaaaaaaaaa", "Bake Sale"),
    ])
}

#[test]
fn token_and_display_text() {
    let entry = MentionEntry::new(GALA_ID, "Spring Gala");
    assert_eq!(entry.token(), format!("@event:{GALA_ID}"));
    assert_eq!(entry.display_text(), "@event:Spring Gala");
}

#[test]
fn lookup_ignores_id_case() {
    let dir = sample();
    assert_eq!(
        dir.get("507F1F77BCF86CD799439011").map(|e| e.label.as_str()),
        Some("Spring Gala")
    );
    assert!(dir.get("000000000000000000000000").is_none());
}

#[test]
fn insert_replaces_same_id() {
    let mut dir = sample();
    let old = dir.insert(MentionEntry::new(GALA_ID.to_uppercase(), "Gala 2"));
    assert_eq!(old.map(|e| e.label), Some("Spring Gala".to_string()));
    assert_eq!(dir.len(), 3);
    assert_eq!(dir.get(GALA_ID).unwrap().label, "Gala 2");
}

#[test]
fn search_filters_labels_in_order() {
    let dir = sample();
    let labels: Vec<String> = dir.search("GA", 10).into_iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["Spring Gala", "Game Night"]);
    assert_eq!(dir.search("", 2).len(), 2);
    assert!(dir.search("zzz", 10).is_empty());
}

#[test]
fn from_json_accepts_backend_field_names() {
    let json = format!(
        r#"[{{"_id": "{GALA_ID}", "name": "Spring Gala", "location": "Quad"}},
            {{"id": "64b7f0c2a1e4d3b2c1a09f8e", "label": "Game Night"}}]"#
    );
    let dir = MentionDirectory::from_json(&json).unwrap();
    assert_eq!(dir.len(), 2);
    let gala = dir.get(GALA_ID).unwrap();
    assert_eq!(gala.label, "Spring Gala");
    assert_eq!(
        gala.metadata.get("location"),
        Some(&serde_json::Value::String("Quad".to_string()))
    );
}

#[test]
fn load_reports_parse_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(
        MentionDirectory::load(&path),
        Err(DirectoryError::Parse(_))
    ));
    assert!(matches!(
        MentionDirectory::load(&dir.path().join("missing.json")),
        Err(DirectoryError::Io(_))
    ));
}

#[test]
fn link_target_uses_base() {
    let entry = MentionEntry::new(GALA_ID, "Spring Gala");
    assert_eq!(
        sample().link_target(&entry),
        Some(format!("/event/{GALA_ID}"))
    );
    let custom = sample().with_link_base("https://club.example/e/");
    assert_eq!(
        custom.link_target(&entry),
        Some(format!("https://club.example/e/{GALA_ID}"))
    );
    assert_eq!(sample().link_target(&MentionEntry::new("", "x")), None);
}

#[test]
fn default_render_builds_chip() {
    let dir = sample();
    let entry = dir.get(GALA_ID).unwrap();
    let chip = dir.render(entry);
    assert_eq!(chip.display_text, "@event:Spring Gala");
    assert_eq!(chip.token, format!("@event:{GALA_ID}"));
    assert_eq!(chip.canonical_len(), 31);
    assert_eq!(chip.display_len(), 18);
}
