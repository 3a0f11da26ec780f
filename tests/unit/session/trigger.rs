use super::*;

#[test]
fn trigger_with_search() {
    assert_eq!(
        detect_trigger("hello @ga"),
        Some(MentionTrigger {
            trigger: '@',
            search: "ga".to_string(),
            start_offset: 6,
        })
    );
}

#[test]
fn bare_trigger_opens_empty_search() {
    let trigger = detect_trigger("#").unwrap();
    assert_eq!(trigger.trigger, '#');
    assert_eq!(trigger.search, "");
    assert_eq!(trigger.start_offset, 0);
}

#[test]
fn whitespace_closes_search() {
    assert_eq!(detect_trigger("@ga "), None);
    assert_eq!(detect_trigger("@ga\n"), None);
    assert_eq!(detect_trigger("no trigger"), None);
    assert_eq!(detect_trigger(""), None);
}

#[test]
fn nearest_trigger_wins() {
    let trigger = detect_trigger("@foo#bar").unwrap();
    assert_eq!(trigger.trigger, '#');
    assert_eq!(trigger.search, "bar");
    assert_eq!(trigger.start_offset, 4);
}

#[test]
fn start_offset_counts_chars() {
    let trigger = detect_trigger("日本 @té").unwrap();
    assert_eq!(trigger.start_offset, 3);
    assert_eq!(trigger.search, "té");
}

#[test]
fn event_token_in_progress_is_not_a_search() {
    assert_eq!(detect_trigger("@event:"), None);
    assert_eq!(detect_trigger("@EVENT:507f"), None);
    assert_eq!(detect_trigger("@event:507f1f77bcf86cd799439011"), None);
}

#[test]
fn other_event_prefixes_still_search() {
    assert!(detect_trigger("@even").is_some());
    assert!(detect_trigger("@event:xyz").is_some());
    assert!(detect_trigger("#event:507f").is_some());
    assert!(detect_trigger("@event:507f1f77bcf86cd7994390111").is_some());
}
