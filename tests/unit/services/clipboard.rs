use super::*;

#[test]
fn sanitize_normalizes_line_endings() {
    assert_eq!(sanitize_paste("a\r\nb\rc\n"), "a\nb\nc\n");
}

#[test]
fn sanitize_drops_control_chars_but_keeps_tabs() {
    assert_eq!(sanitize_paste("a\u{1b}[31mb\tc\u{0}"), "a[31mb\tc");
}

#[test]
fn failed_read_inserts_nothing() {
    assert_eq!(paste_text(Err(ClipboardError::NotAvailable), 100), "");
    assert_eq!(
        paste_text(Err(ClipboardError::GetFailed("denied".into())), 100),
        ""
    );
}

#[test]
fn oversized_paste_inserts_nothing() {
    assert_eq!(paste_text(Ok("x".repeat(11)), 10), "");
    assert_eq!(paste_text(Ok("x".repeat(10)), 10), "x".repeat(10));
}

#[test]
fn error_display() {
    assert_eq!(
        ClipboardError::TooLarge(42).to_string(),
        "pasted text too large (42 bytes)"
    );
}
