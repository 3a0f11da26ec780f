use super::*;
use crate::models::MentionEntry;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

const GALA_ID: &str = "507f1f77bcf86cd799439011";

fn directory() -> Arc<MentionDirectory> {
    Arc::new(MentionDirectory::from_entries([
        MentionEntry::new(GALA_ID, "Spring Gala"),
        MentionEntry::new("64b7f0c2a1e4d3b2c1a09f8e", "Game Night"),
        MentionEntry::new("aaaaaaaaaaaaaaaaaaaaaaaa", "Bake Sale"),
    ]))
}

fn view(initial: &str) -> ComposerView {
    ComposerView::new(initial, directory(), ComposerConfig::default())
}

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(Key::simple(code))
}

fn type_text(view: &mut ComposerView, text: &str, now: Instant) {
    for ch in text.chars() {
        view.handle_input(&key(KeyCode::Char(ch)), now);
    }
}

fn screen(view: &mut ComposerView, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            view.render(frame, area);
        })
        .unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

#[test]
fn cursor_cell_counts_chip_labels_and_lines() {
    let dir = directory();
    let text = format!("hi @event:{GALA_ID}\nab");
    let tree = crate::kernel::highlight(&text, dir.as_ref()).tree;

    // "hi @event:Spring Gala" is 21 display chars.
    assert_eq!(cursor_cell(&tree, 21), (0, 21));
    assert_eq!(cursor_cell(&tree, 22), (1, 0));
    assert_eq!(cursor_cell(&tree, 24), (1, 2));
}

#[test]
fn cursor_cell_uses_terminal_width() {
    let tree = crate::kernel::project("你好a", &[]);
    assert_eq!(cursor_cell(&tree, 2), (0, 4));
    assert_eq!(cursor_cell(&tree, 3), (0, 5));
}

#[test]
fn display_lines_style_chips_and_links() {
    let dir = directory();
    let text = format!("see https://x.com @event:{GALA_ID}");
    let tree = crate::kernel::highlight(&text, dir.as_ref()).tree;
    let lines = display_lines(&tree);

    assert_eq!(lines.len(), 1);
    let spans = &lines[0].spans;
    assert_eq!(spans[1].content, "https://x.com");
    assert_eq!(spans[1].style, link_style());
    assert_eq!(spans[3].content, "@event:Spring Gala");
    assert_eq!(spans[3].style, chip_style());
}

#[test]
fn picker_wraps_both_ways() {
    let mut picker = Picker::default();
    picker.move_up(3);
    assert_eq!(picker.selected(), 2);
    picker.move_down(3);
    assert_eq!(picker.selected(), 0);
    picker.move_down(0);
    assert_eq!(picker.selected(), 0);
}

#[test]
fn typing_trigger_fills_candidates_from_directory() {
    let mut view = view("");
    let now = Instant::now();
    type_text(&mut view, "@ga", now);

    assert_eq!(view.session().state(), SessionState::MentionSearch);
    let labels: Vec<&str> = view
        .session()
        .candidates()
        .iter()
        .map(|entry| entry.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Spring Gala", "Game Night"]);
}

#[test]
fn enter_selects_highlighted_candidate() {
    let mut view = view("");
    let now = Instant::now();
    type_text(&mut view, "@ga", now);
    view.handle_input(&key(KeyCode::Down), now);
    view.handle_input(&key(KeyCode::Enter), now);

    assert_eq!(view.session().text(), "@event:64b7f0c2a1e4d3b2c1a09f8e ");
    assert_eq!(view.session().state(), SessionState::Idle);
    assert_eq!(view.picker().selected(), 0);
}

#[test]
fn ctrl_s_submits_and_clears() {
    let mut view = view("hello ");
    let now = Instant::now();
    let result = view.handle_input(&InputEvent::Key(Key::ctrl(KeyCode::Char('s'))), now);

    assert_eq!(result, EventResult::Consumed);
    assert_eq!(view.take_submitted(), vec!["hello".to_string()]);
    assert_eq!(view.session().text(), "");
    assert!(view.take_submitted().is_empty());
}

#[test]
fn ctrl_s_on_empty_text_shows_error() {
    let mut view = view("   ");
    let now = Instant::now();
    view.handle_input(&InputEvent::Key(Key::ctrl(KeyCode::Char('s'))), now);

    assert!(view.status().is_some());
    assert_eq!(view.session().text(), "   ");
}

#[test]
fn ctrl_q_quits() {
    let mut view = view("");
    let result = view.handle_input(
        &InputEvent::Key(Key::ctrl(KeyCode::Char('q'))),
        Instant::now(),
    );
    assert!(result.is_quit());
}

#[test]
fn paste_inserts_sanitized_text() {
    let mut view = view("");
    view.handle_input(&InputEvent::Paste("a\r\nb".to_string()), Instant::now());
    assert_eq!(view.session().text(), "a\nb");
}

#[test]
fn render_shows_chip_label_and_places_cursor() {
    let mut view = view(&format!("hi @event:{GALA_ID}"));
    let rows = screen(&mut view, 40, 8);

    assert!(rows[1].contains("hi @event:Spring Gala"));
    assert!(!rows.iter().any(|row| row.contains(GALA_ID)));
    // Border plus "hi @event:Spring Gala".
    assert_eq!(view.cursor_position(), Some((1 + 21, 1)));
}

#[test]
fn render_lists_candidates_while_searching() {
    let mut view = view("");
    type_text(&mut view, "@bake", Instant::now());
    let rows = screen(&mut view, 40, 10);

    assert!(rows.iter().any(|row| row.contains("Bake Sale")));
    assert!(rows.iter().any(|row| row.contains("@bake")));
}
