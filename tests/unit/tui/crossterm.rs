use super::*;

fn press(code: crossterm::event::KeyCode, mods: crossterm::event::KeyModifiers) -> crossterm::event::Event {
    crossterm::event::Event::Key(crossterm::event::KeyEvent::new(code, mods))
}

#[test]
fn ctrl_s_keeps_modifier() {
    let event = press(
        crossterm::event::KeyCode::Char('s'),
        crossterm::event::KeyModifiers::CONTROL,
    );
    let Some(InputEvent::Key(key)) = into_input_event(event) else {
        panic!("expected key");
    };
    assert_eq!(key.code, KeyCode::Char('s'));
    assert!(key.modifiers.contains(KeyModifiers::CONTROL));
    assert_eq!(key.text_char(), None);
}

#[test]
fn shift_enter_is_distinguished() {
    let event = press(
        crossterm::event::KeyCode::Enter,
        crossterm::event::KeyModifiers::SHIFT,
    );
    let Some(InputEvent::Key(key)) = into_input_event(event) else {
        panic!("expected key");
    };
    assert!(key.is_shift());
}

#[test]
fn release_and_unmapped_keys_are_dropped() {
    let mut release = crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Char('a'),
        crossterm::event::KeyModifiers::NONE,
    );
    release.kind = crossterm::event::KeyEventKind::Release;
    assert_eq!(into_key(release), None);

    let f1 = press(
        crossterm::event::KeyCode::F(1),
        crossterm::event::KeyModifiers::NONE,
    );
    assert_eq!(into_input_event(f1), None);
}

#[test]
fn paste_is_forwarded_as_text() {
    let event = crossterm::event::Event::Paste("hi\r\nthere".to_string());
    assert_eq!(
        into_input_event(event),
        Some(InputEvent::Paste("hi\r\nthere".to_string()))
    );
}
