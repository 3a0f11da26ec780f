use super::*;
use crate::models::{MentionDirectory, MentionEntry};

const GALA_ID: &str = "507f1f77bcf86cd799439011";

fn directory() -> MentionDirectory {
    MentionDirectory::from_entries([MentionEntry::new(GALA_ID, "Spring Gala")])
}

/// Resolves like the directory but has no page to link mentions to.
struct NoLinks(MentionDirectory);

impl MentionResolver for NoLinks {
    fn resolve(&self, id: &str) -> Option<&MentionEntry> {
        self.0.get(id)
    }

    fn link_target(&self, _entry: &MentionEntry) -> Option<String> {
        None
    }
}

#[test]
fn renders_links_and_mentions() {
    let text = format!("Check https://x.com/y and @event:{GALA_ID}");
    assert_eq!(
        render_html(&text, &directory()),
        format!(
            "Check <a href=\"https://x.com/y\" target=\"_blank\" rel=\"noopener noreferrer\" \
             class=\"message-link\">https://x.com/y</a> and \
             <a href=\"/event/{GALA_ID}\" class=\"event-mention\">@event:Spring Gala</a>"
        )
    );
}

#[test]
fn escapes_text_and_breaks_lines() {
    assert_eq!(
        render_html("<b>&\"x\"</b>\nnext", &directory()),
        "&lt;b&gt;&amp;&quot;x&quot;&lt;/b&gt;<br />next"
    );
}

#[test]
fn mention_without_target_renders_span() {
    let text = format!("@event:{GALA_ID}");
    assert_eq!(
        render_html(&text, &NoLinks(directory())),
        "<span class=\"event-mention\">@event:Spring Gala</span>"
    );
}

#[test]
fn unresolved_mention_is_plain_text() {
    let text = "@event:000000000000000000000000";
    assert_eq!(render_html(text, &directory()), text);
}

#[test]
fn labels_are_escaped() {
    let dir = MentionDirectory::from_entries([MentionEntry::new(GALA_ID, "<Gala & Co>")]);
    let html = render_html(&format!("@event:{GALA_ID}"), &dir);
    assert!(html.contains(">@event:&lt;Gala &amp; Co&gt;</a>"));
}

#[test]
fn url_quotes_cannot_break_attributes() {
    let html = render_html("https://x.com/?a=\"b\"&c", &directory());
    assert!(!html.contains("\"b\""));
    assert!(html.contains("&amp;c"));
}

#[test]
fn empty_text_renders_nothing() {
    assert_eq!(render_html("", &directory()), "");
}

#[test]
fn escapes_ampersands_inside_link_href_and_text() {
    assert_eq!(
        render_html("go https://x.com/?a=1&b=2", &directory()),
        "go <a href=\"https://x.com/?a=1&amp;b=2\" target=\"_blank\" \
         rel=\"noopener noreferrer\" class=\"message-link\">https://x.com/?a=1&amp;b=2</a>"
    );
}
