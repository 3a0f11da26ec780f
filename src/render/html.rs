//! 静态渲染：规范文本 → 安全的 HTML 片段（消息卡片、回复）
//!
//! 与编辑会话共用分词、消解与投影，不涉及光标。

use crate::kernel;
use crate::models::{DisplayNode, MentionChip, MentionResolver};
use pulldown_cmark_escape::{escape_href, escape_html};
use std::fmt;

const LINK_CLASS: &str = "message-link";
const MENTION_CLASS: &str = "event-mention";

/// Renders canonical text to HTML. Text outside links and mentions is escaped
/// and `\n` becomes `<br />`.
pub fn render_html<R>(text: &str, resolver: &R) -> String
where
    R: MentionResolver + ?Sized,
{
    let tree = kernel::highlight(text, resolver).tree;
    let mut out = String::with_capacity(text.len() + text.len() / 4);

    let written: Result<(), fmt::Error> = tree.nodes().iter().try_for_each(|node| match node {
        DisplayNode::TextRun(run) => push_text(&mut out, run),
        DisplayNode::LinkNode { href, text } => push_link(&mut out, href, text),
        DisplayNode::MentionChip(chip) => push_mention(&mut out, chip, resolver),
    });
    match written {
        Ok(()) => out,
        // `String`'s `StrWrite` impl never returns an error.
        Err(fmt::Error) => unreachable!("writing to a String cannot fail"),
    }
}

fn push_text(out: &mut String, run: &str) -> Result<(), fmt::Error> {
    let mut lines = run.split('\n');
    if let Some(first) = lines.next() {
        escape_html(&mut *out, first)?;
    }
    for line in lines {
        out.push_str("<br />");
        escape_html(&mut *out, line)?;
    }
    Ok(())
}

fn push_link(out: &mut String, href: &str, text: &str) -> Result<(), fmt::Error> {
    out.push_str("<a href=\"");
    escape_href(&mut *out, href)?;
    out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"");
    out.push_str(LINK_CLASS);
    out.push_str("\">");
    escape_html(&mut *out, text)?;
    out.push_str("</a>");
    Ok(())
}

fn push_mention<R>(out: &mut String, chip: &MentionChip, resolver: &R) -> Result<(), fmt::Error>
where
    R: MentionResolver + ?Sized,
{
    match resolver.link_target(&chip.entry) {
        Some(href) => {
            out.push_str("<a href=\"");
            escape_href(&mut *out, &href)?;
            out.push_str("\" class=\"");
            out.push_str(MENTION_CLASS);
            out.push_str("\">");
            escape_html(&mut *out, &chip.display_text)?;
            out.push_str("</a>");
        }
        None => {
            out.push_str("<span class=\"");
            out.push_str(MENTION_CLASS);
            out.push_str("\">");
            escape_html(&mut *out, &chip.display_text)?;
            out.push_str("</span>");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/html.rs"]
mod tests;
