//! Inline markup tokenizer for skill descriptions.
//!
//! The grammar is a single level of `[name]content[/name]` spans:
//!
//! - `name` is one or more ASCII letters, digits or `_`;
//! - the span closes at the first `[/name]` with the identical name;
//! - `content` never crosses a line break;
//! - anything that does not form such a span is literal text.
//!
//! `[b]` spans are bold, `[red]` spans use the accent color, and any other
//! name is consumed without changing the style.

use palette::Srgba;

use crate::theme::{ACCENT_RED, SKILL_TEXT};

/// A styled fragment of a skill description.
#[derive(Debug, Clone, PartialEq)]
pub struct RichTextRun {
    pub text: String,
    pub color: Srgba<u8>,
    pub bold: bool,
}

impl RichTextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: SKILL_TEXT,
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn red(text: impl Into<String>) -> Self {
        Self {
            color: ACCENT_RED,
            ..Self::plain(text)
        }
    }

    /// Same color and weight as `other`.
    pub fn same_style(&self, other: &RichTextRun) -> bool {
        self.color == other.color && self.bold == other.bold
    }

    fn styled(tag: &str, text: &str) -> Self {
        match tag {
            "b" => Self::bold(text),
            "red" => Self::red(text),
            _ => Self::plain(text),
        }
    }
}

/// Splits `text` into styled runs. Empty runs are omitted.
pub fn tokenize(text: &str) -> Vec<RichTextRun> {
    let mut runs = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < text.len() {
        if let Some(span) = match_span(text, pos) {
            push_nonempty(&mut runs, RichTextRun::plain(&text[literal_start..pos]));
            push_nonempty(&mut runs, RichTextRun::styled(span.tag, span.content));
            pos = span.end;
            literal_start = pos;
        } else {
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }
    push_nonempty(&mut runs, RichTextRun::plain(&text[literal_start..]));
    runs
}

/// `text` with every recognized span's markers removed.
pub fn strip_markup(text: &str) -> String {
    tokenize(text).into_iter().map(|run| run.text).collect()
}

struct Span<'a> {
    tag: &'a str,
    content: &'a str,
    /// Byte offset just past the closing marker.
    end: usize,
}

fn match_span(text: &str, start: usize) -> Option<Span<'_>> {
    let rest = text[start..].strip_prefix('[')?;
    let tag_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if tag_len == 0 {
        return None;
    }
    let tag = &rest[..tag_len];
    let body = rest[tag_len..].strip_prefix(']')?;

    let line = body.find(is_line_break).map_or(body, |end| &body[..end]);
    let close = format!("[/{tag}]");
    let content_len = line.find(&close)?;

    let content_start = start + 1 + tag_len + 1;
    Some(Span {
        tag,
        content: &body[..content_len],
        end: content_start + content_len + close.len(),
    })
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn push_nonempty(runs: &mut Vec<RichTextRun>, run: RichTextRun) {
    if !run.text.is_empty() {
        runs.push(run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(tokenize("出牌阶段限一次"), vec![RichTextRun::plain("出牌阶段限一次")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn bold_and_red_spans() {
        let runs = tokenize("[b]锁定技[/b]，你的[red]手牌上限[/red]始终为 9。");
        assert_eq!(
            runs,
            vec![
                RichTextRun::bold("锁定技"),
                RichTextRun::plain("，你的"),
                RichTextRun::red("手牌上限"),
                RichTextRun::plain("始终为 9。"),
            ]
        );
    }

    #[test]
    fn unknown_tags_are_stripped_without_style() {
        assert_eq!(
            tokenize("a[i]b[/i]c"),
            vec![
                RichTextRun::plain("a"),
                RichTextRun::plain("b"),
                RichTextRun::plain("c"),
            ]
        );
    }

    #[test]
    fn mismatched_and_unterminated_tags_stay_literal() {
        assert_eq!(tokenize("[b]x[/red]"), vec![RichTextRun::plain("[b]x[/red]")]);
        assert_eq!(tokenize("[b]open"), vec![RichTextRun::plain("[b]open")]);
        assert_eq!(tokenize("[]x[/]"), vec![RichTextRun::plain("[]x[/]")]);
        assert_eq!(tokenize("[b c]x[/b c]"), vec![RichTextRun::plain("[b c]x[/b c]")]);
    }

    #[test]
    fn span_closes_at_first_matching_marker() {
        assert_eq!(
            tokenize("[b]a[/b]b[/b]"),
            vec![RichTextRun::bold("a"), RichTextRun::plain("b[/b]")]
        );
    }

    #[test]
    fn spans_do_not_cross_line_breaks() {
        assert_eq!(
            tokenize("[b]a\nb[/b]"),
            vec![RichTextRun::plain("[b]a\nb[/b]")]
        );
    }

    #[test]
    fn nested_markup_is_not_interpreted() {
        assert_eq!(
            tokenize("[b]x[red]y[/red][/b]"),
            vec![RichTextRun::bold("x[red]y[/red]")]
        );
    }

    #[test]
    fn empty_spans_produce_no_run() {
        assert_eq!(
            tokenize("a[b][/b]c"),
            vec![RichTextRun::plain("a"), RichTextRun::plain("c")]
        );
    }

    #[test]
    fn strip_removes_markers() {
        assert_eq!(strip_markup("[b]觉醒技[/b]，当[red]x[/red]时"), "觉醒技，当x时");
    }

    fn segment() -> impl Strategy<Value = (Option<&'static str>, String)> {
        (
            prop_oneof![
                Just(None),
                Just(Some("b")),
                Just(Some("red")),
                Just(Some("note")),
            ],
            "[a-z杀闪桃酒，。 ]{0,8}",
        )
    }

    proptest! {
        #[test]
        fn runs_concatenate_to_stripped_input(segments in prop::collection::vec(segment(), 0..8)) {
            let mut marked = String::new();
            let mut stripped = String::new();
            for (tag, content) in &segments {
                match tag {
                    Some(tag) => marked.push_str(&format!("[{tag}]{content}[/{tag}]")),
                    None => marked.push_str(content),
                }
                stripped.push_str(content);
            }

            let joined: String = tokenize(&marked).into_iter().map(|r| r.text).collect();
            prop_assert_eq!(joined, stripped);
        }

        #[test]
        fn tokenize_never_loses_unbracketed_text(text in "[^\\[\\]]{0,40}") {
            prop_assert_eq!(strip_markup(&text), text);
        }
    }
}
