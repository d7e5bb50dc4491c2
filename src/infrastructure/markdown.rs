//! Markdown flattening for plaintext destinations
//!
//! Social destinations take plain text: emphasis and heading markers go
//! away, bullets become a glyph, paragraph breaks survive. Image markers
//! are ordinary text to the parser and pass through untouched.

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;

static EXTRA_NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Flatten markdown to plaintext, preserving paragraph structure.
pub fn to_plain_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut text = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading(..)) | Event::Start(Tag::Paragraph) => {
                ensure_paragraph_break(&mut text);
            }
            Event::End(Tag::Heading(..)) | Event::End(Tag::Paragraph) => {
                text.push('\n');
            }
            Event::Start(Tag::List(_)) => {
                ensure_paragraph_break(&mut text);
            }
            Event::Start(Tag::Item) => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str("• ");
            }
            Event::End(Tag::Item) => {
                if !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            Event::End(Tag::List(_)) => {
                text.push('\n');
            }
            Event::Start(Tag::CodeBlock(_)) => {
                ensure_paragraph_break(&mut text);
            }
            Event::End(Tag::CodeBlock(_)) => {
                if !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            Event::Text(t) | Event::Code(t) => {
                text.push_str(&t);
            }
            Event::Html(raw) => {
                // Not markdown we understand; keep the characters.
                text.push_str(&raw);
            }
            Event::SoftBreak | Event::HardBreak => {
                text.push('\n');
            }
            Event::Rule => {
                ensure_paragraph_break(&mut text);
            }
            _ => {}
        }
    }

    collapse_newlines(text.trim())
}

/// Collapse runs of 3+ newlines to exactly two.
pub fn collapse_newlines(text: &str) -> String {
    EXTRA_NEWLINES_RE.replace_all(text, "\n\n").into_owned()
}

fn ensure_paragraph_break(text: &mut String) {
    if text.is_empty() {
        return;
    }
    while !text.ends_with("\n\n") {
        text.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_emphasis() {
        assert_eq!(to_plain_text("**bold** and *italic*"), "bold and italic");
    }

    #[test]
    fn test_strips_heading_markers() {
        let out = to_plain_text("# Title\n\nBody text.");
        assert_eq!(out, "Title\n\nBody text.");
    }

    #[test]
    fn test_bullets_become_glyphs() {
        let out = to_plain_text("- first\n- second");
        assert_eq!(out, "• first\n• second");
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let out = to_plain_text("one\n\ntwo\n\nthree");
        assert_eq!(out, "one\n\ntwo\n\nthree");
    }

    #[test]
    fn test_collapses_newline_runs() {
        assert_eq!(collapse_newlines("a\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_inline_code_kept_as_text() {
        assert_eq!(to_plain_text("run `cargo test` now"), "run cargo test now");
    }

    #[test]
    fn test_image_markers_survive() {
        let out = to_plain_text("Intro **text**\n\n<<IMAGE_1>>\n\nMore text <<IMAGE_2>>");

        assert!(out.contains("<<IMAGE_1>>"));
        assert!(out.contains("<<IMAGE_2>>"));
        let first = out.find("<<IMAGE_1>>").unwrap();
        let second = out.find("<<IMAGE_2>>").unwrap();
        assert!(first < second);
    }
}
