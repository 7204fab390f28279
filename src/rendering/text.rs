use pulldown_cmark::{Event, Parser, TagEnd};

use super::markdown::markdown_options;

/// Default reading speed used to derive reading time.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

fn push_separator(text: &mut String) {
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push(' ');
    }
}

/// Strip markdown syntax, keeping the visible text.
///
/// Inline text runs are joined as-is (the parser splits words at smart
/// quotes and brackets); blocks and line breaks are separated by a space.
pub fn plain_text(raw: &str) -> String {
    let parser = Parser::new_ext(raw, markdown_options());
    let mut text = String::new();

    for event in parser {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => push_separator(&mut text),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::TableCell
                | TagEnd::CodeBlock
                | TagEnd::FootnoteDefinition,
            ) => push_separator(&mut text),
            _ => {}
        }
    }

    text
}

/// Number of whitespace-separated words in the visible text of `raw`.
pub fn word_count(raw: &str) -> usize {
    plain_text(raw).split_whitespace().count()
}

/// Minutes needed to read `raw` at `words_per_minute`, rounded up, minimum 1.
pub fn reading_time(raw: &str, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    let minutes = word_count(raw).div_ceil(wpm);
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}
