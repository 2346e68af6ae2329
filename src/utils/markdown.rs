//! Markdown rendering with pulldown-cmark.

use pulldown_cmark::{Event, Options, Parser, TagEnd, html::push_html};

/// GFM extensions enabled for every render
fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS | Options::ENABLE_TABLES
}

/// Render markdown to HTML.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut html = String::with_capacity(markdown.len() * 2);
    push_html(&mut html, parser);
    html
}

/// Render markdown to plain text.
///
/// Keeps text and inline code, drops markup and raw HTML. Block ends and
/// line breaks become single spaces.
pub fn to_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_),
            ) => text.push(' '),
            _ => {}
        }
    }

    super::text::collapse_whitespace(&text)
}
