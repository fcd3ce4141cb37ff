//! Cleanup of the backend's free-text interpretation.
//!
//! The text is markdown sprinkled with LaTeX. Math is dropped, markdown is
//! parsed into paragraphs of styled spans, and markers never reach the
//! output.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Strong,
    Emphasis,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Span { text: String, style: SpanStyle },
    LineBreak,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    /// Text without styling; line breaks become `\n`.
    pub fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Span { text, .. } => text.as_str(),
                Inline::LineBreak => "\n",
            })
            .collect()
    }

    fn push_text(&mut self, text: &str, style: SpanStyle) {
        if let Some(Inline::Span {
            text: last,
            style: last_style,
        }) = self.inlines.last_mut()
        {
            if *last_style == style {
                last.push_str(text);
                return;
            }
        }
        self.inlines.push(Inline::Span {
            text: text.to_string(),
            style,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Interpretation {
    pub paragraphs: Vec<Paragraph>,
}

impl Interpretation {
    pub fn parse(source: &str) -> Self {
        let cleaned = strip_latex(source);
        let mut builder = Builder::default();
        for event in Parser::new(&cleaned) {
            builder.event(event);
        }
        builder.flush();
        Self {
            paragraphs: builder.paragraphs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// One string per paragraph, for reports.
    pub fn plain_paragraphs(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::plain_text).collect()
    }
}

#[derive(Default)]
struct Builder {
    paragraphs: Vec<Paragraph>,
    current: Paragraph,
    strong: usize,
    emphasis: usize,
    list_depth: usize,
}

impl Builder {
    fn style(&self) -> SpanStyle {
        if self.strong > 0 {
            SpanStyle::Strong
        } else if self.emphasis > 0 {
            SpanStyle::Emphasis
        } else {
            SpanStyle::Plain
        }
    }

    fn flush(&mut self) {
        while matches!(self.current.inlines.last(), Some(Inline::LineBreak)) {
            self.current.inlines.pop();
        }
        let paragraph = std::mem::take(&mut self.current);
        if !paragraph.plain_text().trim().is_empty() {
            self.paragraphs.push(paragraph);
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph) => {
                if self.list_depth == 0 {
                    self.flush();
                }
            }
            Event::Start(Tag::Heading { .. }) => {
                self.flush();
                self.strong += 1;
            }
            Event::End(TagEnd::Heading(_)) => {
                self.strong = self.strong.saturating_sub(1);
                self.flush();
            }
            Event::Start(Tag::List(_)) => {
                if self.list_depth == 0 {
                    self.flush();
                }
                self.list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.flush();
                }
            }
            Event::Start(Tag::Item) => {
                if !self.current.inlines.is_empty() {
                    self.current.inlines.push(Inline::LineBreak);
                }
                self.current.push_text("• ", SpanStyle::Plain);
            }
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Text(text) | Event::Code(text) => {
                let style = self.style();
                self.current.push_text(&text, style);
            }
            Event::SoftBreak | Event::HardBreak => self.current.inlines.push(Inline::LineBreak),
            Event::Rule => self.flush(),
            _ => {}
        }
    }
}

/// Drop `\[ ... \]` and `\( ... \)` spans (single line), then every
/// remaining backslash.
pub fn strip_latex(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find('\\') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let close = if tail.starts_with("\\[") {
            Some("\\]")
        } else if tail.starts_with("\\(") {
            Some("\\)")
        } else {
            None
        };
        let skip = close.and_then(|close| {
            let line_end = tail.find('\n').unwrap_or(tail.len());
            tail[2..line_end].find(close).map(|end| 2 + end + close.len())
        });
        match skip {
            Some(len) => rest = &tail[len..],
            None => rest = &tail[1..],
        }
    }
    out.push_str(rest);
    out
}
