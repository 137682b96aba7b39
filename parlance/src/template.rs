//! ICU-style message templates: parsing and placeholder substitution.
//!
//! [`Template::parse`] runs a single left-to-right scan with one character of
//! lookahead, splitting a format string into literal and placeholder spans.
//! The scanner honours a useful subset of ICU MessageFormat quoting:
//!
//! - a doubled quote `''` always emits one literal quote;
//! - a single `'` toggles an escaped span in which braces are literal text;
//! - `{` opens a placeholder whose name is the leading `[A-Za-z0-9_]` run
//!   (whitespace before the name is ignored); everything after the name,
//!   such as an ICU sub-format introduced by a comma, is consumed up to the
//!   matching close brace and discarded.
//!
//! Sub-format instructions (plural rules, date and number styles) are never
//! evaluated: the raw context value is substituted as plain text. Malformed
//! input never fails either — an unterminated span is finalised as literal
//! text and unmatched closing braces pass through unchanged.

use crate::context::MessageContext;

/// One span of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text emitted verbatim.
    Literal(String),
    /// A named substitution point.
    Placeholder(String),
}

/// A format string parsed into an ordered sequence of [`Segment`]s.
///
/// Parsing is a pure function of the format string: parsing the same input
/// twice yields structurally identical templates, and [`Template::render`]
/// is a pure function of the template and context.
///
/// # Examples
///
/// ```
/// use parlance::{MessageContext, Template};
///
/// let template = Template::parse("hello, {token}!");
/// let context: MessageContext = [("token", "world")].into_iter().collect();
/// assert_eq!(template.render(&context), "hello, world!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a format string. Never fails; malformed quoting and
    /// unterminated placeholders degrade to literal text.
    #[must_use]
    pub fn parse(format: &str) -> Self {
        let mut scanner = Scanner::new();
        let mut chars = format.chars().peekable();
        while let Some(ch) = chars.next() {
            // Quoting only applies outside placeholders.
            if ch == '\'' && matches!(scanner.state, ScanState::Literal) {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    scanner.literal.push('\'');
                } else {
                    scanner.escaped = !scanner.escaped;
                }
                continue;
            }
            scanner.step(ch);
        }
        let segments = scanner.finish();
        tracing::trace!(spans = segments.len(), "parsed message template");
        Self { segments }
    }

    /// The parsed spans, in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Substitutes context values into the template.
    ///
    /// A placeholder with no matching context value is re-emitted literally
    /// as `{name}`, keeping unresolved tokens visible rather than silently
    /// dropping them.
    #[must_use]
    pub fn render(&self, context: &MessageContext) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(name) => match context.get(name) {
                    Some(value) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(name);
                        output.push('}');
                    }
                },
            }
        }
        output
    }
}

enum ScanState {
    /// Scanning literal text between placeholders.
    Literal,
    /// Reading a placeholder name just after its opening brace.
    Name {
        name: String,
        /// Whether at least one name character has been read; leading
        /// whitespace is skipped, trailing whitespace ends the name.
        started: bool,
    },
    /// Discarding sub-format content up to the matching close brace.
    Skip { name: String, depth: u32 },
}

struct Scanner {
    segments: Vec<Segment>,
    literal: String,
    escaped: bool,
    state: ScanState,
}

impl Scanner {
    fn new() -> Self {
        Self {
            segments: Vec::new(),
            literal: String::new(),
            escaped: false,
            state: ScanState::Literal,
        }
    }

    fn step(&mut self, ch: char) {
        let state = std::mem::replace(&mut self.state, ScanState::Literal);
        self.state = match state {
            ScanState::Literal => self.literal_step(ch),
            ScanState::Name { name, started } => self.name_step(ch, name, started),
            ScanState::Skip { name, depth } => self.skip_step(ch, name, depth),
        };
    }

    fn literal_step(&mut self, ch: char) -> ScanState {
        if ch == '{' && !self.escaped {
            self.flush_literal();
            return ScanState::Name {
                name: String::new(),
                started: false,
            };
        }
        // Covers escaped braces and unmatched close braces alike.
        self.literal.push(ch);
        ScanState::Literal
    }

    fn name_step(&mut self, ch: char, mut name: String, started: bool) -> ScanState {
        match ch {
            '}' => {
                self.close(name);
                ScanState::Literal
            }
            // A nested brace ends the name and deepens the skip.
            '{' => ScanState::Skip { name, depth: 2 },
            c if is_name_char(c) => {
                name.push(c);
                ScanState::Name {
                    name,
                    started: true,
                }
            }
            c if c.is_whitespace() && !started => ScanState::Name { name, started },
            // First non-identifier character (a comma introducing an ICU
            // sub-format, say): the name is complete, discard the rest.
            _ => ScanState::Skip { name, depth: 1 },
        }
    }

    fn skip_step(&mut self, ch: char, name: String, depth: u32) -> ScanState {
        match ch {
            '{' => ScanState::Skip {
                name,
                depth: depth + 1,
            },
            '}' => {
                let remaining = depth.saturating_sub(1);
                if remaining == 0 {
                    self.close(name);
                    ScanState::Literal
                } else {
                    ScanState::Skip {
                        name,
                        depth: remaining,
                    }
                }
            }
            _ => ScanState::Skip { name, depth },
        }
    }

    fn close(&mut self, name: String) {
        self.segments.push(Segment::Placeholder(name));
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.segments.push(Segment::Literal(text));
        }
    }

    /// End of input finalises whatever span is in progress.
    fn finish(mut self) -> Vec<Segment> {
        match std::mem::replace(&mut self.state, ScanState::Literal) {
            ScanState::Literal => {}
            ScanState::Name { name, .. } | ScanState::Skip { name, .. } => {
                self.literal.push('{');
                self.literal.push_str(&name);
            }
        }
        self.flush_literal();
        self.segments
    }
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
