//! Commit message templates.
//!
//! Templates are scanned once into segments. Rendering fills each segment from
//! values captured before rendering started, so text coming from a capture
//! group or from the message is never expanded again.

const MESSAGE_TOKEN: &str = "MESSAGE";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Group(usize),
    Message,
}

/// A parsed message template using `$1`..`$N` and `$MESSAGE` tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl MessageTemplate {
    /// Scan a template into literal text and tokens
    ///
    /// `$` followed by a run of digits is a single group token, so `$10` is
    /// group ten and never `$1` followed by `0`. Runs with a leading zero, or
    /// too long to be an index, stay literal.
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(pos) = rest.find('$') {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(tail) = after.strip_prefix(MESSAGE_TOKEN) {
                flush(&mut segments, &mut literal);
                segments.push(Segment::Message);
                rest = tail;
                continue;
            }

            let digits_len = after
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after.len());
            let digits = &after[..digits_len];

            match group_index(digits) {
                Some(index) => {
                    flush(&mut segments, &mut literal);
                    segments.push(Segment::Group(index));
                }
                None => {
                    literal.push('$');
                    literal.push_str(digits);
                }
            }
            rest = &after[digits_len..];
        }

        literal.push_str(rest);
        flush(&mut segments, &mut literal);

        MessageTemplate {
            source: template.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the template embeds the original message via `$MESSAGE`
    pub fn consumes_message(&self) -> bool {
        self.segments.contains(&Segment::Message)
    }

    /// Render against 1-based `groups` and the original `message`
    ///
    /// Group tokens past `groups.len()` are emitted unchanged.
    pub fn render(&self, groups: &[String], message: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + message.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Message => out.push_str(message),
                Segment::Group(index) => match groups.get(index - 1) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('$');
                        out.push_str(&index.to_string());
                    }
                },
            }
        }

        out
    }
}

fn flush(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn group_index(digits: &str) -> Option<usize> {
    if digits.is_empty() || digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}
