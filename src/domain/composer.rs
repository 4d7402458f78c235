use crate::domain::extractor::Extraction;
use crate::domain::template::MessageTemplate;

/// How a rendered template was merged with the original message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// The branch did not match, the message is left alone
    NoMatch,
    /// The message already starts with the rendered prefix
    AlreadyPrefixed { prefix: String },
    /// A new message was produced
    Composed(String),
}

/// Merge a rendered template with `original`, keeping the reason
///
/// A template without `$MESSAGE` renders a prefix that is prepended, unless
/// the message already starts with it. A template with `$MESSAGE` already
/// holds the message once and is returned as rendered.
pub fn compose_outcome(
    extraction: &Extraction,
    template: &MessageTemplate,
    original: &str,
) -> Composition {
    let groups = match extraction {
        Extraction::NoMatch => return Composition::NoMatch,
        Extraction::Matched(groups) => groups,
    };

    let rendered = template.render(groups, original);

    if template.consumes_message() {
        return Composition::Composed(rendered);
    }

    if original.starts_with(&rendered) {
        return Composition::AlreadyPrefixed { prefix: rendered };
    }

    Composition::Composed(rendered + original)
}

/// Like [`compose_outcome`], but safe to run again on its own output
///
/// A `$MESSAGE` template is also skipped when the message already starts
/// with what the template renders for an empty message (`#12345 - ` for
/// `#$2 - $MESSAGE`). Commit hooks see amended and re-edited messages, so
/// they compose through this.
pub fn compose_outcome_once(
    extraction: &Extraction,
    template: &MessageTemplate,
    original: &str,
) -> Composition {
    if let Extraction::Matched(groups) = extraction {
        if template.consumes_message() {
            let lead = template.render(groups, "");
            if !lead.is_empty() && original.starts_with(&lead) {
                return Composition::AlreadyPrefixed { prefix: lead };
            }
        }
    }

    compose_outcome(extraction, template, original)
}

/// Produce the final commit message
pub fn compose(extraction: &Extraction, template: &MessageTemplate, original: &str) -> String {
    match compose_outcome(extraction, template, original) {
        Composition::Composed(message) => message,
        Composition::NoMatch | Composition::AlreadyPrefixed { .. } => original.to_string(),
    }
}
