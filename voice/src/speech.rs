//! SSML rendering for spoken replies.

use quick_xml::escape::escape;

/// Named platform voice used for everything the assistant says.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voice {
    name: String,
}

impl Voice {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wrap `text` in a `<voice>` tag. Both the text and the voice name are
    /// XML-escaped so model output cannot break the markup.
    pub fn wrap(&self, text: &str) -> String {
        format!(
            "<voice name=\"{}\">{}</voice>",
            escape(self.name.as_str()),
            escape(text)
        )
    }
}
