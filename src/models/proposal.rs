use serde::Serialize;

/// The admin-supplied proposal document. Never inspected beyond display.
#[derive(Debug, Clone, Serialize)]
pub struct Proposal {
    filename: String,
    #[serde(skip)]
    content: Vec<u8>,
}

impl Proposal {
    pub fn new(filename: String, content: Vec<u8>) -> Self {
        Self { filename, content }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The content as text, if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}
