//! Static HTML content.

use super::html::{join_blocks, section_header};
use super::{RenderSection, Statistics};

/// Section that renders a fixed HTML snippet.
///
/// The snippet comes from the report configuration and is inserted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSection {
    content: String,
}

impl ContentSection {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl RenderSection for ContentSection {
    fn statistics(&self) -> Statistics {
        Statistics::new()
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        join_blocks([section_header(number, tags, depth), self.content.clone()])
    }
}
