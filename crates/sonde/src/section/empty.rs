//! Placeholder for analyses that did not apply.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::html::{WARNING_GLYPH, section_id, tags_to_title, valid_h_tag};
use super::{RenderSection, Statistics};

/// Section returned when an analyzer's preconditions do not hold.
///
/// Carries no data. It renders a warning placeholder instead of a number so
/// the reader can tell the slot was skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptySection;

impl RenderSection for EmptySection {
    fn statistics(&self) -> Statistics {
        Statistics::new()
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        let note = format!(
            "<p><span>{}</span> No analysis was performed for this section.</p>",
            WARNING_GLYPH
        );
        if tags.is_empty() {
            return note;
        }
        let level = valid_h_tag(depth + 1);
        format!(
            "<h{level} id=\"{id}\">{glyph} {title} </h{level}>\n{note}",
            level = level,
            id = encode_double_quoted_attribute(&section_id(number, tags)),
            glyph = WARNING_GLYPH,
            title = encode_text(&tags_to_title(tags)),
            note = note,
        )
    }

    fn render_html_toc(
        &self,
        number: &str,
        tags: &[String],
        depth: usize,
        max_depth: usize,
    ) -> String {
        let Some(tag) = tags.last() else {
            return String::new();
        };
        if depth >= max_depth {
            return String::new();
        }
        format!(
            "<li><a href=\"#{}\">{} {}</a></li>",
            encode_double_quoted_attribute(&section_id(number, tags)),
            WARNING_GLYPH,
            encode_text(tag)
        )
    }
}
