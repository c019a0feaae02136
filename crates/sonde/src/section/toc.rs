//! Section wrapper that always shows up in the table of contents.

use super::{RenderSection, Section, Statistics};

/// Wraps a section so its own entry is listed at whatever depth it sits.
///
/// Statistics and body are the inner section's, verbatim. In the table of
/// contents the wrapper lifts the cutoff just enough for its own entry;
/// descendants still obey the caller's `max_depth`, further capped by
/// `max_toc_depth` levels below this node when set.
#[derive(Debug, Clone)]
pub struct TableOfContentSection {
    section: Box<Section>,
    max_toc_depth: Option<usize>,
}

impl TableOfContentSection {
    pub fn new(section: Section, max_toc_depth: Option<usize>) -> Self {
        Self {
            section: Box::new(section),
            max_toc_depth,
        }
    }

    pub fn inner(&self) -> &Section {
        &self.section
    }
}

impl RenderSection for TableOfContentSection {
    fn statistics(&self) -> Statistics {
        self.section.get_statistics()
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        self.section.render_html_body(number, tags, depth)
    }

    fn render_html_toc(
        &self,
        number: &str,
        tags: &[String],
        depth: usize,
        max_depth: usize,
    ) -> String {
        let forced = max_depth.max(depth + 1);
        let max_depth = match self.max_toc_depth {
            Some(levels) => forced.min(depth + 1 + levels),
            None => forced,
        };
        self.section.render_html_toc(number, tags, depth, max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{ContentSection, SectionDict};
    use indexmap::IndexMap;

    fn nested() -> Section {
        let mut inner = IndexMap::new();
        inner.insert("x".to_string(), Section::from(ContentSection::new("x")));
        Section::Dict(SectionDict::new(inner))
    }

    #[test]
    fn test_entry_visible_past_cutoff() {
        let tags = vec!["overview".to_string()];
        let plain = nested();
        assert_eq!(plain.render_html_toc("1.", &tags, 1, 1), "");

        let forced = TableOfContentSection::new(nested(), None);
        let toc = forced.render_html_toc("1.", &tags, 1, 1);
        assert!(toc.contains("<li><a href=\"#s1-overview\">1. overview</a></li>"));
        // Children still respect the cutoff.
        assert!(!toc.contains("1.1."));
    }

    #[test]
    fn test_children_follow_max_depth() {
        let tags = vec!["overview".to_string()];
        let forced = TableOfContentSection::new(nested(), None);
        assert!(forced.render_html_toc("1.", &tags, 1, 3).contains("1.1. x"));

        let capped = TableOfContentSection::new(nested(), Some(0));
        assert!(!capped.render_html_toc("1.", &tags, 1, 3).contains("1.1. x"));
    }

    #[test]
    fn test_delegates_body_and_statistics() {
        let section = TableOfContentSection::new(nested(), None);
        let tags = vec!["overview".to_string()];
        assert_eq!(
            section.render_html_body("1.", &tags, 1),
            nested().render_html_body("1.", &tags, 1)
        );
        assert_eq!(section.statistics(), nested().get_statistics());
    }
}
