//! Composite section aggregating named children.

use indexmap::IndexMap;

use super::html::{child_number, child_tags, heading, toc_entry};
use super::{RenderSection, Section, Statistics};

/// Ordered mapping of named child sections.
///
/// Owns the numbering scheme (child `i` of `"1."` is `"1.i."`) and the table
/// of contents truncation. Its statistics mirror the children exactly: one
/// key per child, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SectionDict {
    sections: IndexMap<String, Section>,
    max_toc_depth: Option<usize>,
}

impl SectionDict {
    pub fn new(sections: IndexMap<String, Section>) -> Self {
        Self {
            sections,
            max_toc_depth: None,
        }
    }

    /// Limit how many levels below this node appear in the table of contents.
    ///
    /// `Some(0)` lists only this node, `None` defers to the caller's
    /// `max_depth`.
    pub fn with_max_toc_depth(mut self, max_toc_depth: Option<usize>) -> Self {
        self.max_toc_depth = max_toc_depth;
        self
    }

    pub fn sections(&self) -> &IndexMap<String, Section> {
        &self.sections
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn child_max_depth(&self, depth: usize, max_depth: usize) -> usize {
        match self.max_toc_depth {
            Some(levels) => max_depth.min(depth + 1 + levels),
            None => max_depth,
        }
    }
}

impl RenderSection for SectionDict {
    fn statistics(&self) -> Statistics {
        self.sections
            .iter()
            .map(|(name, section)| {
                (
                    name.clone(),
                    serde_json::Value::Object(section.get_statistics()),
                )
            })
            .collect()
    }

    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        let mut report = Vec::with_capacity(self.sections.len() + 1);
        if !tags.is_empty() {
            report.push(heading(number, tags, depth));
        }
        for (i, (name, section)) in self.sections.iter().enumerate() {
            report.push(section.render_html_body(
                &child_number(number, i),
                &child_tags(tags, name),
                depth + 1,
            ));
        }
        report.join("\n")
    }

    fn render_html_toc(
        &self,
        number: &str,
        tags: &[String],
        depth: usize,
        max_depth: usize,
    ) -> String {
        if depth >= max_depth {
            return String::new();
        }
        let mut toc = Vec::new();
        if !tags.is_empty() {
            toc.push(toc_entry(number, tags, depth, max_depth));
        }

        let child_max = self.child_max_depth(depth, max_depth);
        let subtoc: Vec<String> = self
            .sections
            .iter()
            .enumerate()
            .map(|(i, (name, section))| {
                section.render_html_toc(
                    &child_number(number, i),
                    &child_tags(tags, name),
                    depth + 1,
                    child_max,
                )
            })
            .filter(|line| !line.is_empty())
            .map(|line| format!("  {}", line))
            .collect();

        if !subtoc.is_empty() {
            toc.push("<ul>".to_string());
            toc.extend(subtoc);
            toc.push("</ul>".to_string());
        }
        toc.join("\n")
    }
}
