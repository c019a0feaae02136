//! Sections: the renderable results of analyses.
//!
//! A [`Section`] captures everything it needs when it is built. Rendering is
//! a pure function of the section and the `(number, tags, depth, max_depth)`
//! arguments supplied by the parent, so a section can be rendered any number
//! of times, at any position in a document.
//!
//! Numbering is dotted (`"1."`, `"1.2."`), assigned by each parent from the
//! 1-based position of the child. Depth grows by one per nesting level and
//! picks the heading level; the table of contents stops at `max_depth`
//! while the body always expands fully.

mod content;
mod continuous;
mod dict;
mod discrete;
mod dtype;
mod duplicate;
mod empty;
pub mod html;
mod null;
mod summary;
mod temporal;
mod toc;

pub use content::ContentSection;
pub use continuous::{ColumnContinuousSection, Histogram};
pub use dict::SectionDict;
pub use discrete::ColumnDiscreteSection;
pub use dtype::DataTypeSection;
pub use duplicate::DuplicatedRowSection;
pub use empty::EmptySection;
pub use null::NullValueSection;
pub use summary::{ColumnSummary, DataFrameSummarySection};
pub use temporal::TemporalNullValueSection;
pub use toc::TableOfContentSection;

/// Statistics reported by a section, in insertion order.
pub type Statistics = serde_json::Map<String, serde_json::Value>;

/// Rendering contract implemented by every concrete section.
pub trait RenderSection {
    /// Statistics computed by the analysis.
    fn statistics(&self) -> Statistics;

    /// Full content of the section.
    fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String;

    /// Navigation entry for the section.
    ///
    /// Leaves contribute a single entry, hidden once `depth >= max_depth`.
    fn render_html_toc(
        &self,
        number: &str,
        tags: &[String],
        depth: usize,
        max_depth: usize,
    ) -> String {
        html::toc_entry(number, tags, depth, max_depth)
    }
}

/// Outcome of one analysis.
#[derive(Debug, Clone)]
pub enum Section {
    /// The analysis did not apply to this dataset.
    Empty(EmptySection),
    Dict(SectionDict),
    TableOfContent(TableOfContentSection),
    Content(ContentSection),
    NullValue(NullValueSection),
    DuplicatedRow(DuplicatedRowSection),
    DataType(DataTypeSection),
    ColumnDiscrete(ColumnDiscreteSection),
    ColumnContinuous(ColumnContinuousSection),
    TemporalNullValue(TemporalNullValueSection),
    DataFrameSummary(DataFrameSummarySection),
}

impl Section {
    /// The "did not apply" section.
    pub fn empty() -> Self {
        Section::Empty(EmptySection)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Section::Empty(_))
    }

    fn inner(&self) -> &dyn RenderSection {
        match self {
            Section::Empty(s) => s,
            Section::Dict(s) => s,
            Section::TableOfContent(s) => s,
            Section::Content(s) => s,
            Section::NullValue(s) => s,
            Section::DuplicatedRow(s) => s,
            Section::DataType(s) => s,
            Section::ColumnDiscrete(s) => s,
            Section::ColumnContinuous(s) => s,
            Section::TemporalNullValue(s) => s,
            Section::DataFrameSummary(s) => s,
        }
    }

    /// Statistics tree of this section.
    pub fn get_statistics(&self) -> Statistics {
        self.inner().statistics()
    }

    /// Render the body at the given position in the document.
    pub fn render_html_body(&self, number: &str, tags: &[String], depth: usize) -> String {
        self.inner().render_html_body(number, tags, depth)
    }

    /// Render the table of contents at the given position in the document.
    pub fn render_html_toc(
        &self,
        number: &str,
        tags: &[String],
        depth: usize,
        max_depth: usize,
    ) -> String {
        self.inner().render_html_toc(number, tags, depth, max_depth)
    }

    /// Render the body of a root section.
    pub fn render_root_body(&self) -> String {
        self.render_html_body("", &[], 0)
    }

    /// Render the table of contents of a root section.
    pub fn render_root_toc(&self, max_depth: usize) -> String {
        self.render_html_toc("", &[], 0, max_depth)
    }
}

macro_rules! impl_from_section {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Section {
                fn from(section: $ty) -> Self {
                    Section::$variant(section)
                }
            }
        )*
    };
}

impl_from_section!(
    Empty(EmptySection),
    Dict(SectionDict),
    TableOfContent(TableOfContentSection),
    Content(ContentSection),
    NullValue(NullValueSection),
    DuplicatedRow(DuplicatedRowSection),
    DataType(DataTypeSection),
    ColumnDiscrete(ColumnDiscreteSection),
    ColumnContinuous(ColumnContinuousSection),
    TemporalNullValue(TemporalNullValueSection),
    DataFrameSummary(DataFrameSummarySection),
);
