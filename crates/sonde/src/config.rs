//! JSON report configuration.
//!
//! Every analyzer, transformer and selector has a tagged variant here. The
//! tree is resolved into trait objects by `build()` at load time, so an
//! unknown `type` fails while the file is read, before any data is touched.
//!
//! ```
//! use sonde::config::AnalyzerConfig;
//!
//! let config: AnalyzerConfig = serde_json::from_str(r#"{
//!     "type": "mapping",
//!     "analyzers": {
//!         "null values": {"type": "null_value"},
//!         "age": {"type": "column_continuous", "column": "age"}
//!     }
//! }"#).unwrap();
//! let analyzer = config.build().unwrap();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analyzer::{
    BoxAnalyzer, ChoiceAnalyzer, ColumnContinuousAnalyzer, ColumnDiscreteAnalyzer,
    ColumnSubsetAnalyzer, ColumnTemporalNullValueAnalyzer, ContentAnalyzer,
    DataFrameSummaryAnalyzer, DataTypeAnalyzer, DuplicatedRowAnalyzer, FilteredAnalyzer,
    MappingAnalyzer, NullValueAnalyzer, SelectionFn, TableOfContentAnalyzer, TransformAnalyzer,
    selector,
};
use crate::dataset::Query;
use crate::error::{Result, SondeError};
use crate::input::ParserConfig;
use crate::stats::TemporalPeriod;
use crate::transform::{
    BoxTransformer, Coerce, CoerceTarget, ConvertNa, QueryFilter, SelectColumns, Sequential,
    Standardize,
};

/// Default depth of the rendered table of contents.
pub const DEFAULT_MAX_TOC_DEPTH: usize = 6;

fn default_true() -> bool {
    true
}

fn default_max_toc_depth() -> usize {
    DEFAULT_MAX_TOC_DEPTH
}

fn default_report_path() -> PathBuf {
    PathBuf::from("report.html")
}

fn default_title() -> String {
    "Data Profiling Report".to_string()
}

/// Declarative analyzer tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalyzerConfig {
    Mapping {
        analyzers: IndexMap<String, AnalyzerConfig>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_toc_depth: Option<usize>,
    },
    Choice {
        selector: SelectorConfig,
        analyzers: IndexMap<String, AnalyzerConfig>,
    },
    Filtered {
        query: String,
        analyzer: Box<AnalyzerConfig>,
    },
    Transform {
        transformer: TransformerConfig,
        analyzer: Box<AnalyzerConfig>,
    },
    ColumnSubset {
        columns: Vec<String>,
        analyzer: Box<AnalyzerConfig>,
    },
    TableOfContent {
        analyzer: Box<AnalyzerConfig>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_toc_depth: Option<usize>,
    },
    NullValue,
    DuplicatedRow {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<String>>,
    },
    DataType,
    ColumnDiscrete {
        column: String,
        #[serde(default = "default_true")]
        dropna: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_rows: Option<usize>,
    },
    ColumnContinuous {
        column: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bins: Option<usize>,
    },
    ColumnTemporalNullValue {
        column: String,
        dt_column: String,
        #[serde(default)]
        period: TemporalPeriod,
    },
    DataFrameSummary {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        top: Option<usize>,
    },
    Content {
        content: String,
    },
}

impl AnalyzerConfig {
    /// Resolve the tree into analyzers.
    pub fn build(&self) -> Result<BoxAnalyzer> {
        let analyzer: BoxAnalyzer = match self {
            AnalyzerConfig::Mapping {
                analyzers,
                max_toc_depth,
            } => {
                let children = analyzers
                    .iter()
                    .map(|(name, config)| Ok((name.clone(), config.build()?)))
                    .collect::<Result<IndexMap<_, _>>>()?;
                Box::new(MappingAnalyzer::from_analyzers(children).with_max_toc_depth(*max_toc_depth))
            }
            AnalyzerConfig::Choice {
                selector,
                analyzers,
            } => {
                if analyzers.is_empty() {
                    return Err(SondeError::Config(
                        "choice analyzer needs at least one branch".to_string(),
                    ));
                }
                let mut choice = ChoiceAnalyzer::with_selection(selector.build());
                for (name, config) in analyzers {
                    choice.insert(name.clone(), config.build()?);
                }
                Box::new(choice)
            }
            AnalyzerConfig::Filtered { query, analyzer } => Box::new(FilteredAnalyzer::from_query(
                Query::parse(query)?,
                analyzer.build()?,
            )),
            AnalyzerConfig::Transform {
                transformer,
                analyzer,
            } => Box::new(TransformAnalyzer::from_boxed(
                transformer.build()?,
                analyzer.build()?,
            )),
            AnalyzerConfig::ColumnSubset { columns, analyzer } => Box::new(
                ColumnSubsetAnalyzer::from_boxed(columns.clone(), analyzer.build()?),
            ),
            AnalyzerConfig::TableOfContent {
                analyzer,
                max_toc_depth,
            } => Box::new(
                TableOfContentAnalyzer::from_boxed(analyzer.build()?)
                    .with_max_toc_depth(*max_toc_depth),
            ),
            AnalyzerConfig::NullValue => Box::new(NullValueAnalyzer::new()),
            AnalyzerConfig::DuplicatedRow { columns } => {
                let mut analyzer = DuplicatedRowAnalyzer::new();
                if let Some(columns) = columns {
                    analyzer = analyzer.with_columns(columns.clone());
                }
                Box::new(analyzer)
            }
            AnalyzerConfig::DataType => Box::new(DataTypeAnalyzer::new()),
            AnalyzerConfig::ColumnDiscrete {
                column,
                dropna,
                max_rows,
            } => {
                let mut analyzer = ColumnDiscreteAnalyzer::new(column.clone()).with_dropna(*dropna);
                if let Some(max_rows) = max_rows {
                    analyzer = analyzer.with_max_rows(*max_rows);
                }
                Box::new(analyzer)
            }
            AnalyzerConfig::ColumnContinuous { column, bins } => {
                let mut analyzer = ColumnContinuousAnalyzer::new(column.clone());
                if let Some(bins) = bins {
                    analyzer = analyzer.with_bins(*bins);
                }
                Box::new(analyzer)
            }
            AnalyzerConfig::ColumnTemporalNullValue {
                column,
                dt_column,
                period,
            } => Box::new(
                ColumnTemporalNullValueAnalyzer::new(column.clone(), dt_column.clone())
                    .with_period(*period),
            ),
            AnalyzerConfig::DataFrameSummary { top } => {
                let mut analyzer = DataFrameSummaryAnalyzer::new();
                if let Some(top) = top {
                    analyzer = analyzer.with_top(*top);
                }
                Box::new(analyzer)
            }
            AnalyzerConfig::Content { content } => Box::new(ContentAnalyzer::new(content.clone())),
        };
        Ok(analyzer)
    }
}

/// Declarative transformer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformerConfig {
    Standardize {
        column: String,
        mapping: IndexMap<String, String>,
    },
    ConvertNa {
        column: String,
        values: Vec<String>,
    },
    Coerce {
        column: String,
        target: CoerceTarget,
    },
    Query {
        query: String,
    },
    SelectColumns {
        columns: Vec<String>,
    },
    Sequential {
        transformers: Vec<TransformerConfig>,
    },
}

impl TransformerConfig {
    pub fn build(&self) -> Result<BoxTransformer> {
        let transformer: BoxTransformer = match self {
            TransformerConfig::Standardize { column, mapping } => {
                Box::new(Standardize::new(column.clone(), mapping.clone()))
            }
            TransformerConfig::ConvertNa { column, values } => {
                Box::new(ConvertNa::new(column.clone(), values.clone()))
            }
            TransformerConfig::Coerce { column, target } => {
                Box::new(Coerce::new(column.clone(), *target))
            }
            TransformerConfig::Query { query } => Box::new(QueryFilter::new(query)?),
            TransformerConfig::SelectColumns { columns } => {
                Box::new(SelectColumns::new(columns.clone()))
            }
            TransformerConfig::Sequential { transformers } => Box::new(Sequential::new(
                transformers
                    .iter()
                    .map(TransformerConfig::build)
                    .collect::<Result<Vec<_>>>()?,
            )),
        };
        Ok(transformer)
    }
}

/// Declarative selection function of a choice analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectorConfig {
    /// `"continuous"`, `"discrete"`, `"temporal"` or `"missing"`.
    ColumnKind { column: String },
    /// `"small"` or `"large"`.
    RowCount { threshold: usize },
}

impl SelectorConfig {
    pub fn build(&self) -> SelectionFn {
        match self {
            SelectorConfig::ColumnKind { column } => selector::by_column_kind(column.clone()),
            SelectorConfig::RowCount { threshold } => selector::by_row_count(*threshold),
        }
    }
}

/// Where and how to read the dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestorConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub parser: ParserConfig,
}

/// Complete report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterConfig {
    #[serde(default)]
    pub ingestor: IngestorConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformer: Option<TransformerConfig>,
    /// Analyzer tree; the standard profile when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<AnalyzerConfig>,
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    #[serde(default = "default_max_toc_depth")]
    pub max_toc_depth: usize,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            ingestor: IngestorConfig::default(),
            transformer: None,
            analyzer: None,
            report_path: default_report_path(),
            max_toc_depth: DEFAULT_MAX_TOC_DEPTH,
            title: default_title(),
        }
    }
}

impl ReporterConfig {
    /// Configuration for profiling `path` with the standard analyzers.
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self {
            ingestor: IngestorConfig {
                path: path.into(),
                parser: ParserConfig::default(),
            },
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SondeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&text)
    }
}
