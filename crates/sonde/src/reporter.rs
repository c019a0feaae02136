//! Report generation: ingest, transform, analyze, render, write.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{Dispatch, debug, info, instrument};

use crate::analyzer::{
    Analyzer, BoxAnalyzer, ChoiceAnalyzer, ColumnContinuousAnalyzer, ColumnDiscreteAnalyzer,
    ColumnTemporalNullValueAnalyzer, ContentAnalyzer, DataFrameSummaryAnalyzer, DataTypeAnalyzer,
    DuplicatedRowAnalyzer, MappingAnalyzer, NullValueAnalyzer, TableOfContentAnalyzer, selector,
};
use crate::config::{DEFAULT_MAX_TOC_DEPTH, IngestorConfig, ReporterConfig};
use crate::dataset::Dataset;
use crate::error::{Result, SondeError};
use crate::input::{Parser, SourceMetadata};
use crate::logging::LoggingConfig;
use crate::section::Statistics;
use crate::section::html::{table, text};
use crate::transform::{BoxTransformer, Transformer};

/// Rendered outcome of one report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    /// Statistics tree, shaped like the analyzer tree.
    pub statistics: Statistics,
    /// Table of contents fragment.
    pub toc: String,
    /// Body fragment.
    pub body: String,
    /// Ingested file, when the data came from one.
    pub source: Option<SourceMetadata>,
}

impl Report {
    /// The complete standalone HTML document.
    pub fn to_html(&self) -> String {
        let source = match &self.source {
            Some(source) => table(
                &["file", "format", "rows", "columns", "size (bytes)", "sha256", "ingested at"],
                [vec![
                    source.file.clone(),
                    source.format.clone(),
                    source.row_count.to_string(),
                    source.column_count.to_string(),
                    source.size_bytes.to_string(),
                    source.hash.clone(),
                    source.ingested_at.to_rfc3339(),
                ]],
            ),
            None => String::new(),
        };
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem auto; max-width: 72rem; }}
table {{ border-collapse: collapse; margin: 1rem 0; }}
th, td {{ border: 1px solid #ddd; padding: 0.25rem 0.5rem; text-align: left; }}
nav ul {{ list-style: none; padding-left: 1rem; }}
.bar {{ background: #eee; width: 10rem; height: 0.75rem; }}
.bar-fill {{ background: #4a7bd0; height: 100%; }}
</style>
</head>
<body>
<h1 id="top">{title}</h1>
{source}
<nav>
<h2>Table of contents</h2>
{toc}
</nav>
<main>
{body}
</main>
</body>
</html>
"#,
            title = text(&self.title),
            source = source,
            toc = self.toc,
            body = self.body,
        )
    }

    /// Write the HTML document, creating parent directories.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SondeError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(path, self.to_html()).map_err(|e| SondeError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Runs a report: parse the input, apply the transformer, analyze once,
/// render once.
///
/// Diagnostics go to the reporter's own dispatcher when one is set, and to
/// whatever subscriber the caller installed otherwise.
#[derive(Debug)]
pub struct Reporter {
    ingestor: IngestorConfig,
    transformer: Option<BoxTransformer>,
    analyzer: Option<BoxAnalyzer>,
    report_path: PathBuf,
    max_toc_depth: usize,
    title: String,
    dispatch: Option<Dispatch>,
}

impl Reporter {
    /// Build every transformer and analyzer of the configuration.
    pub fn new(config: ReporterConfig) -> Result<Self> {
        let transformer = config.transformer.as_ref().map(|t| t.build()).transpose()?;
        let analyzer = config.analyzer.as_ref().map(|a| a.build()).transpose()?;
        Ok(Self {
            ingestor: config.ingestor,
            transformer,
            analyzer,
            report_path: config.report_path,
            max_toc_depth: config.max_toc_depth,
            title: config.title,
            dispatch: None,
        })
    }

    /// Assemble a reporter from an ingestor and an analyzer built in code.
    pub fn from_parts(ingestor: IngestorConfig, analyzer: impl Analyzer + 'static) -> Self {
        let defaults = ReporterConfig::default();
        Self {
            ingestor,
            transformer: None,
            analyzer: Some(Box::new(analyzer)),
            report_path: defaults.report_path,
            max_toc_depth: DEFAULT_MAX_TOC_DEPTH,
            title: defaults.title,
            dispatch: None,
        }
    }

    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer = Some(Box::new(transformer));
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    pub fn with_max_toc_depth(mut self, max_toc_depth: usize) -> Self {
        self.max_toc_depth = max_toc_depth;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Send diagnostics of this reporter to `dispatch`.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn with_logging(self, config: &LoggingConfig) -> Self {
        let dispatch = config.build_dispatch();
        self.with_dispatch(dispatch)
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Parse the input and produce the report, without writing it.
    pub fn compute(&self) -> Result<Report> {
        self.in_scope(|| {
            let parser = Parser::with_config(self.ingestor.parser.clone());
            let (dataset, source) = parser.parse_file(&self.ingestor.path)?;
            self.build_report(dataset, Some(source))
        })
    }

    /// Produce the report for an in-memory dataset.
    pub fn profile(&self, dataset: Dataset) -> Result<Report> {
        self.in_scope(|| self.build_report(dataset, None))
    }

    /// Compute the report and write it to the report path.
    pub fn run(&self) -> Result<Report> {
        let report = self.compute()?;
        self.in_scope(|| {
            report.write(&self.report_path)?;
            info!(path = %self.report_path.display(), "report written");
            Ok(report)
        })
    }

    fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    #[instrument(skip_all, fields(rows = dataset.row_count(), columns = dataset.column_count()))]
    fn build_report(&self, dataset: Dataset, source: Option<SourceMetadata>) -> Result<Report> {
        let dataset = match &self.transformer {
            Some(transformer) => {
                debug!(transformer = %transformer.description(), "transforming dataset");
                transformer.transform(&dataset)?
            }
            None => dataset,
        };

        let section = match &self.analyzer {
            Some(analyzer) => analyzer.analyze(&dataset)?,
            None => default_analyzer(&dataset).analyze(&dataset)?,
        };
        info!("analysis complete");

        Ok(Report {
            title: self.title.clone(),
            statistics: section.get_statistics(),
            toc: section.render_root_toc(self.max_toc_depth),
            body: section.render_root_body(),
            source,
        })
    }
}

/// The standard profile of a dataset.
///
/// A summary, null values, duplicated rows and data types, then one entry per
/// column picked by [`selector::column_kind`]. When the dataset has a datetime
/// column, null values of every other column are also tracked over time.
pub fn default_analyzer(dataset: &Dataset) -> MappingAnalyzer {
    let mut columns = MappingAnalyzer::new().with_max_toc_depth(Some(1));
    for name in dataset.column_names() {
        let choice = ChoiceAnalyzer::with_selection(selector::by_column_kind(name))
            .with(selector::CONTINUOUS, ColumnContinuousAnalyzer::new(name))
            .with(selector::DISCRETE, ColumnDiscreteAnalyzer::new(name))
            .with(selector::TEMPORAL, ColumnDiscreteAnalyzer::new(name))
            .with(
                selector::MISSING,
                ContentAnalyzer::new(format!("<p>Column {} is not in the dataset.</p>", text(name))),
            );
        columns = columns.with(name, choice);
    }

    let mut analyzer = MappingAnalyzer::new()
        .with("summary", TableOfContentAnalyzer::new(DataFrameSummaryAnalyzer::new()))
        .with("null values", NullValueAnalyzer::new())
        .with("duplicated rows", DuplicatedRowAnalyzer::new())
        .with("data types", TableOfContentAnalyzer::new(DataTypeAnalyzer::new()))
        .with("columns", columns);

    let dt_column = dataset
        .column_names()
        .into_iter()
        .find(|name| selector::column_kind(dataset, name) == selector::TEMPORAL);
    if let Some(dt_column) = dt_column {
        let mut temporal = MappingAnalyzer::new().with_max_toc_depth(Some(1));
        for name in dataset.column_names().into_iter().filter(|n| *n != dt_column) {
            temporal = temporal.with(name, ColumnTemporalNullValueAnalyzer::new(name, dt_column));
        }
        analyzer = analyzer.with("temporal null values", temporal);
    }
    analyzer
}
