//! Sonde: profiling reports for tabular datasets.
//!
//! A report is described as a tree of [`Analyzer`]s. Running the tree over a
//! [`Dataset`] yields a tree of [`Section`]s with the same shape, which can
//! report its statistics and render itself as HTML at any position in a
//! document.
//!
//! # Core Principles
//!
//! - **Composable**: combinators run children in sequence, pick one by the
//!   data, filter rows, transform values or project columns
//! - **Non-destructive**: analyzers never modify the dataset they receive
//! - **Forgiving about data, strict about configuration**: an analysis that
//!   does not apply yields an empty section, a broken configuration aborts
//!
//! # Example
//!
//! ```
//! use sonde::analyzer::{ColumnContinuousAnalyzer, MappingAnalyzer, NullValueAnalyzer};
//! use sonde::{Analyzer, Dataset, Value};
//!
//! let dataset = Dataset::new([
//!     ("age", vec![Value::Integer(31), Value::Null, Value::Integer(45)]),
//! ]).unwrap();
//!
//! let analyzer = MappingAnalyzer::new()
//!     .with("null values", NullValueAnalyzer::new())
//!     .with("age", ColumnContinuousAnalyzer::new("age"));
//!
//! let section = analyzer.analyze(&dataset).unwrap();
//! println!("{}", serde_json::Value::Object(section.get_statistics()));
//! let toc = section.render_root_toc(2);
//! let body = section.render_root_body();
//! assert!(toc.contains("1. null values"));
//! assert!(body.contains("2. age"));
//! ```

pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod error;
pub mod input;
pub mod logging;
pub mod section;
pub mod stats;
pub mod transform;

mod reporter;

pub use analyzer::Analyzer;
pub use config::{AnalyzerConfig, ReporterConfig};
pub use dataset::{Dataset, Query, Value};
pub use error::{Result, SondeError};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use logging::LoggingConfig;
pub use reporter::{Report, Reporter, default_analyzer};
pub use section::{Section, Statistics};
pub use transform::Transformer;
