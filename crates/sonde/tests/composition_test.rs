//! Composition tests for analyzers and sections.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use sonde::analyzer::{
    ChoiceAnalyzer, ColumnContinuousAnalyzer, ColumnDiscreteAnalyzer, ColumnSubsetAnalyzer,
    ContentAnalyzer, DuplicatedRowAnalyzer, FilteredAnalyzer, MappingAnalyzer, NullValueAnalyzer,
    TableOfContentAnalyzer, TransformAnalyzer,
};
use sonde::transform::SelectColumns;
use sonde::{Analyzer, Dataset, Result, Section, Value};

/// Analyzer that counts its invocations.
#[derive(Debug)]
struct Recording {
    calls: Arc<AtomicUsize>,
}

impl Recording {
    fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl Analyzer for Recording {
    fn analyze(&self, _dataset: &Dataset) -> Result<Section> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Section::empty())
    }
}

/// Four rows, one duplicated row, one null cell.
fn people() -> Dataset {
    Dataset::new([
        (
            "name",
            vec![
                Value::from("ann"),
                Value::from("bob"),
                Value::from("ann"),
                Value::from("cid"),
            ],
        ),
        (
            "age",
            vec![
                Value::Integer(31),
                Value::Integer(45),
                Value::Integer(31),
                Value::Null,
            ],
        ),
    ])
    .unwrap()
}

// =============================================================================
// Statistics shape
// =============================================================================

#[test]
fn test_null_and_duplicate_scenario() {
    let analyzer = MappingAnalyzer::new()
        .with("null", NullValueAnalyzer::new())
        .with("dup", DuplicatedRowAnalyzer::new());
    let stats = analyzer.analyze(&people()).unwrap().get_statistics();

    assert_eq!(stats.keys().collect::<Vec<_>>(), vec!["null", "dup"]);
    assert_eq!(stats["dup"], json!({"num_rows": 4, "num_unique_rows": 3}));
    assert_eq!(
        stats["null"],
        json!({"columns": ["name", "age"], "null_count": [0, 1], "total_count": [4, 4]})
    );
}

#[test]
fn test_nested_statistics_mirror_tree() {
    let analyzer = MappingAnalyzer::new()
        .with("content", ContentAnalyzer::new("<p>hello</p>"))
        .with(
            "columns",
            MappingAnalyzer::new()
                .with("age", ColumnContinuousAnalyzer::new("age"))
                .with("name", ColumnDiscreteAnalyzer::new("name"))
                .with("missing", ColumnDiscreteAnalyzer::new("missing")),
        );
    let stats = analyzer.analyze(&people()).unwrap().get_statistics();

    assert_eq!(stats["content"], json!({}));
    let columns = stats["columns"].as_object().unwrap();
    assert_eq!(columns.keys().collect::<Vec<_>>(), vec!["age", "name", "missing"]);
    assert_eq!(columns["missing"], json!({}));
    assert_eq!(columns["name"]["most_common"][0], json!(["ann", 2]));
}

#[test]
fn test_leaf_analyzers_on_absent_column() {
    let dataset = people();
    let leaves: Vec<Box<dyn Analyzer>> = vec![
        Box::new(ColumnContinuousAnalyzer::new("height")),
        Box::new(ColumnDiscreteAnalyzer::new("height")),
        Box::new(DuplicatedRowAnalyzer::new().with_columns(["height"])),
        Box::new(ColumnSubsetAnalyzer::new(["height"], NullValueAnalyzer::new())),
    ];
    for leaf in leaves {
        let section = leaf.analyze(&dataset).unwrap();
        assert!(section.is_empty(), "{:?} should be empty", leaf);
        assert!(section.get_statistics().is_empty());
    }
}

// =============================================================================
// Choice
// =============================================================================

#[test]
fn test_choice_runs_only_selected_branch() {
    let (small, small_calls) = Recording::new();
    let (large, large_calls) = Recording::new();
    let analyzer = ChoiceAnalyzer::new(|d: &Dataset| {
        if d.row_count() < 10 { "small" } else { "large" }.to_string()
    })
    .with("small", small)
    .with("large", large);

    analyzer.analyze(&people()).unwrap();
    analyzer.analyze(&people()).unwrap();

    assert_eq!(small_calls.load(Ordering::SeqCst), 2);
    assert_eq!(large_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_choice_statistics_match_selected_branch() {
    let analyzer = ChoiceAnalyzer::new(|_: &Dataset| "dup".to_string())
        .with("null", NullValueAnalyzer::new())
        .with("dup", DuplicatedRowAnalyzer::new());
    let direct = DuplicatedRowAnalyzer::new().analyze(&people()).unwrap();
    assert_eq!(
        analyzer.analyze(&people()).unwrap().get_statistics(),
        direct.get_statistics()
    );
}

// =============================================================================
// Copy-not-mutate
// =============================================================================

#[test]
fn test_siblings_see_original_dataset() {
    let analyzer = MappingAnalyzer::new()
        .with(
            "adults",
            FilteredAnalyzer::new("age > 40", DuplicatedRowAnalyzer::new()).unwrap(),
        )
        .with(
            "ages",
            TransformAnalyzer::new(SelectColumns::new(["age"]), NullValueAnalyzer::new()),
        )
        .with("all", DuplicatedRowAnalyzer::new());
    let dataset = people();
    let before = dataset.clone();
    let stats = analyzer.analyze(&dataset).unwrap().get_statistics();

    assert_eq!(stats["adults"]["num_rows"], json!(1));
    assert_eq!(stats["ages"]["columns"], json!(["age"]));
    assert_eq!(stats["all"]["num_rows"], json!(4));
    assert_eq!(dataset, before);
}

// =============================================================================
// Numbering and table of contents
// =============================================================================

fn numbered() -> Section {
    MappingAnalyzer::new()
        .with(
            "a",
            MappingAnalyzer::new()
                .with("x", ContentAnalyzer::new("x"))
                .with("y", ContentAnalyzer::new("y")),
        )
        .with("b", ContentAnalyzer::new("b"))
        .with("c", ContentAnalyzer::new("c"))
        .analyze(&people())
        .unwrap()
}

#[test]
fn test_numbering() {
    let section = numbered();
    let toc = section.render_root_toc(6);
    for entry in [
        "<a href=\"#s1-a\">1. a</a>",
        "<a href=\"#s1_1-a-x\">1.1. x</a>",
        "<a href=\"#s1_2-a-y\">1.2. y</a>",
        "<a href=\"#s2-b\">2. b</a>",
        "<a href=\"#s3-c\">3. c</a>",
    ] {
        assert!(toc.contains(entry), "missing {} in {}", entry, toc);
    }

    let body = section.render_root_body();
    assert!(body.contains("<h2 id=\"s1-a\">1. a </h2>"));
    assert!(body.contains("<h3 id=\"s1_2-a-y\">1.2. y | a </h3>"));
    assert!(body.contains("<h2 id=\"s3-c\">3. c </h2>"));
}

#[test]
fn test_numbering_under_parent_prefix() {
    let section = numbered();
    let body = section.render_html_body("4.", &["root".to_string()], 0);
    assert!(body.contains("4.1.2. y"));
    let toc = section.render_html_toc("4.", &["root".to_string()], 0, 6);
    assert!(toc.contains("4.3. c"));
}

#[test]
fn test_toc_cutoff_keeps_body() {
    let section = numbered();
    assert_eq!(section.render_root_toc(1), "");

    let toc = section.render_root_toc(2);
    assert!(toc.contains("1. a"));
    assert!(!toc.contains("1.1. x"));
    assert!(section.render_root_body().contains("1.1. x"));

    assert_eq!(section.render_html_toc("", &[], 3, 3), "");
}

#[test]
fn test_forced_toc_entry() {
    let analyzer = MappingAnalyzer::new().with(
        "outer",
        MappingAnalyzer::new()
            .with("summary", TableOfContentAnalyzer::new(ContentAnalyzer::new("s")))
            .with("plain", ContentAnalyzer::new("p")),
    );
    let section = analyzer.analyze(&people()).unwrap();
    let toc = section.render_root_toc(2);
    assert!(toc.contains("1. outer"));
    // Plain children stop at the cutoff; the forced one shows anyway.
    assert!(toc.contains("1.1. summary"));
    assert!(!toc.contains("1.2. plain"));
}

#[test]
fn test_mapping_toc_depth_limit() {
    let analyzer = MappingAnalyzer::new().with(
        "columns",
        MappingAnalyzer::new()
            .with("age", MappingAnalyzer::new().with("detail", ContentAnalyzer::new("d")))
            .with_max_toc_depth(Some(1)),
    );
    let toc = analyzer.analyze(&people()).unwrap().render_root_toc(6);
    assert!(toc.contains("1.1. age"));
    assert!(!toc.contains("1.1.1. detail"));
}

#[test]
fn test_empty_section_rendering() {
    let section = MappingAnalyzer::new()
        .with("gone", ColumnDiscreteAnalyzer::new("missing"))
        .analyze(&people())
        .unwrap();
    let toc = section.render_root_toc(6);
    assert!(toc.contains("&#9888; gone"));
    assert!(!toc.contains("1. gone"));
    assert!(section.render_root_body().contains("&#9888;"));
}

#[test]
fn test_render_is_idempotent() {
    let section = numbered();
    assert_eq!(section.render_root_body(), section.render_root_body());
    assert_eq!(section.render_root_toc(2), section.render_root_toc(2));
}

#[test]
fn test_leaf_as_root_renders_without_heading() {
    let leaves: Vec<Box<dyn Analyzer>> = vec![
        Box::new(NullValueAnalyzer::new()),
        Box::new(DuplicatedRowAnalyzer::new()),
        Box::new(ColumnDiscreteAnalyzer::new("name")),
        Box::new(ColumnContinuousAnalyzer::new("age")),
        Box::new(ContentAnalyzer::new("<p>notes</p>")),
    ];
    for leaf in leaves {
        let section = leaf.analyze(&people()).unwrap();
        let body = section.render_root_body();
        assert!(!body.contains("<h1"), "{:?} rendered a heading", leaf);
        assert!(!body.contains("id=\"\""));
        assert!(!body.contains("Go to top"));
        assert!(!body.starts_with('\n'));
        assert_eq!(section.render_root_toc(6), "", "{:?} rendered an entry", leaf);
    }
}

/// Values of every `attr="..."` in the document.
fn attribute_values<'a>(html: &'a str, attr: &str) -> Vec<&'a str> {
    let marker = format!("{}=\"", attr);
    html.split(marker.as_str())
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect()
}

#[test]
fn test_anchor_ids_are_unique() {
    let section = MappingAnalyzer::new()
        .with("a", MappingAnalyzer::new().with("b", NullValueAnalyzer::new()))
        .with("a b", NullValueAnalyzer::new())
        .with("A", ContentAnalyzer::new("upper"))
        .analyze(&people())
        .unwrap();
    let body = section.render_root_body();
    let toc = section.render_root_toc(6);

    let mut ids = attribute_values(&body, "id");
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "duplicate ids in {:?}", ids);

    // Every link lands on exactly one heading.
    let links = attribute_values(&toc, "href");
    assert_eq!(links.len(), 4);
    for link in links {
        let target = link.trim_start_matches('#');
        assert_eq!(ids.iter().filter(|id| **id == target).count(), 1, "{}", link);
    }
}
