//! Property-based tests for section numbering and rendering.
//!
//! Section trees are generated at random and rendered; the properties check
//! that numbering, depth truncation and idempotence hold for any shape.
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p sonde --test property_tests
//! ```

use indexmap::IndexMap;
use proptest::prelude::*;

use sonde::analyzer::{DuplicatedRowAnalyzer, NullValueAnalyzer};
use sonde::section::{ContentSection, Section, SectionDict};
use sonde::{Analyzer, Dataset, Value};

// =============================================================================
// Test Strategies
// =============================================================================

/// Section trees up to four levels deep with unique child names.
fn section_tree() -> impl Strategy<Value = Section> {
    let leaf = "[a-z]{1,6}".prop_map(|c| Section::from(ContentSection::new(c)));
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|children| {
            let sections: IndexMap<String, Section> = children
                .into_iter()
                .enumerate()
                .map(|(i, child)| (format!("s{}", i), child))
                .collect();
            Section::Dict(SectionDict::new(sections))
        })
    })
}

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (0i64..4).prop_map(Value::Integer),
        "[ab]".prop_map(Value::Text),
    ]
}

fn dataset() -> impl Strategy<Value = Dataset> {
    (0usize..20).prop_flat_map(|rows| {
        (
            prop::collection::vec(cell(), rows),
            prop::collection::vec(cell(), rows),
        )
            .prop_map(|(a, b)| Dataset::new([("a", a), ("b", b)]).unwrap())
    })
}

/// Depth of the deepest node, the root being 0.
fn height(section: &Section) -> usize {
    match section {
        Section::Dict(dict) => dict
            .sections()
            .values()
            .map(|child| 1 + height(child))
            .max()
            .unwrap_or(0),
        _ => 0,
    }
}

/// Number and title of every node below the root, as its parent numbers it.
fn numbered_nodes(section: &Section, number: &str, tags: &[String]) -> Vec<(String, String)> {
    let mut nodes = Vec::new();
    if let Section::Dict(dict) = section {
        for (i, (name, child)) in dict.sections().iter().enumerate() {
            let child_number = format!("{}{}.", number, i + 1);
            let mut child_tags = tags.to_vec();
            child_tags.push(name.clone());
            let title = child_tags.iter().rev().cloned().collect::<Vec<_>>().join(" | ");
            nodes.push((child_number.clone(), title));
            nodes.extend(numbered_nodes(child, &child_number, &child_tags));
        }
    }
    nodes
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_render_is_idempotent(section in section_tree(), max_depth in 0usize..6) {
        prop_assert_eq!(section.render_root_body(), section.render_root_body());
        prop_assert_eq!(section.render_root_toc(max_depth), section.render_root_toc(max_depth));
    }

    #[test]
    fn prop_toc_empty_at_cutoff(section in section_tree(), depth in 0usize..6) {
        prop_assert_eq!(section.render_html_toc("", &[], depth, depth), "");
    }

    #[test]
    fn prop_toc_entries_bounded_by_depth(section in section_tree(), max_depth in 1usize..6) {
        let toc = section.render_root_toc(max_depth);
        // Every entry number has one dot per level.
        for entry in toc.lines().filter(|l| l.contains("<li>")) {
            let label = entry.split("\">").nth(1).unwrap_or("");
            let number = label.split(' ').next().unwrap_or("");
            prop_assert!(number.matches('.').count() < max_depth);
        }
    }

    #[test]
    fn prop_body_expands_fully(section in section_tree(), max_depth in 1usize..4) {
        let body = section.render_root_body();
        let toc = section.render_root_toc(max_depth);
        let nodes = numbered_nodes(&section, "", &[]);

        // Every node gets a heading, whatever the depth.
        for (number, title) in &nodes {
            let heading = format!(">{} {} </h", number, title);
            prop_assert!(body.contains(&heading), "missing {}", heading);
        }

        // Nodes at or past the cutoff are left out of the table of contents
        // but are still in the body.
        let hidden: Vec<_> = nodes
            .iter()
            .filter(|(number, _)| number.matches('.').count() >= max_depth)
            .collect();
        if height(&section) >= max_depth {
            prop_assert!(!hidden.is_empty());
        }
        for (number, _) in hidden {
            let entry = format!("\">{} ", number);
            prop_assert!(!toc.contains(&entry), "{} listed past the cutoff", number);
        }
    }

    #[test]
    fn prop_duplicate_counts_bounded(data in dataset()) {
        let stats = DuplicatedRowAnalyzer::new().analyze(&data).unwrap().get_statistics();
        let rows = stats["num_rows"].as_u64().unwrap();
        let unique = stats["num_unique_rows"].as_u64().unwrap();
        prop_assert_eq!(rows as usize, data.row_count());
        prop_assert!(unique <= rows);
        prop_assert!(rows == 0 || unique >= 1);
    }

    #[test]
    fn prop_null_counts_bounded(data in dataset()) {
        let stats = NullValueAnalyzer::new().analyze(&data).unwrap().get_statistics();
        let nulls = stats["null_count"].as_array().unwrap();
        let totals = stats["total_count"].as_array().unwrap();
        prop_assert_eq!(nulls.len(), 2);
        for (n, t) in nulls.iter().zip(totals) {
            prop_assert!(n.as_u64().unwrap() <= t.as_u64().unwrap());
        }
    }
}
