//! HTML fragments shared by every section.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Glyph shown for analyses that did not apply.
pub const WARNING_GLYPH: &str = "&#9888;";

/// Clamp a heading index to a valid `<h1>`..`<h6>` level.
pub fn valid_h_tag(index: usize) -> usize {
    index.clamp(1, 6)
}

/// Anchor id for the section numbered `number` with path `tags`.
///
/// The number makes the id unique within a document; the slug of the path
/// only keeps it readable. `"1.2."` with `["a", "y"]` gives `s1_2-a-y`.
pub fn section_id(number: &str, tags: &[String]) -> String {
    let slug = tags.join("-").replace(' ', "-").to_lowercase();
    format!("s{}-{}", number.trim_end_matches('.').replace('.', "_"), slug)
}

/// Display title for a section path, innermost name first.
pub fn tags_to_title(tags: &[String]) -> String {
    tags.iter().rev().map(String::as_str).collect::<Vec<_>>().join(" | ")
}

/// Numbering of the `index`-th child (0-based) under `number`.
pub fn child_number(number: &str, index: usize) -> String {
    format!("{}{}.", number, index + 1)
}

/// Tags of a child section named `name`.
pub fn child_tags(tags: &[String], name: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(tags.len() + 1);
    out.extend_from_slice(tags);
    out.push(name.to_string());
    out
}

/// Section heading at the level matching `depth`.
///
/// A section without tags is the document root and has no heading.
pub fn heading(number: &str, tags: &[String], depth: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let level = valid_h_tag(depth + 1);
    format!(
        "<h{level} id=\"{id}\">{number} {title} </h{level}>",
        level = level,
        id = encode_double_quoted_attribute(&section_id(number, tags)),
        number = number,
        title = encode_text(&tags_to_title(tags)),
    )
}

/// Link back to the top of the document.
pub fn go_to_top() -> &'static str {
    "<a href=\"#\">Go to top</a>"
}

/// Heading plus the link back to the top; nothing for the root section.
pub fn section_header(number: &str, tags: &[String], depth: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }
    format!("{}\n{}", heading(number, tags, depth), go_to_top())
}

/// Join rendered blocks with newlines, dropping empty ones.
pub fn join_blocks(blocks: impl IntoIterator<Item = String>) -> String {
    blocks
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table of contents entry for a section without children.
///
/// Returns an empty string once `depth` reaches `max_depth`, and for the
/// root section, which has no tags.
pub fn toc_entry(number: &str, tags: &[String], depth: usize, max_depth: usize) -> String {
    let Some(tag) = tags.last() else {
        return String::new();
    };
    if depth >= max_depth {
        return String::new();
    }
    format!(
        "<li><a href=\"#{}\">{} {}</a></li>",
        encode_double_quoted_attribute(&section_id(number, tags)),
        number,
        encode_text(tag)
    )
}

/// Paragraph of escaped text.
pub fn paragraph(text: &str) -> String {
    format!("<p style=\"margin-top: 1rem;\">{}</p>", encode_text(text))
}

/// Simple HTML table; cells are escaped.
pub fn table<H, R, C>(headers: &[H], rows: R) -> String
where
    H: AsRef<str>,
    R: IntoIterator<Item = Vec<C>>,
    C: AsRef<str>,
{
    raw_table(
        headers,
        rows.into_iter().map(|row| {
            row.iter()
                .map(|cell| encode_text(cell.as_ref()).into_owned())
                .collect::<Vec<_>>()
        }),
    )
}

/// HTML table whose cells are already markup.
pub fn raw_table<H, R, C>(headers: &[H], rows: R) -> String
where
    H: AsRef<str>,
    R: IntoIterator<Item = Vec<C>>,
    C: AsRef<str>,
{
    let mut out = String::from("<table class=\"table table-hover table-responsive\">\n<thead><tr>");
    for header in headers {
        out.push_str(&format!("<th>{}</th>", encode_text(header.as_ref())));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", cell.as_ref()));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}

/// Escape text for use inside markup.
pub fn text(value: &str) -> String {
    encode_text(value).into_owned()
}

/// Horizontal bar proportional to `fraction` (0..=1).
pub fn bar(fraction: f64) -> String {
    let pct = if fraction.is_finite() {
        (fraction * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!(
        "<div class=\"bar\"><div class=\"bar-fill\" style=\"width: {:.1}%;\"></div></div>",
        pct
    )
}

/// Format a float for display; NaN is shown as `NaN`.
pub fn fmt_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.4}", value)
    }
}

/// Format a ratio as a percentage; empty denominators give `NaN`.
pub fn fmt_pct(numerator: usize, denominator: usize) -> String {
    if denominator == 0 {
        "NaN".to_string()
    } else {
        format!("{:.2} %", 100.0 * numerator as f64 / denominator as f64)
    }
}
