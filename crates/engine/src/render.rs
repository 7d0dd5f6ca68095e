//! HTML rendering of decoded text arrays.
//!
//! Scalars render as a single sanitized fragment. Vectors and matrices render
//! as an HTML table with one sanitized fragment per cell. Higher-rank arrays
//! are cut down to their leading 2-d slice, with a warning paragraph in front.

use textboard_core::{Renderer, TextArray};

/// Renderer that escapes HTML and wraps each paragraph in `<p>`.
///
/// Paragraphs are separated by blank lines. It performs no markup
/// interpretation; hosts with a markdown sanitizer plug theirs in instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapingRenderer;

impl Renderer for EscapingRenderer {
    fn render(&self, text: &str) -> String {
        text.split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| format!("<p>{}</p>", escape_html(p)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn dimensionality_warning(rank: usize) -> String {
    format!(
        "<p><strong>Warning:</strong> This text summary contained data of \
         dimensionality {}, but only 2d tables are supported. Showing a 2d \
         slice of the data instead.</p>",
        rank
    )
}

/// Render a text array as HTML.
pub fn text_array_to_html(array: &TextArray, renderer: &dyn Renderer) -> String {
    if array.rank() == 0 {
        return array
            .values()
            .first()
            .map(|text| renderer.render(text))
            .unwrap_or_default();
    }
    if array.is_empty() {
        return String::new();
    }

    let mut html = String::new();
    let table = if array.rank() > 2 {
        html.push_str(&dimensionality_warning(array.rank()));
        array.leading_2d_slice()
    } else {
        array.clone()
    };

    let rows: Vec<Vec<String>> = if table.rank() == 1 {
        table
            .values()
            .iter()
            .map(|cell| vec![renderer.render(cell)])
            .collect()
    } else {
        (0..table.shape()[0])
            .map(|i| table.row(i).iter().map(|cell| renderer.render(cell)).collect())
            .collect()
    };
    html.push_str(&make_table(&rows));
    html
}

/// Build an HTML table from already-rendered cells.
pub fn make_table(rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table>\n<tbody>\n");
    for row in rows {
        html.push_str("<tr>\n");
        for cell in row {
            html.push_str("<td>");
            html.push_str(cell);
            html.push_str("</td>\n");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}
