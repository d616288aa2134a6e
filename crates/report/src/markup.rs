//! Table-markup serialization
//!
//! Each sheet becomes a `tab-{index}` panel holding a table with a header
//! row (column name plus a filter input), one body row per normalized row
//! and an empty footer row the page fills in with totals.

use crate::normalize::NormalizedSheet;
use std::borrow::Cow;

/// Escape the characters that are significant in HTML text and attributes
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
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
    Cow::Owned(out)
}

fn text(value: &str, escape: bool) -> Cow<'_, str> {
    if escape {
        escape_html(value)
    } else {
        Cow::Borrowed(value)
    }
}

fn active_class(index: usize) -> &'static str {
    if index == 0 {
        " active"
    } else {
        ""
    }
}

/// Render the tab bar buttons; the first sheet starts active
#[must_use]
pub fn render_tab_buttons(sheets: &[NormalizedSheet], escape: bool) -> String {
    let mut html = String::new();
    for (i, sheet) in sheets.iter().enumerate() {
        html.push_str(&format!(
            r#"<button id="btn-{i}" class="tab-btn{active}" onclick="showTab({i})">{name}</button>"#,
            active = active_class(i),
            name = text(&sheet.name, escape),
        ));
    }
    html
}

/// Render one sheet as a tab panel containing its table
#[must_use]
pub fn render_sheet_table(index: usize, sheet: &NormalizedSheet, escape: bool) -> String {
    let mut html = format!(
        r#"<div id="tab-{index}" class="content{active}"><div class="tbl-wrap"><table><thead><tr>"#,
        active = active_class(index),
    );

    for column in &sheet.columns {
        html.push_str(&format!(
            r#"<th>{}<br><input class="filter-box" onkeyup="doFilter(this)" placeholder="Search..."></th>"#,
            text(&column.name, escape)
        ));
    }
    html.push_str("</tr></thead><tbody>");

    for row in &sheet.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&text(cell, escape));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody><tfoot><tr>");
    html.push_str(&"<td></td>".repeat(sheet.col_count()));
    html.push_str("</tr></tfoot></table></div></div>");
    html
}

/// Render every sheet's panel, in order
#[must_use]
pub fn render_sheet_tables(sheets: &[NormalizedSheet], escape: bool) -> String {
    sheets
        .iter()
        .enumerate()
        .map(|(i, sheet)| render_sheet_table(i, sheet, escape))
        .collect()
}
