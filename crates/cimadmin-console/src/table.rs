//! In-memory table: header, ordered rows, striping and output formats.

use crate::kind::{SortPolicy, StripeRule};

pub const TRUE_GLYPH: &str = "\u{2714}";
pub const FALSE_GLYPH: &str = "\u{2718}";

/// One table cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Boolean-like value, shown as a glyph
    Flag(bool),
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Flag(true) => TRUE_GLYPH,
            Cell::Flag(false) => FALSE_GLYPH,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    /// Element id, `row_<reference>`
    pub id: String,
    pub cells: Vec<Cell>,
    pub background: Option<&'static str>,
}

impl TableRow {
    pub fn new(reference: &str, cells: Vec<Cell>) -> Self {
        Self {
            id: format!("row_{}", reference),
            cells,
            background: None,
        }
    }

    /// Text of the first column, the row's sort key
    pub fn key(&self) -> &str {
        self.cells.first().map(Cell::text).unwrap_or("")
    }
}

#[derive(Clone, Debug)]
pub struct Table {
    id: &'static str,
    headers: &'static [&'static str],
    stripe: StripeRule,
    rows: Vec<TableRow>,
}

impl Table {
    pub fn new(id: &'static str, headers: &'static [&'static str], stripe: StripeRule) -> Self {
        Self {
            id,
            headers,
            stripe,
            rows: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        self.id
    }

    pub fn headers(&self) -> &[&'static str] {
        self.headers
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Drop every data row; the header stays
    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    /// Insert a row and return its index.
    ///
    /// Ascending order scans linearly for the first row whose key is greater
    /// than the new key; equal keys go after the existing ones.
    pub fn insert(&mut self, row: TableRow, policy: SortPolicy) -> usize {
        let index = match policy {
            SortPolicy::Ascending => self
                .rows
                .iter()
                .position(|existing| row.key() < existing.key())
                .unwrap_or(self.rows.len()),
            SortPolicy::Arrival => self.rows.len(),
        };
        self.rows.insert(index, row);
        index
    }

    /// Recolor every data row after insertion is complete
    pub fn apply_stripes(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.background = self.stripe.color_for(index);
        }
    }

    pub fn to_html(&self) -> String {
        let id = htmlescape::encode_minimal(self.id);
        let mut html = format!("<table id=\"{}\">\n<tr>", id);
        for header in self.headers {
            html.push_str("<th>");
            html.push_str(&htmlescape::encode_minimal(header));
            html.push_str("</th>");
        }
        html.push_str("</tr>\n");

        for row in &self.rows {
            html.push_str(&format!("<tr id=\"{}\"", htmlescape::encode_minimal(&row.id)));
            if let Some(color) = row.background {
                html.push_str(&format!(" style=\"background-color:{}\"", color));
            }
            html.push('>');
            for cell in &row.cells {
                match cell {
                    Cell::Text(text) => {
                        html.push_str("<td>");
                        html.push_str(&htmlescape::encode_minimal(text));
                    }
                    Cell::Flag(_) => {
                        html.push_str("<td class=\"flag\">");
                        html.push_str(cell.text());
                    }
                }
                html.push_str("</td>");
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</table>\n");
        html
    }

    /// Column-aligned plain text
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.cells.iter().enumerate() {
                let width = cell.text().chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(width),
                    None => widths.push(width),
                }
            }
        }

        let mut out = String::new();
        let header: Vec<&str> = self.headers.to_vec();
        push_line(&mut out, &header, &widths);
        for row in &self.rows {
            let cells: Vec<&str> = row.cells.iter().map(Cell::text).collect();
            push_line(&mut out, &cells, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let pad = widths[i].saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
