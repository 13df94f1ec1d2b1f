//! Fixed-width rendering of search results

use crate::search::Match;

const HEADERS: [&str; 4] = ["id", "type", "title", "author"];

/// Render matches as a left-aligned table: id, type, title, first author.
/// Column widths size to the widest cell; a dash row separates the header
/// from the body.
pub fn render_table(matches: &[Match]) -> String {
    let rows: Vec<[String; 4]> = matches
        .iter()
        .map(|m| {
            [
                m.entry.id.clone(),
                m.entry.entry_type.clone(),
                m.entry.apa7.title.clone(),
                m.entry
                    .first_author()
                    .map(|author| author.bibtex_name())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths = [0usize; 4];
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = header.chars().count();
    }
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let dashes = widths.map(|w| "-".repeat(w));
    push_row(&mut out, &dashes, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        if i + 1 < cells.len() {
            let pad = widths[i].saturating_sub(cell.chars().count());
            line.extend(std::iter::repeat(' ').take(pad));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
