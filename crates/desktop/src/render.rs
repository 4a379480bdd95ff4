//! Plain-text table output.

use erpdesk_collection::Derived;
use erpdesk_core::Record;

/// Cells wider than this are cut and marked with `…`.
const MAX_CELL: usize = 32;

fn clip(text: String) -> String {
    if text.chars().count() <= MAX_CELL {
        return text;
    }
    let mut clipped: String = text.chars().take(MAX_CELL - 1).collect();
    clipped.push('…');
    clipped
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Render the visible rows with a header and a page footer.
pub fn table<R: Record>(derived: &Derived<'_, R>) -> String {
    let columns = R::columns();
    let rows: Vec<Vec<String>> = derived
        .visible
        .iter()
        .map(|r| columns.iter().map(|c| clip(r.field(c).display())).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(c.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&line(columns.iter().copied(), &widths));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    if rows.is_empty() {
        out.push_str("(no matching records)\n");
    }
    out.push_str(&format!(
        "page {} of {} · {} matching\n",
        derived.page, derived.total_pages, derived.filtered_count
    ));
    out
}
