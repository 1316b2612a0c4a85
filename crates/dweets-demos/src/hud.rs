//! Info panel text shared by the demos.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Color of info panel text.
pub const INFO_COLOR: Color = Color::Rgb(200, 200, 200);

/// Lay out label/value rows as a two column table.
///
/// Labels are right-aligned against the values, values right-aligned against
/// the panel edge.
pub fn table(rows: &[(&str, String)]) -> Vec<Line<'static>> {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);

    rows.iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:>label_width$} "), Style::new().dark_gray()),
                Span::styled(format!("{value:>value_width$}"), Style::new().fg(INFO_COLOR)),
            ])
        })
        .collect()
}

/// A single plain line of info text.
pub fn line(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::new().fg(INFO_COLOR)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_alignment() {
        let lines = table(&[("time", "1.00".into()), ("nstars", "2000".into())]);
        assert_eq!(lines.len(), 2);
        let widths: Vec<usize> = lines.iter().map(|l| l.width()).collect();
        assert_eq!(widths[0], widths[1]);
        assert_eq!(lines[0].spans[0].content, "  time ");
    }
}
