//! Fixed-height text rendering of a [`Chart`].

use crate::adapters::format::price;
use crate::domain::chart::{Chart, ChartStyle};

pub const DEFAULT_HEIGHT: usize = 10;

/// Columns per price point.
const CELL: usize = 3;
const AXIS_WIDTH: usize = 9;

pub fn render_ascii(chart: &Chart, height: usize) -> String {
    let mut out = format!("{}\n", chart.title);
    let Some((lo, hi)) = chart.value_range() else {
        out.push_str("  (no data)\n");
        return out;
    };

    let height = height.max(2);
    let span = if hi > lo { hi - lo } else { 1.0 };
    let last_row = height - 1;
    let row_of = |value: f64| -> usize {
        let row = ((hi - value) / span * last_row as f64).round();
        (row.max(0.0) as usize).min(last_row)
    };

    let width = chart.prices.len() * CELL;
    let mut grid = vec![vec![' '; width]; height];
    let mut notes: Vec<Vec<String>> = vec![Vec::new(); height];

    for level in &chart.levels {
        let row = row_of(level.price);
        grid[row].iter_mut().for_each(|c| *c = '-');
        notes[row].push(format!("{} {}", level.label, price(level.price)));
    }

    for (i, &value) in chart.prices.iter().enumerate() {
        let col = i * CELL + 1;
        let top = row_of(value);
        match chart.style {
            ChartStyle::Line => grid[top][col] = '*',
            ChartStyle::Bars => {
                for row in grid.iter_mut().skip(top) {
                    row[col] = '#';
                }
            }
        }
    }

    for (r, cells) in grid.iter().enumerate() {
        let value = hi - span * r as f64 / last_row as f64;
        let mut line = format!("{value:>8.1} |{}", cells.iter().collect::<String>());
        if !notes[r].is_empty() {
            line.push_str("  ");
            line.push_str(&notes[r].join(", "));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("{}+{}\n", " ".repeat(AXIS_WIDTH - 1), "-".repeat(width)));
    let mut axis = " ".repeat(AXIS_WIDTH);
    for (x, _) in chart.points() {
        axis.push_str(&format!("{:^width$}", x, width = CELL));
    }
    out.push_str(axis.trim_end());
    out.push('\n');

    if let Some(marker) = &chart.marker {
        if marker.x >= 1 && marker.x <= chart.prices.len() {
            let col = AXIS_WIDTH + (marker.x - 1) * CELL + 1;
            out.push_str(&format!("{}^ {}\n", " ".repeat(col), marker.label));
        }
    }
    out
}
