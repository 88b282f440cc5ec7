//! Plain-text rendering of value and policy tables.

use ndarray::Array2;

use super::action::Action;
use super::grid::{CellKind, Grid};

/// How policy cells are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyStyle {
    /// Numeric action code for every cell, walls and goals included
    #[default]
    Codes,
    /// Arrows for free cells, `#` for walls and `G` for goals
    Symbols,
}

/// One line per row, values right-aligned with four decimals.
pub fn values_table(grid: &Grid, values: &Array2<f64>) -> String {
    let cells: Vec<Vec<String>> = (0..grid.height())
        .map(|y| {
            (0..grid.width())
                .map(|x| format!("{:.4}", values[[y, x]]))
                .collect()
        })
        .collect();
    layout(&cells)
}

pub fn policy_table(grid: &Grid, policy: &Array2<Action>, style: PolicyStyle) -> String {
    let cells: Vec<Vec<String>> = (0..grid.height())
        .map(|y| {
            (0..grid.width())
                .map(|x| policy_cell(grid.cell_kind(x, y), policy[[y, x]], style))
                .collect()
        })
        .collect();
    layout(&cells)
}

fn policy_cell(kind: CellKind, action: Action, style: PolicyStyle) -> String {
    match (style, kind) {
        (PolicyStyle::Codes, _) => action.code().to_string(),
        (PolicyStyle::Symbols, CellKind::Free) => action.symbol().to_string(),
        (PolicyStyle::Symbols, CellKind::Wall) => "#".to_string(),
        (PolicyStyle::Symbols, CellKind::Goal) => "G".to_string(),
    }
}

fn layout(cells: &[Vec<String>]) -> String {
    let width = cells
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in cells {
        let padded: Vec<String> = row
            .iter()
            .map(|cell| format!("{:>width$}", cell, width = width))
            .collect();
        out.push_str(&padded.join(" "));
        out.push('\n');
    }
    out
}
