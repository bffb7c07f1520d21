//! Text and JSON renderings of an analysis.
//!
//! The text report prints three boxed tables: nodal displacements, reactions at
//! supported nodes, and member forces. Column headers carry the customary
//! inch/kip units, although the solver itself is unit agnostic.

use std::fmt;

use serde::Serialize;

use crate::geometry::DOFS_PER_NODE;
use crate::model::StructuralModel;
use crate::results::{AnalysisResults, MemberResult};

/// Values with a smaller magnitude are printed as `0`.
const ZERO_THRESHOLD: f64 = 1.0e-10;
/// Narrowest column a table will print.
const MIN_COLUMN_WIDTH: usize = 3;

/// Number of decimal places used when printing results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(usize);

impl Precision {
    /// Fewest decimal places accepted.
    pub const MIN: usize = 1;
    /// Most decimal places accepted.
    pub const MAX: usize = 12;

    /// Create a precision when `places` lies in `1..=12`.
    ///
    /// # Examples
    /// ```
    /// use truss3d::Precision;
    ///
    /// assert_eq!(Precision::new(3).map(Precision::places), Some(3));
    /// assert_eq!(Precision::new(0), None);
    /// assert_eq!(Precision::new(13), None);
    /// ```
    #[must_use]
    pub fn new(places: i64) -> Option<Self> {
        let places = usize::try_from(places).ok()?;
        (Self::MIN..=Self::MAX)
            .contains(&places)
            .then_some(Self(places))
    }

    /// Number of decimal places.
    #[must_use]
    pub const fn places(self) -> usize {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(6)
    }
}

/// Format a value with fixed decimals, printing near-zero values as `0`.
///
/// # Examples
/// ```
/// use truss3d::{format_number, Precision};
///
/// let precision = Precision::new(3).expect("valid precision");
/// assert_eq!(format_number(1.23456, precision), "1.235");
/// assert_eq!(format_number(-4.0e-12, precision), "0");
/// ```
#[must_use]
pub fn format_number(value: f64, precision: Precision) -> String {
    if value.abs() < ZERO_THRESHOLD {
        "0".to_owned()
    } else {
        format!("{value:.prec$}", prec = precision.places())
    }
}

/// Whether a cell should be right aligned as a number.
fn is_numeric(cell: &str) -> bool {
    let mut chars = cell.chars();
    match chars.next() {
        Some(first) if first.is_ascii_digit() || first == '-' || first == '+' => chars
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+')),
        _ => false,
    }
}

/// A titled grid of cells whose first row is the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    title: String,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given title and header row.
    #[must_use]
    pub fn new(title: &str, header: &[&str]) -> Self {
        Self {
            title: title.to_owned(),
            rows: vec![header.iter().map(|&cell| cell.to_owned()).collect()],
        }
    }

    /// Append a data row.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Width of every column, at least [`MIN_COLUMN_WIDTH`].
    fn widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (0..columns)
            .map(|col| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .fold(MIN_COLUMN_WIDTH, usize::max)
            })
            .collect()
    }

    fn write_border(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
        f.write_str("+")?;
        for width in widths {
            write!(f, "{}+", "-".repeat(width + 2))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        writeln!(f, "\n{}:", self.title)?;
        Self::write_border(f, &widths)?;
        for (index, row) in self.rows.iter().enumerate() {
            f.write_str("|")?;
            for (col, &width) in widths.iter().enumerate() {
                let cell = row.get(col).map_or("", String::as_str);
                if is_numeric(cell) {
                    write!(f, " {cell:>width$} |")?;
                } else {
                    write!(f, " {cell:<width$} |")?;
                }
            }
            writeln!(f)?;
            if index == 0 {
                Self::write_border(f, &widths)?;
            }
        }
        Self::write_border(f, &widths)
    }
}

/// Three values of a node, formatted.
fn node_cells(values: &[f64], node: usize, precision: Precision) -> Vec<String> {
    let base = DOFS_PER_NODE * node;
    values[base..base + DOFS_PER_NODE]
        .iter()
        .map(|&value| format_number(value, precision))
        .collect()
}

/// Render the displacement, reaction and member tables of a solved model.
///
/// The reaction table lists only nodes with at least one restrained axis and is
/// omitted when no node is supported. The member table is omitted for a model
/// without members.
#[must_use]
pub fn render_tables(
    model: &StructuralModel,
    results: &AnalysisResults,
    precision: Precision,
) -> String {
    let displacements = results.displacements.to_vec();
    let reactions = results.reactions.to_vec();
    let mut output = String::new();

    let mut table = Table::new(
        "NODE DISPLACEMENTS",
        &["Node", "DX (in)", "DY (in)", "DZ (in)"],
    );
    for (index, node) in model.nodes().enumerate() {
        let mut row = vec![node.id.to_string()];
        row.extend(node_cells(&displacements, index, precision));
        table.push_row(row);
    }
    output.push_str(&table.to_string());

    if model.nodes().any(|node| node.is_supported()) {
        let mut table = Table::new(
            "NODE REACTIONS",
            &["Node", "RX (kips)", "RY (kips)", "RZ (kips)"],
        );
        for (index, node) in model.nodes().enumerate() {
            if node.is_supported() {
                let mut row = vec![node.id.to_string()];
                row.extend(node_cells(&reactions, index, precision));
                table.push_row(row);
            }
        }
        output.push_str(&table.to_string());
    }

    if model.member_count() > 0 {
        let mut table = Table::new(
            "MEMBER FORCES AND STRESSES",
            &[
                "Member",
                "Force (kips)",
                "Stress (ksi)",
                "Status",
                "Length (in)",
            ],
        );
        for (member, result) in model.members().zip(&results.members) {
            table.push_row(vec![
                member.member.id.to_string(),
                format_number(result.force, precision),
                format_number(result.stress, precision),
                result.state.to_string(),
                format_number(result.length, precision),
            ]);
        }
        output.push_str(&table.to_string());
    }

    output
}

/// Per-node entry of the JSON report.
#[derive(Debug, Serialize)]
struct NodeReport {
    id: i64,
    displacement: [f64; DOFS_PER_NODE],
    /// Present only for supported nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    reaction: Option<[f64; DOFS_PER_NODE]>,
}

/// Per-member entry of the JSON report.
#[derive(Debug, Serialize)]
struct MemberReport {
    id: i64,
    #[serde(flatten)]
    result: MemberResult,
}

#[derive(Debug, Serialize)]
struct JsonReport {
    nodes: Vec<NodeReport>,
    members: Vec<MemberReport>,
}

/// Render the results as pretty-printed JSON.
///
/// # Errors
///
/// Returns the `serde_json` serializer error. Non-finite values do not fail;
/// they are written as `null`.
pub fn render_json(
    model: &StructuralModel,
    results: &AnalysisResults,
) -> Result<String, serde_json::Error> {
    let triple = |values: &ndarray::Array1<f64>, node: usize| {
        let base = DOFS_PER_NODE * node;
        [values[base], values[base + 1], values[base + 2]]
    };
    let report = JsonReport {
        nodes: model
            .nodes()
            .enumerate()
            .map(|(index, node)| NodeReport {
                id: node.id,
                displacement: triple(&results.displacements, index),
                reaction: node
                    .is_supported()
                    .then(|| triple(&results.reactions, index)),
            })
            .collect(),
        members: model
            .members()
            .zip(&results.members)
            .map(|(member, result)| MemberReport {
                id: member.member.id,
                result: *result,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}
