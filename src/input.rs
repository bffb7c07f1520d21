//! Loader for the comma separated record format.
//!
//! Each non-blank line that does not start with `#` is one record. The number
//! of non-empty fields selects the record type:
//!
//! ```text
//! # node:   id, x, y, z, fix_x, fix_y, fix_z, load_x, load_y, load_z
//! 1, 0, 0, 0, 1, 1, 1, 0, 0, 0
//! 2, 10, 0, 0, 0, 1, 1, 100, 0, 0
//! # member: id, start_node, end_node, E, A
//! 1, 1, 2, 29000, 1
//! ```
//!
//! Records with any other field count are skipped with a warning. Nodes are
//! registered before members, so members may appear anywhere in the file.
//! Ids and fix flags are truncated toward zero, so a flag of `0.5` leaves the
//! axis free. Every field must be a finite number.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::errors::InputError;
use crate::geometry::{Load, Point};
use crate::model::{Node, StructuralModel};

/// Field count of a node record.
const NODE_FIELDS: usize = 10;
/// Field count of a member record.
const MEMBER_FIELDS: usize = 5;

/// Read and parse the model stored at `path`.
///
/// # Errors
///
/// Returns [`InputError::Io`] when the file cannot be read, and the errors of
/// [`parse_model`] otherwise.
pub fn load_model(path: impl AsRef<Path>) -> Result<StructuralModel, InputError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_model(&text)
}

/// Parse a model from the text of a record file.
///
/// # Errors
///
/// Returns [`InputError::InvalidNumber`] for a field that is not a finite number and
/// [`InputError::Model`] when records reference unknown or duplicate nodes or
/// carry invalid member properties.
///
/// # Examples
/// ```
/// use truss3d::parse_model;
///
/// let model = parse_model("1,0,0,0,1,1,1,0,0,0\n2,5,0,0,0,1,1,10,0,0\n1,1,2,29000,1\n")?;
/// assert_eq!(model.node_count(), 2);
/// assert_eq!(model.member_count(), 1);
/// # Ok::<(), truss3d::InputError>(())
/// ```
pub fn parse_model(text: &str) -> Result<StructuralModel, InputError> {
    let mut node_records = Vec::new();
    let mut member_records = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line_number = number + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let values = parse_fields(trimmed, line_number)?;
        match values.len() {
            NODE_FIELDS => node_records.push((line_number, values)),
            MEMBER_FIELDS => member_records.push((line_number, values)),
            count => warn!("skipping line {line_number} with {count} values"),
        }
    }
    info!(
        "found {} nodes and {} members",
        node_records.len(),
        member_records.len()
    );

    let mut model = StructuralModel::new();
    for (line, values) in &node_records {
        let node = Node::new(
            values[0] as i64,
            Point::new(values[1], values[2], values[3]),
            [fix_flag(values[4]), fix_flag(values[5]), fix_flag(values[6])],
            Load::new(values[7], values[8], values[9]),
        );
        model
            .add_node(node)
            .map_err(|source| InputError::Model { line: *line, source })?;
    }
    for (line, values) in &member_records {
        model
            .add_member(
                values[0] as i64,
                values[1] as i64,
                values[2] as i64,
                values[3],
                values[4],
            )
            .map_err(|source| InputError::Model { line: *line, source })?;
    }
    Ok(model)
}

/// Whether a fix flag marks its axis as supported.
fn fix_flag(value: f64) -> bool {
    value.trunc() != 0.0
}

/// Split a record on commas and parse every non-empty field.
fn parse_fields(line: &str, line_number: usize) -> Result<Vec<f64>, InputError> {
    line.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| InputError::InvalidNumber {
                    line: line_number,
                    field: field.to_owned(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ModelError;

    const SAMPLE: &str = "\
# Node id, x, y, z, fix_x, fix_y, fix_z, load_x, load_y, load_z
1, 0, 0, 0, 1, 1, 1, 0, 0, 0
2, 60, 60, 0, 0, 0, 1, 0, -10, 0

# Member id, start_node, end_node, E, A
1, 2, 1, 29000, 0.75
2, 2, 3, 29000, 0.75
3, 120, 0, 0, 0, 1, 1, 0, 0, 0
";

    #[test]
    fn records_are_classified_by_field_count() {
        let model = parse_model(SAMPLE).expect("valid input");
        assert_eq!(model.node_count(), 3);
        assert_eq!(model.member_count(), 2);
        let last = model.nodes().last().expect("three nodes");
        assert_eq!(last.id, 3);
        assert_eq!(last.support, [false, true, true]);
        let member = model.members().nth(1).expect("two members");
        assert_eq!(member.member.id, 2);
        assert_eq!(member.end.index(), 2);
        assert_eq!(member.member.area, 0.75);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let text = "1,0,0,0,1,1,1,0,0,0\n1,2,3\n2,1,0,0,0,1,1,5,0,0\n,,\n1,1,2,100,1\n";
        let model = parse_model(text).expect("valid input");
        assert_eq!(model.node_count(), 2);
        assert_eq!(model.member_count(), 1);
    }

    #[test]
    fn non_numeric_field_is_an_error() {
        let error = parse_model("1,0,0,0,1,1,1,0,0,0\n1,1,two,100,1\n")
            .expect_err("bad field rejected");
        match error {
            InputError::InvalidNumber { line, field } => {
                assert_eq!(line, 2);
                assert_eq!(field, "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_fields_are_errors() {
        for (text, bad) in [
            ("1,0,0,0,1,1,1,0,0,0\n2,nan,0,0,0,1,1,5,0,0\n1,1,2,100,1\n", "nan"),
            ("1,0,0,0,1,1,1,0,0,0\n2,10,0,0,0,1,1,inf,0,0\n1,1,2,100,1\n", "inf"),
            ("1,0,0,0,1,1,1,0,0,0\n2,10,0,0,0,1,1,5,0,0\n1,1,2,-infinity,1\n", "-infinity"),
        ] {
            match parse_model(text).expect_err("non-finite field rejected") {
                InputError::InvalidNumber { field, .. } => assert_eq!(field, bad),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn fractional_fix_flags_are_truncated() {
        let model = parse_model("1,0,0,0,0.5,1,-1.5,0,0,0\n").expect("valid input");
        let node = model.nodes().next().expect("one node");
        assert_eq!(node.support, [false, true, true]);
    }

    #[test]
    fn unknown_member_node_is_fatal() {
        let error = parse_model("1,0,0,0,1,1,1,0,0,0\n\n7,1,9,100,1\n")
            .expect_err("unknown node rejected");
        match error {
            InputError::Model {
                line,
                source: ModelError::UnknownNode { member, node, known },
            } => {
                assert_eq!(line, 3);
                assert_eq!(member, 7);
                assert_eq!(node, 9);
                assert_eq!(known, vec![1]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_input_gives_empty_model() {
        let model = parse_model("# nothing here\n\n").expect("valid input");
        assert_eq!(model.node_count(), 0);
        assert_eq!(model.member_count(), 0);
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load_model("/definitely/not/here.csv").expect_err("missing file");
        assert!(error.to_string().contains("/definitely/not/here.csv"));
    }
}
