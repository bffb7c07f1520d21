//! Error types produced while building, loading or analysing a truss model.

use thiserror::Error;

use crate::geometry::Axis;

/// Error returned when a model cannot be assembled from its records.
///
/// These are model integrity failures: the structure described by the input is
/// not well formed, so analysis never starts.
///
/// # Examples
///
/// ```
/// use truss3d::{point, Load, ModelError, Node, StructuralModel};
///
/// let mut model = StructuralModel::new();
/// model
///     .add_node(Node::new(1, point(0.0, 0.0, 0.0), [true; 3], Load::default()))
///     .expect("first node accepted");
/// let error = model
///     .add_member(7, 1, 2, 29_000.0, 1.0)
///     .expect_err("unknown node rejected");
/// assert!(matches!(error, ModelError::UnknownNode { member: 7, node: 2, .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModelError {
    /// Returned when a member references a node id that was never defined.
    #[error("member {member} references unknown node {node} (valid node ids: {known:?})")]
    UnknownNode {
        /// Identifier of the offending member.
        member: i64,
        /// Node id that could not be resolved.
        node: i64,
        /// Node ids present in the model, in input order.
        known: Vec<i64>,
    },
    /// Returned when two nodes share an identifier.
    #[error("node id {0} is defined more than once")]
    DuplicateNode(i64),
    /// Returned when a node carries a NaN or infinite coordinate or load.
    #[error("node {node} has a non-finite {quantity} component ({value})")]
    NonFiniteNode {
        /// Identifier of the offending node.
        node: i64,
        /// Either `"coordinate"` or `"load"`.
        quantity: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Returned when the supplied properties for a member are not physically meaningful.
    #[error("member {member} has invalid properties: {source}")]
    InvalidMember {
        /// Identifier of the offending member.
        member: i64,
        /// Description of the invalid property.
        #[source]
        source: MemberPropertyError,
    },
}

/// Reason a member's section or material is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MemberPropertyError {
    /// Returned when the cross-sectional area is not a positive finite number.
    #[error("area must be positive and finite (received {0})")]
    NonPositiveArea(f64),
    /// Returned when the elastic modulus is not a positive finite number.
    #[error("elastic modulus must be positive and finite (received {0})")]
    NonPositiveElasticModulus(f64),
}

/// Error returned when the linear solver cannot produce a solution.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SolverError {
    /// The pivot selected for `column` vanished, so the system is singular.
    #[error("zero pivot in column {column} (|pivot| = {pivot:e})")]
    Singular {
        /// Column of the reduced system in which elimination broke down.
        column: usize,
        /// Magnitude of the best pivot candidate found.
        pivot: f64,
    },
    /// The matrix and right-hand side disagree in size.
    #[error("system of order {order} cannot be solved against {rhs} right-hand side entries")]
    DimensionMismatch {
        /// Order of the square coefficient matrix.
        order: usize,
        /// Length of the right-hand side.
        rhs: usize,
    },
}

/// Error returned when a truss analysis fails.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when a member spans zero distance.
    #[error("member {0} has zero length (its end nodes coincide)")]
    ZeroLengthMember(i64),
    /// Returned when the reduced stiffness matrix is singular.
    #[error(
        "stiffness matrix is singular at node {node} along {axis}; \
         the structure is unstable or insufficiently supported"
    )]
    SingularSystem {
        /// User-facing id of the node owning the offending degree of freedom.
        node: i64,
        /// Axis of the offending degree of freedom.
        axis: Axis,
    },
    /// Returned for solver failures that cannot be tied to a node.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Error returned when reading the record-oriented input format.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A field could not be interpreted as a finite number.
    #[error("line {line}: field {field:?} is not a finite number")]
    InvalidNumber {
        /// One-based line number of the record.
        line: usize,
        /// Offending field text.
        field: String,
    },
    /// The records describe an invalid model.
    #[error("line {line}: {source}")]
    Model {
        /// One-based line number of the record that triggered the failure.
        line: usize,
        /// Model integrity failure.
        #[source]
        source: ModelError,
    },
}
