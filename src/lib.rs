#![warn(clippy::all)]
#![warn(missing_docs)]
//! Linear-elastic analysis of 3D pin-jointed trusses.
//!
//! A [`StructuralModel`] holds nodes (position, restraints, loads) and axial
//! members (elastic modulus, area). [`analyze`] runs the direct stiffness
//! method on it and returns nodal displacements, support reactions and the
//! axial force, stress and tension/compression state of every member.
//!
//! ```
//! use truss3d::{analyze, load, point, Load, Node, StructuralModel};
//!
//! let mut model = StructuralModel::new();
//! model.add_node(Node::new(1, point(0.0, 0.0, 0.0), [true; 3], Load::default()))?;
//! model.add_node(Node::new(2, point(10.0, 0.0, 0.0), [false, true, true], load(100.0, 0.0, 0.0)))?;
//! model.add_member(1, 1, 2, 29_000.0, 1.0)?;
//!
//! let results = analyze(&model)?;
//! let tip = model.node_index(2).and_then(|node| results.node_displacement(node));
//! assert!((tip.map_or(0.0, |d| d.x) - 0.034_482_758_620_689_655).abs() < 1.0e-12);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Models can also be read from the comma separated record format with
//! [`load_model`] and printed with [`render_tables`].

mod analysis;
mod assembly;
mod errors;
mod geometry;
mod input;
mod model;
mod recovery;
mod reduction;
mod report;
mod results;
mod solver;

pub use analysis::{analyze, DENSE_DOF_WARNING};
pub use assembly::{assemble, element_stiffness, ElementStiffness, GlobalSystem};
pub use errors::{AnalysisError, InputError, MemberPropertyError, ModelError, SolverError};
pub use geometry::{
    displacement, dof_index, load, point, split_dof, Axis, Displacement, Load, Point,
    DOFS_PER_NODE,
};
pub use input::{load_model, parse_model};
pub use model::{Member, MemberGeometry, MemberRef, Node, StructuralModel};
pub use recovery::{member_forces, reactions};
pub use reduction::{DofMap, ReducedSystem};
pub use report::{format_number, render_json, render_tables, Precision, Table};
pub use results::{AnalysisResults, MemberResult, MemberState};
pub use solver::{solve, PIVOT_TOLERANCE};
