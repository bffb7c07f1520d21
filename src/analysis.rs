//! The direct stiffness pipeline for a loaded model.
//!
//! `analyze` threads owned values through the stages:
//!
//! 1. [`assemble`] builds the global stiffness matrix `K` and load vector `F`.
//! 2. [`DofMap`] and [`GlobalSystem::reduce`] drop the fixed DOFs.
//! 3. [`solve`] eliminates the reduced system with partial pivoting.
//! 4. [`DofMap::expand`] scatters the solution back onto all DOFs.
//! 5. [`reactions`] and [`member_forces`] recover the engineering results.
//!
//! See <https://en.wikipedia.org/wiki/Direct_stiffness_method>.

use log::{debug, warn};
use ndarray::Array1;

use crate::assembly::{assemble, GlobalSystem};
use crate::errors::{AnalysisError, SolverError};
use crate::geometry::split_dof;
use crate::model::StructuralModel;
use crate::recovery::{member_forces, reactions};
use crate::reduction::DofMap;
use crate::results::AnalysisResults;
use crate::solver::solve;

/// Models with more DOFs than this are still analysed, but dense storage and
/// cubic elimination make them slow, so a warning is logged.
pub const DENSE_DOF_WARNING: usize = 3_000;

/// Analyse `model` under its applied loads.
///
/// # Errors
///
/// Returns [`AnalysisError::ZeroLengthMember`] for coincident member ends and
/// [`AnalysisError::SingularSystem`] when the structure is a mechanism or lacks
/// supports.
///
/// # Examples
/// ```
/// use truss3d::{analyze, load, point, Load, MemberState, Node, StructuralModel};
///
/// let mut model = StructuralModel::new();
/// model.add_node(Node::new(1, point(0.0, 0.0, 0.0), [true; 3], Load::default()))?;
/// model.add_node(Node::new(2, point(10.0, 0.0, 0.0), [false, true, true], load(100.0, 0.0, 0.0)))?;
/// model.add_member(1, 1, 2, 29_000.0, 1.0)?;
///
/// let results = analyze(&model)?;
/// assert!((results.displacements[3] - 100.0 * 10.0 / 29_000.0).abs() < 1.0e-12);
/// assert_eq!(results.members[0].state, MemberState::Tension);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn analyze(model: &StructuralModel) -> Result<AnalysisResults, AnalysisError> {
    let dofs = model.dof_count();
    if dofs > DENSE_DOF_WARNING {
        warn!("model has {dofs} degrees of freedom; dense elimination may be slow");
    }

    let system = assemble(model)?;
    let map = DofMap::new(&model.fixed_dofs());
    let displacements = solve_displacements(model, &system, &map)?;
    let reactions = reactions(&system, &displacements);
    let members = member_forces(model, &displacements)?;
    debug!("recovered results for {} members", members.len());

    Ok(AnalysisResults {
        displacements,
        reactions,
        members,
    })
}

/// Solve the reduced system and expand the result onto every DOF.
fn solve_displacements(
    model: &StructuralModel,
    system: &GlobalSystem,
    map: &DofMap,
) -> Result<Array1<f64>, AnalysisError> {
    debug!(
        "{} of {} degrees of freedom are free",
        map.free_count(),
        map.dof_count()
    );
    if map.free_count() == 0 {
        return Ok(Array1::zeros(map.dof_count()));
    }
    let reduced = system.reduce(map);
    let solution = solve(reduced).map_err(|error| locate_singularity(model, map, error))?;
    Ok(map.expand(&solution))
}

/// Translate a reduced pivot column into the node and axis it belongs to.
fn locate_singularity(model: &StructuralModel, map: &DofMap, error: SolverError) -> AnalysisError {
    let SolverError::Singular { column, .. } = error else {
        return error.into();
    };
    let (node, axis) = split_dof(map.full(column));
    model
        .nodes()
        .nth(node)
        .map_or(AnalysisError::Solver(error), |node| {
            AnalysisError::SingularSystem {
                node: node.id,
                axis,
            }
        })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{load, point, Axis, Load};
    use crate::model::Node;
    use crate::results::MemberState;

    fn bar(support: [bool; 3], applied: Load) -> StructuralModel {
        let mut model = StructuralModel::new();
        model
            .add_node(Node::new(1, point(0.0, 0.0, 0.0), [true; 3], Load::default()))
            .expect("node accepted");
        model
            .add_node(Node::new(2, point(10.0, 0.0, 0.0), support, applied))
            .expect("node accepted");
        model
            .add_member(1, 1, 2, 29_000.0, 1.0)
            .expect("member accepted");
        model
    }

    #[test]
    fn axial_bar_matches_hand_calculation() {
        let model = bar([false, true, true], load(100.0, 0.0, 0.0));
        let results = analyze(&model).expect("analysis succeeds");
        assert_relative_eq!(results.displacements[3], 100.0 * 10.0 / 29_000.0, epsilon = 1.0e-12);
        assert_relative_eq!(results.members[0].force, 100.0, epsilon = 1.0e-9);
        assert_relative_eq!(results.reactions[0], -100.0, epsilon = 1.0e-9);
        assert_eq!(results.members[0].state, MemberState::Tension);
    }

    #[test]
    fn unrestrained_transverse_dof_is_singular() {
        let model = bar([false, false, true], load(100.0, 0.0, 0.0));
        let error = analyze(&model).expect_err("mechanism detected");
        assert_eq!(
            error,
            AnalysisError::SingularSystem {
                node: 2,
                axis: Axis::Y,
            }
        );
    }

    #[test]
    fn fully_fixed_model_skips_the_solver() {
        let model = bar([true; 3], load(5.0, 6.0, 7.0));
        let results = analyze(&model).expect("analysis succeeds");
        assert!(results.displacements.iter().all(|&d| d == 0.0));
        assert_eq!(results.reactions[3], -5.0);
        assert_eq!(results.reactions[5], -7.0);
        assert_eq!(results.members[0].force, 0.0);
        assert_eq!(results.members[0].state, MemberState::Compression);
    }

    #[test]
    fn empty_model_has_empty_results() {
        let results = analyze(&StructuralModel::new()).expect("analysis succeeds");
        assert!(results.displacements.is_empty());
        assert!(results.reactions.is_empty());
        assert!(results.members.is_empty());
    }
}
