//! Post-processing of a solved displacement field.

use ndarray::Array1;

use crate::assembly::GlobalSystem;
use crate::errors::AnalysisError;
use crate::geometry::{Displacement, DOFS_PER_NODE};
use crate::model::StructuralModel;
use crate::results::{MemberResult, MemberState};

/// Support reactions `R = K·D − F` for every degree of freedom.
///
/// # Panics
///
/// Panics when `displacements` does not have one entry per DOF of `system`.
#[must_use]
pub fn reactions(system: &GlobalSystem, displacements: &Array1<f64>) -> Array1<f64> {
    system.stiffness.dot(displacements) - &system.loads
}

/// Axial force, stress and length of every member, in member input order.
///
/// Geometry is recomputed from the node positions rather than taken from the
/// assembly step.
///
/// # Errors
///
/// Returns [`AnalysisError::ZeroLengthMember`] when a member's end nodes coincide.
pub fn member_forces(
    model: &StructuralModel,
    displacements: &Array1<f64>,
) -> Result<Vec<MemberResult>, AnalysisError> {
    let node_displacement = |node: usize| {
        let base = DOFS_PER_NODE * node;
        Displacement::new(
            displacements[base],
            displacements[base + 1],
            displacements[base + 2],
        )
    };

    model
        .members()
        .map(|member| -> Result<MemberResult, AnalysisError> {
            let geometry = model.member_geometry(&member)?;
            let start = node_displacement(member.start.index()).to_vector();
            let end = node_displacement(member.end.index()).to_vector();
            let elongation = geometry.cosines.dot(&(end - start));
            let force = member.member.axial_stiffness(geometry.length) * elongation;
            Ok(MemberResult {
                force,
                stress: force / member.member.area,
                length: geometry.length,
                state: MemberState::from_force(force),
            })
        })
        .collect()
}
