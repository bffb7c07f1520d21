//! Result records produced by an analysis run.

use std::fmt;

use ndarray::Array1;
use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::Serialize;

use crate::geometry::{dof_index, Axis, Displacement, Load, DOFS_PER_NODE};
use crate::model::StructuralModel;

/// Whether a member is being stretched or squeezed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MemberState {
    /// Positive axial force.
    Tension,
    /// Negative or zero axial force.
    Compression,
}

impl MemberState {
    /// Classify an axial force. Only strictly positive forces count as tension.
    ///
    /// # Examples
    /// ```
    /// use truss3d::MemberState;
    ///
    /// assert_eq!(MemberState::from_force(1.0), MemberState::Tension);
    /// assert_eq!(MemberState::from_force(0.0), MemberState::Compression);
    /// ```
    #[must_use]
    pub fn from_force(force: f64) -> Self {
        if force > 0.0 {
            MemberState::Tension
        } else {
            MemberState::Compression
        }
    }

    /// Label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MemberState::Tension => "Tension",
            MemberState::Compression => "Compression",
        }
    }
}

impl fmt::Display for MemberState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Axial response of one member.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MemberResult {
    /// Axial force, positive in tension.
    pub force: f64,
    /// Axial stress, `force / area`.
    pub stress: f64,
    /// Length computed from the end node positions.
    pub length: f64,
    /// Tension or compression.
    pub state: MemberState,
}

/// Displacements, reactions and member forces of a solved model.
///
/// The vectors are indexed by global DOF and the member results follow the
/// member input order of the model that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResults {
    /// Displacement of every DOF; exactly zero at fixed DOFs.
    pub displacements: Array1<f64>,
    /// `K·D − F` at every DOF. Only entries at fixed DOFs are support reactions;
    /// the rest is solver residual.
    pub reactions: Array1<f64>,
    /// One record per member.
    pub members: Vec<MemberResult>,
}

impl AnalysisResults {
    /// Displacement of the node at `node`.
    #[must_use]
    pub fn node_displacement(&self, node: NodeIndex) -> Option<Displacement> {
        triple(&self.displacements, node.index()).map(Displacement::from)
    }

    /// Reaction at the node at `node`.
    #[must_use]
    pub fn node_reaction(&self, node: NodeIndex) -> Option<Load> {
        triple(&self.reactions, node.index()).map(Load::from)
    }

    /// Result of the member at `member`.
    #[must_use]
    pub fn member(&self, member: EdgeIndex) -> Option<&MemberResult> {
        self.members.get(member.index())
    }

    /// Member carrying the largest absolute stress, if any member exists.
    #[must_use]
    pub fn max_stress_member(&self) -> Option<EdgeIndex> {
        self.members
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.stress.abs().total_cmp(&b.stress.abs()))
            .map(|(index, _)| EdgeIndex::new(index))
    }

    /// Sum of reactions and applied loads along each axis.
    ///
    /// Global equilibrium requires every component to vanish up to round-off.
    #[must_use]
    pub fn equilibrium_residual(&self, model: &StructuralModel) -> [f64; DOFS_PER_NODE] {
        let mut residual = [0.0; DOFS_PER_NODE];
        for (index, node) in model.nodes().enumerate() {
            for axis in Axis::ALL {
                let dof = dof_index(index, axis);
                residual[axis.offset()] += self.reactions[dof] + node.load.along(axis);
            }
        }
        residual
    }
}

/// The three entries belonging to node `node`.
fn triple(values: &Array1<f64>, node: usize) -> Option<[f64; DOFS_PER_NODE]> {
    let base = dof_index(node, Axis::X);
    if base + DOFS_PER_NODE > values.len() {
        return None;
    }
    Some([values[base], values[base + 1], values[base + 2]])
}
