//! Global stiffness matrix and load vector assembly.

use log::debug;
use nalgebra::{SMatrix, SVector};
use ndarray::{Array1, Array2};

use crate::errors::AnalysisError;
use crate::model::{Member, MemberGeometry, StructuralModel};

/// Element stiffness matrix of an axial bar in global coordinates.
pub type ElementStiffness = SMatrix<f64, 6, 6>;

/// The full, unconstrained linear system `K·D = F` of a model.
///
/// Both arrays are indexed by global DOF (`3 * node + axis`) and are stored
/// row-major in contiguous memory.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalSystem {
    /// Symmetric global stiffness matrix.
    pub stiffness: Array2<f64>,
    /// Applied nodal loads.
    pub loads: Array1<f64>,
}

impl GlobalSystem {
    /// Number of degrees of freedom in the system.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        self.loads.len()
    }
}

/// Stiffness of a single bar: `E·A/L · u·uᵀ` with `u = [c, -c]`.
///
/// # Examples
/// ```
/// use nalgebra::Vector3;
/// use truss3d::{element_stiffness, Member, MemberGeometry};
///
/// let geometry = MemberGeometry { length: 2.0, cosines: Vector3::x() };
/// let member = Member { id: 1, elastic_modulus: 100.0, area: 0.5 };
/// let k = element_stiffness(&geometry, &member);
/// assert_eq!(k[(0, 0)], 25.0);
/// assert_eq!(k[(0, 3)], -25.0);
/// assert_eq!(k[(1, 1)], 0.0);
/// ```
#[must_use]
pub fn element_stiffness(geometry: &MemberGeometry, member: &Member) -> ElementStiffness {
    let c = geometry.cosines;
    let u = SVector::<f64, 6>::new(c.x, c.y, c.z, -c.x, -c.y, -c.z);
    member.axial_stiffness(geometry.length) * (u * u.transpose())
}

/// Assemble the global stiffness matrix and load vector for `model`.
///
/// Element contributions are summed into the global matrix, so members sharing
/// a node add their stiffness together.
///
/// # Errors
///
/// Returns [`AnalysisError::ZeroLengthMember`] when a member's end nodes coincide.
pub fn assemble(model: &StructuralModel) -> Result<GlobalSystem, AnalysisError> {
    let dofs = model.dof_count();
    let loads = Array1::from(model.applied_loads());
    let mut stiffness = Array2::<f64>::zeros((dofs, dofs));

    for member in model.members() {
        let geometry = model.member_geometry(&member)?;
        let local = element_stiffness(&geometry, member.member);
        let dof_map = StructuralModel::member_dofs(&member);
        for (row_local, &global_row) in dof_map.iter().enumerate() {
            for (col_local, &global_col) in dof_map.iter().enumerate() {
                stiffness[[global_row, global_col]] += local[(row_local, col_local)];
            }
        }
    }

    debug!(
        "assembled {dofs}x{dofs} stiffness matrix from {} members",
        model.member_count()
    );
    Ok(GlobalSystem { stiffness, loads })
}
