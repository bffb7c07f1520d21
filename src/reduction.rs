//! Partitioning of the global system into free and fixed degrees of freedom.

use ndarray::{Array1, Array2};

use crate::assembly::GlobalSystem;

/// Bidirectional mapping between global DOFs and the reduced (free-only) numbering.
///
/// Free DOFs keep their relative order: the k-th free DOF in ascending global
/// order becomes reduced DOF `k`. Fixed DOFs have no reduced counterpart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DofMap {
    full_to_reduced: Vec<Option<usize>>,
    reduced_to_full: Vec<usize>,
}

impl DofMap {
    /// Build the map from per-DOF restraint flags.
    ///
    /// # Examples
    /// ```
    /// use truss3d::DofMap;
    ///
    /// let map = DofMap::new(&[true, false, true, false]);
    /// assert_eq!(map.free_count(), 2);
    /// assert_eq!(map.reduced(1), Some(0));
    /// assert_eq!(map.reduced(2), None);
    /// assert_eq!(map.full(1), 3);
    /// ```
    #[must_use]
    pub fn new(fixed: &[bool]) -> Self {
        let mut full_to_reduced = Vec::with_capacity(fixed.len());
        let mut reduced_to_full = Vec::new();
        for (dof, &is_fixed) in fixed.iter().enumerate() {
            if is_fixed {
                full_to_reduced.push(None);
            } else {
                full_to_reduced.push(Some(reduced_to_full.len()));
                reduced_to_full.push(dof);
            }
        }
        Self {
            full_to_reduced,
            reduced_to_full,
        }
    }

    /// Number of global degrees of freedom.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        self.full_to_reduced.len()
    }

    /// Number of free degrees of freedom.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.reduced_to_full.len()
    }

    /// Reduced index of a global DOF, or `None` when it is fixed.
    #[must_use]
    pub fn reduced(&self, dof: usize) -> Option<usize> {
        self.full_to_reduced.get(dof).copied().flatten()
    }

    /// Global DOF of a reduced index.
    ///
    /// # Panics
    ///
    /// Panics when `reduced` is not smaller than [`DofMap::free_count`].
    #[must_use]
    pub fn full(&self, reduced: usize) -> usize {
        self.reduced_to_full[reduced]
    }

    /// Free global DOFs in ascending order.
    #[must_use]
    pub fn free_dofs(&self) -> &[usize] {
        &self.reduced_to_full
    }

    /// Scatter a reduced solution back onto every global DOF.
    ///
    /// Fixed DOFs receive exactly `0.0`.
    ///
    /// # Panics
    ///
    /// Panics when `reduced` does not hold one value per free DOF.
    #[must_use]
    pub fn expand(&self, reduced: &Array1<f64>) -> Array1<f64> {
        assert_eq!(
            reduced.len(),
            self.free_count(),
            "reduced solution does not match the free DOF count"
        );
        let mut full = Array1::zeros(self.dof_count());
        for (&dof, &value) in self.reduced_to_full.iter().zip(reduced.iter()) {
            full[dof] = value;
        }
        full
    }
}

/// The system restricted to free degrees of freedom: `K_ff·D_f = F_f`.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedSystem {
    /// Stiffness between free DOFs.
    pub stiffness: Array2<f64>,
    /// Loads at free DOFs.
    pub loads: Array1<f64>,
}

impl ReducedSystem {
    /// Order of the reduced system.
    #[must_use]
    pub fn order(&self) -> usize {
        self.loads.len()
    }

    /// Whether no free DOF remains, i.e. the structure is fully restrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order() == 0
    }
}

impl GlobalSystem {
    /// Keep only the rows and columns of free DOFs.
    ///
    /// # Panics
    ///
    /// Panics when `map` was built for a different number of DOFs.
    #[must_use]
    pub fn reduce(&self, map: &DofMap) -> ReducedSystem {
        assert_eq!(
            map.dof_count(),
            self.dof_count(),
            "DOF map does not match the global system"
        );
        let free = map.free_dofs();
        let stiffness = Array2::from_shape_fn((free.len(), free.len()), |(row, col)| {
            self.stiffness[[free[row], free[col]]]
        });
        let loads = free.iter().map(|&dof| self.loads[dof]).collect();
        ReducedSystem { stiffness, loads }
    }
}
