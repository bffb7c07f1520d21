//! Vector quantities attached to truss nodes and the degree-of-freedom numbering.
//!
//! All quantities are unit agnostic. The caller is responsible for supplying
//! lengths, forces and moduli in one consistent system (for example inches,
//! kips and ksi).

use std::fmt;

use nalgebra::Vector3;

/// Translational degrees of freedom carried by every node.
pub const DOFS_PER_NODE: usize = 3;

/// Global axis of a translational degree of freedom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Global X axis.
    X,
    /// Global Y axis.
    Y,
    /// Global Z axis.
    Z,
}

impl Axis {
    /// The three axes in DOF order.
    pub const ALL: [Axis; DOFS_PER_NODE] = [Axis::X, Axis::Y, Axis::Z];

    /// Offset of this axis inside a node's block of degrees of freedom.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis for an offset inside a node's DOF block.
    #[must_use]
    pub const fn from_offset(offset: usize) -> Option<Axis> {
        match offset {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Global index of the degree of freedom of node `node` along `axis`.
///
/// # Examples
/// ```
/// use truss3d::{dof_index, Axis};
///
/// assert_eq!(dof_index(0, Axis::X), 0);
/// assert_eq!(dof_index(2, Axis::Z), 8);
/// ```
#[must_use]
pub const fn dof_index(node: usize, axis: Axis) -> usize {
    DOFS_PER_NODE * node + axis.offset()
}

/// Split a global DOF index into its node index and axis.
#[must_use]
pub const fn split_dof(dof: usize) -> (usize, Axis) {
    let axis = match Axis::from_offset(dof % DOFS_PER_NODE) {
        Some(axis) => axis,
        None => Axis::X,
    };
    (dof / DOFS_PER_NODE, axis)
}

/// Defines a three component quantity with conversions to and from
/// [`nalgebra::Vector3`].
macro_rules! vector_quantity {
    ($(#[$meta:meta])* $name:ident, $ctor:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        pub struct $name {
            #[doc = concat!("X component of the ", $what, ".")]
            pub x: f64,
            #[doc = concat!("Y component of the ", $what, ".")]
            pub y: f64,
            #[doc = concat!("Z component of the ", $what, ".")]
            pub z: f64,
        }

        impl $name {
            #[doc = concat!("Create a [`", stringify!($name), "`] from explicit components.")]
            #[must_use]
            pub const fn new(x: f64, y: f64, z: f64) -> Self {
                Self { x, y, z }
            }

            /// Components in axis order.
            #[must_use]
            pub const fn components(self) -> [f64; DOFS_PER_NODE] {
                [self.x, self.y, self.z]
            }

            /// Component along a single axis.
            #[must_use]
            pub const fn along(self, axis: Axis) -> f64 {
                match axis {
                    Axis::X => self.x,
                    Axis::Y => self.y,
                    Axis::Z => self.z,
                }
            }

            /// Convert into an algebraic vector.
            #[must_use]
            pub fn to_vector(self) -> Vector3<f64> {
                Vector3::new(self.x, self.y, self.z)
            }
        }

        impl From<[f64; DOFS_PER_NODE]> for $name {
            fn from(value: [f64; DOFS_PER_NODE]) -> Self {
                Self::new(value[0], value[1], value[2])
            }
        }

        impl From<Vector3<f64>> for $name {
            fn from(value: Vector3<f64>) -> Self {
                Self::new(value.x, value.y, value.z)
            }
        }

        impl From<$name> for Vector3<f64> {
            fn from(value: $name) -> Self {
                value.to_vector()
            }
        }

        #[doc = concat!("Shorthand for [`", stringify!($name), "::new`].")]
        #[must_use]
        pub const fn $ctor(x: f64, y: f64, z: f64) -> $name {
            $name::new(x, y, z)
        }
    };
}

vector_quantity!(
    /// Position of a node in space.
    Point,
    point,
    "position"
);

vector_quantity!(
    /// External force applied at a node.
    Load,
    load,
    "load"
);

vector_quantity!(
    /// Translation of a node after analysis.
    Displacement,
    displacement,
    "displacement"
);

impl Point {
    /// Vector pointing from `self` to `other`.
    #[must_use]
    pub fn span_to(self, other: Point) -> Vector3<f64> {
        other.to_vector() - self.to_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dof_numbering_is_three_per_node() {
        for node in 0..4 {
            for axis in Axis::ALL {
                let dof = dof_index(node, axis);
                assert_eq!(dof, 3 * node + axis.offset());
                assert_eq!(split_dof(dof), (node, axis));
            }
        }
    }

    #[test]
    fn axis_offsets_round_trip() {
        assert_eq!(Axis::from_offset(1), Some(Axis::Y));
        assert_eq!(Axis::from_offset(3), None);
        assert_eq!(Axis::Z.to_string(), "z");
    }

    #[test]
    fn span_points_from_start_to_end() {
        let span = point(1.0, 2.0, 3.0).span_to(point(4.0, 6.0, 3.0));
        assert_eq!(span, Vector3::new(3.0, 4.0, 0.0));
        assert_eq!(span.norm(), 5.0);
    }

    #[test]
    fn load_components_follow_axis_order() {
        let applied = load(1.0, -2.0, 3.5);
        assert_eq!(applied.components(), [1.0, -2.0, 3.5]);
        assert_eq!(applied.along(Axis::Y), -2.0);
        assert_eq!(Load::default(), load(0.0, 0.0, 0.0));
        assert_eq!(Displacement::from([0.1, 0.2, 0.3]), displacement(0.1, 0.2, 0.3));
    }
}
