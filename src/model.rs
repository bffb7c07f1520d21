//! Structural model: nodes, members and their connectivity.

use std::collections::HashMap;

use nalgebra::Vector3;
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::errors::{AnalysisError, MemberPropertyError, ModelError};
use crate::geometry::{dof_index, Axis, Load, Point, DOFS_PER_NODE};

/// A pin joint of the truss.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// User-facing identifier, unique within a model.
    pub id: i64,
    /// Location of the joint.
    pub position: Point,
    /// Restraint flags for the X, Y and Z translations; `true` fixes the axis.
    pub support: [bool; DOFS_PER_NODE],
    /// External load applied at the joint.
    pub load: Load,
}

impl Node {
    /// Create a node.
    #[must_use]
    pub const fn new(id: i64, position: Point, support: [bool; DOFS_PER_NODE], load: Load) -> Self {
        Self {
            id,
            position,
            support,
            load,
        }
    }

    /// Create an unrestrained, unloaded node.
    #[must_use]
    pub fn free(id: i64, position: Point) -> Self {
        Self::new(id, position, [false; DOFS_PER_NODE], Load::default())
    }

    /// Whether any axis of this node is restrained.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.support.iter().any(|&fixed| fixed)
    }
}

/// An axial bar connecting two nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Member {
    /// User-facing identifier.
    pub id: i64,
    /// Young's modulus of the material.
    pub elastic_modulus: f64,
    /// Cross-sectional area.
    pub area: f64,
}

impl Member {
    /// Axial stiffness `E·A/L` for a member of the given length.
    #[must_use]
    pub fn axial_stiffness(&self, length: f64) -> f64 {
        self.elastic_modulus * self.area / length
    }
}

/// Length and orientation of a member, derived from its end nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemberGeometry {
    /// Distance between the end nodes.
    pub length: f64,
    /// Direction cosines of the axis pointing from the start node to the end node.
    pub cosines: Vector3<f64>,
}

/// A member together with the indices of its end nodes.
#[derive(Clone, Copy, Debug)]
pub struct MemberRef<'a> {
    /// Position of the member in input order.
    pub index: EdgeIndex,
    /// Index of the start node.
    pub start: NodeIndex,
    /// Index of the end node.
    pub end: NodeIndex,
    /// Member properties.
    pub member: &'a Member,
}

/// Container for a pin-jointed truss model.
///
/// Nodes and members are kept in input order: the n-th node added owns degrees
/// of freedom `3n..3n+3`, and results are reported per member in the order the
/// members were added. Once loading is finished the model is only read.
#[derive(Clone, Debug, Default)]
pub struct StructuralModel {
    /// Joints are graph nodes, members are graph edges.
    graph: Graph<Node, Member>,
    /// Lookup from user-facing node id to graph index.
    ids: HashMap<i64, NodeIndex>,
}

impl StructuralModel {
    /// Create an empty model.
    ///
    /// # Examples
    /// ```
    /// use truss3d::StructuralModel;
    ///
    /// let model = StructuralModel::new();
    /// assert_eq!(model.node_count(), 0);
    /// assert_eq!(model.dof_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Total number of degrees of freedom, three per node.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        DOFS_PER_NODE * self.node_count()
    }

    /// Add a node to the model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateNode`] when a node with the same id exists
    /// and [`ModelError::NonFiniteNode`] when its position or load is NaN or
    /// infinite.
    pub fn add_node(&mut self, node: Node) -> Result<NodeIndex, ModelError> {
        if self.ids.contains_key(&node.id) {
            return Err(ModelError::DuplicateNode(node.id));
        }
        let quantities = [
            ("coordinate", node.position.components()),
            ("load", node.load.components()),
        ];
        for (quantity, components) in quantities {
            if let Some(&value) = components.iter().find(|value| !value.is_finite()) {
                return Err(ModelError::NonFiniteNode {
                    node: node.id,
                    quantity,
                    value,
                });
            }
        }
        let id = node.id;
        let index = self.graph.add_node(node);
        self.ids.insert(id, index);
        Ok(index)
    }

    /// Connect the nodes with ids `start` and `end` by a new member.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownNode`] when either node id is not part of the
    /// model and [`ModelError::InvalidMember`] when the area or elastic modulus is
    /// not a strictly positive finite number.
    pub fn add_member(
        &mut self,
        id: i64,
        start: i64,
        end: i64,
        elastic_modulus: f64,
        area: f64,
    ) -> Result<EdgeIndex, ModelError> {
        let start_index = self.resolve(id, start)?;
        let end_index = self.resolve(id, end)?;
        // Written as negated comparisons so NaN is rejected as well.
        if !(area > 0.0 && area.is_finite()) {
            return Err(ModelError::InvalidMember {
                member: id,
                source: MemberPropertyError::NonPositiveArea(area),
            });
        }
        if !(elastic_modulus > 0.0 && elastic_modulus.is_finite()) {
            return Err(ModelError::InvalidMember {
                member: id,
                source: MemberPropertyError::NonPositiveElasticModulus(elastic_modulus),
            });
        }
        Ok(self.graph.add_edge(
            start_index,
            end_index,
            Member {
                id,
                elastic_modulus,
                area,
            },
        ))
    }

    /// Look up a node index by its user-facing id.
    #[must_use]
    pub fn node_index(&self, id: i64) -> Option<NodeIndex> {
        self.ids.get(&id).copied()
    }

    /// Node stored at `index`.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.graph.node_weight(index)
    }

    /// Member stored at `index`.
    #[must_use]
    pub fn member(&self, index: EdgeIndex) -> Option<&Member> {
        self.graph.edge_weight(index)
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_weights()
    }

    /// Members with their end nodes, in input order.
    pub fn members(&self) -> impl Iterator<Item = MemberRef<'_>> + '_ {
        self.graph.edge_references().map(|edge| MemberRef {
            index: edge.id(),
            start: edge.source(),
            end: edge.target(),
            member: edge.weight(),
        })
    }

    /// Restraint flag for every degree of freedom, indexed by global DOF.
    #[must_use]
    pub fn fixed_dofs(&self) -> Vec<bool> {
        self.nodes().flat_map(|node| node.support).collect()
    }

    /// Applied load for every degree of freedom, indexed by global DOF.
    #[must_use]
    pub fn applied_loads(&self) -> Vec<f64> {
        self.nodes().flat_map(|node| node.load.components()).collect()
    }

    /// Global DOF indices of both ends of a member: start x, y, z then end x, y, z.
    #[must_use]
    pub fn member_dofs(member: &MemberRef<'_>) -> [usize; 2 * DOFS_PER_NODE] {
        let (i, j) = (member.start.index(), member.end.index());
        [
            dof_index(i, Axis::X),
            dof_index(i, Axis::Y),
            dof_index(i, Axis::Z),
            dof_index(j, Axis::X),
            dof_index(j, Axis::Y),
            dof_index(j, Axis::Z),
        ]
    }

    /// Compute the length and direction cosines of a member.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ZeroLengthMember`] when the end nodes coincide.
    pub fn member_geometry(&self, member: &MemberRef<'_>) -> Result<MemberGeometry, AnalysisError> {
        let start = self.graph[member.start].position;
        let end = self.graph[member.end].position;
        let span = start.span_to(end);
        let length = span.norm();
        if length == 0.0 || !length.is_finite() {
            return Err(AnalysisError::ZeroLengthMember(member.member.id));
        }
        Ok(MemberGeometry {
            length,
            cosines: span / length,
        })
    }

    /// Resolve a node id referenced by member `member`.
    fn resolve(&self, member: i64, node: i64) -> Result<NodeIndex, ModelError> {
        self.node_index(node).ok_or_else(|| ModelError::UnknownNode {
            member,
            node,
            known: self.nodes().map(|node| node.id).collect(),
        })
    }
}
