use approx::assert_relative_eq;
use truss3d::{
    analyze, assemble, load, point, AnalysisError, Axis, DofMap, Load, MemberState, Node,
    StructuralModel,
};

/// A tripod: three pinned feet on the ground and a loaded apex.
fn tripod(apex_load: Load) -> StructuralModel {
    let mut model = StructuralModel::new();
    let nodes = [
        Node::new(1, point(0.0, 0.0, 0.0), [true; 3], Load::default()),
        Node::new(2, point(120.0, 0.0, 0.0), [true; 3], Load::default()),
        Node::new(3, point(40.0, 90.0, 0.0), [true; 3], Load::default()),
        Node::new(4, point(50.0, 30.0, 80.0), [false; 3], apex_load),
    ];
    for node in nodes {
        model.add_node(node).expect("node accepted");
    }
    model.add_member(1, 1, 4, 29_000.0, 1.2).expect("member accepted");
    model.add_member(2, 2, 4, 29_000.0, 0.8).expect("member accepted");
    model.add_member(3, 3, 4, 10_000.0, 2.0).expect("member accepted");
    model
}

/// A planar Warren truss braced out of plane at every node.
fn warren_truss() -> StructuralModel {
    let mut model = StructuralModel::new();
    let nodes = [
        Node::new(1, point(0.0, 0.0, 0.0), [true, true, true], Load::default()),
        Node::new(2, point(240.0, 0.0, 0.0), [false, false, true], load(0.0, -20.0, 0.0)),
        Node::new(3, point(480.0, 0.0, 0.0), [false, true, true], Load::default()),
        Node::new(4, point(120.0, 160.0, 0.0), [false, false, true], load(5.0, -10.0, 0.0)),
        Node::new(5, point(360.0, 160.0, 0.0), [false, false, true], Load::default()),
    ];
    for node in nodes {
        model.add_node(node).expect("node accepted");
    }
    let members = [(1, 2), (2, 3), (1, 4), (4, 2), (2, 5), (5, 3), (4, 5)];
    for (id, (start, end)) in (1..).zip(members) {
        model
            .add_member(id, start, end, 29_000.0, 3.0)
            .expect("member accepted");
    }
    model
}

#[test]
fn global_stiffness_is_symmetric() {
    for model in [tripod(load(1.0, 2.0, -3.0)), warren_truss()] {
        let system = assemble(&model).expect("assembly succeeds");
        let k = &system.stiffness;
        let n = model.dof_count();
        for p in 0..n {
            for q in 0..n {
                assert_eq!(k[[p, q]], k[[q, p]]);
            }
        }
    }
}

#[test]
fn unloaded_structure_does_not_move() {
    let model = tripod(Load::default());
    let results = analyze(&model).expect("analysis succeeds");
    assert!(results.displacements.iter().all(|&d| d == 0.0));
    assert!(results.members.iter().all(|m| m.force == 0.0));
}

#[test]
fn unsupported_bar_is_reported_as_singular() {
    let mut model = StructuralModel::new();
    model
        .add_node(Node::free(1, point(0.0, 0.0, 0.0)))
        .expect("node accepted");
    model
        .add_node(Node::free(2, point(10.0, 0.0, 0.0)))
        .expect("node accepted");
    model.add_member(1, 1, 2, 29_000.0, 1.0).expect("member accepted");

    let error = analyze(&model).expect_err("rigid body motion detected");
    assert!(matches!(error, AnalysisError::SingularSystem { .. }));
}

#[test]
fn coplanar_structure_without_out_of_plane_support_is_singular() {
    let mut model = StructuralModel::new();
    let nodes = [
        Node::new(1, point(0.0, 0.0, 0.0), [true; 3], Load::default()),
        Node::new(2, point(60.0, 60.0, 0.0), [false; 3], load(0.0, -10.0, -1.0)),
        Node::new(3, point(120.0, 0.0, 0.0), [false, true, true], Load::default()),
    ];
    for node in nodes {
        model.add_node(node).expect("node accepted");
    }
    model.add_member(1, 2, 1, 29_000.0, 0.75).expect("member accepted");
    model.add_member(2, 2, 3, 29_000.0, 0.75).expect("member accepted");
    model.add_member(3, 1, 3, 29_000.0, 0.5).expect("member accepted");

    let error = analyze(&model).expect_err("out-of-plane mechanism detected");
    assert_eq!(
        error,
        AnalysisError::SingularSystem {
            node: 2,
            axis: Axis::Z,
        }
    );
}

#[test]
fn collinear_skew_chain_is_singular_despite_round_off() {
    // The middle node can slide off the line; elimination leaves round-off, not zeros.
    let mut model = StructuralModel::new();
    let nodes = [
        Node::new(1, point(0.0, 0.0, 0.0), [true; 3], Load::default()),
        Node::new(2, point(0.37, 0.74, 1.11), [false; 3], load(0.0, 0.0, -1.0)),
        Node::new(3, point(1.0, 2.0, 3.0), [true; 3], Load::default()),
    ];
    for node in nodes {
        model.add_node(node).expect("node accepted");
    }
    model.add_member(1, 1, 2, 29_000.0, 1.0).expect("member accepted");
    model.add_member(2, 2, 3, 29_000.0, 1.0).expect("member accepted");

    let error = analyze(&model).expect_err("lateral mechanism detected");
    assert!(matches!(
        error,
        AnalysisError::SingularSystem { node: 2, .. }
    ));
}

#[test]
fn reactions_balance_applied_loads() {
    for model in [tripod(load(3.0, -4.0, -50.0)), warren_truss()] {
        let results = analyze(&model).expect("analysis succeeds");
        let residual = results.equilibrium_residual(&model);
        for component in residual {
            assert_relative_eq!(component, 0.0, epsilon = 1.0e-8);
        }
    }
}

#[test]
fn reactions_vanish_at_free_dofs() {
    let model = warren_truss();
    let results = analyze(&model).expect("analysis succeeds");
    let map = DofMap::new(&model.fixed_dofs());
    for &dof in map.free_dofs() {
        assert_relative_eq!(results.reactions[dof], 0.0, epsilon = 1.0e-9);
    }
    for dof in 0..model.dof_count() {
        if map.reduced(dof).is_none() {
            assert_eq!(results.displacements[dof], 0.0);
        }
    }
}

#[test]
fn hanging_apex_puts_legs_in_tension() {
    let upward = tripod(load(0.0, 0.0, 90.0));
    let results = analyze(&upward).expect("analysis succeeds");
    assert!(results
        .members
        .iter()
        .all(|m| m.force > 0.0 && m.state == MemberState::Tension));

    let downward = tripod(load(0.0, 0.0, -90.0));
    let results = analyze(&downward).expect("analysis succeeds");
    assert!(results
        .members
        .iter()
        .all(|m| m.force < 0.0 && m.state == MemberState::Compression));
}

#[test]
fn member_forces_resolve_the_apex_load() {
    let applied = load(3.0, -4.0, -50.0);
    let model = tripod(applied);
    let results = analyze(&model).expect("analysis succeeds");

    // At the apex each member pulls toward its foot with its axial force.
    let mut resultant = [0.0; 3];
    for (member, result) in model.members().zip(&results.members) {
        let geometry = model.member_geometry(&member).expect("valid geometry");
        for axis in Axis::ALL {
            resultant[axis.offset()] -= result.force * geometry.cosines[axis.offset()];
        }
    }
    assert_relative_eq!(resultant[0] + applied.x, 0.0, epsilon = 1.0e-8);
    assert_relative_eq!(resultant[1] + applied.y, 0.0, epsilon = 1.0e-8);
    assert_relative_eq!(resultant[2] + applied.z, 0.0, epsilon = 1.0e-8);
}

#[test]
fn warren_truss_reports_one_result_per_member_in_order() {
    let model = warren_truss();
    let results = analyze(&model).expect("analysis succeeds");
    assert_eq!(results.members.len(), 7);
    for (member, result) in model.members().zip(&results.members) {
        let geometry = model.member_geometry(&member).expect("valid geometry");
        assert_relative_eq!(result.length, geometry.length);
        assert_relative_eq!(result.stress * member.member.area, result.force, epsilon = 1.0e-9);
    }
    assert_relative_eq!(results.members[2].length, 200.0);
}
