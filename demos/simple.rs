use truss3d::{analyze, load, point, render_tables, Load, Node, Precision, StructuralModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A planar three-node truss; every node is held out of plane.
    let mut model = StructuralModel::new();
    model.add_node(Node::new(1, point(0.0, 0.0, 0.0), [true, true, true], Load::default()))?;
    model.add_node(Node::new(
        2,
        point(60.0, 60.0, 0.0),
        [false, false, true],
        load(0.0, -10.0, 0.0),
    ))?;
    model.add_node(Node::new(3, point(120.0, 0.0, 0.0), [false, true, true], Load::default()))?;

    model.add_member(1, 2, 1, 29_000.0, 0.75)?;
    model.add_member(2, 2, 3, 29_000.0, 0.75)?;
    model.add_member(3, 1, 3, 29_000.0, 0.5)?;

    let results = analyze(&model)?;
    print!("{}", render_tables(&model, &results, Precision::default()));

    if let Some(member) = results.max_stress_member().and_then(|index| results.member(index)) {
        println!("\nlargest stress: {:.3} ksi ({})", member.stress, member.state);
    }

    Ok(())
}
