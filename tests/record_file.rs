use std::path::PathBuf;

use approx::assert_relative_eq;
use truss3d::{analyze, load_model, render_tables, InputError, MemberState, Precision};

fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn tripod_file_loads_and_solves() {
    let model = load_model(demo_path("tripod.csv")).expect("demo file parses");
    assert_eq!(model.node_count(), 4);
    assert_eq!(model.member_count(), 3);

    let results = analyze(&model).expect("tripod is stable");
    for component in results.equilibrium_residual(&model) {
        assert_relative_eq!(component, 0.0, epsilon = 1.0e-8);
    }
    assert!(results
        .members
        .iter()
        .all(|member| member.state == MemberState::Compression));

    let report = render_tables(&model, &results, Precision::new(4).expect("valid precision"));
    assert_eq!(report.matches("Compression").count(), 3);
}

#[test]
fn missing_file_is_an_io_error() {
    let error = load_model(demo_path("no_such_model.csv")).expect_err("missing file");
    assert!(matches!(error, InputError::Io { .. }));
}
