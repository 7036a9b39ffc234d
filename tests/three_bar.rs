use approx::assert_relative_eq;
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use trussopt::{
    analyze, vector, Analysis, FitnessPolicy, Load, Reaction, Support, Truss, TrussProblem,
    Vector2,
};

#[derive(Debug, Clone, Copy)]
struct ThreeBarGeometry {
    pinned_joint: NodeIndex,
    roller_joint: NodeIndex,
    loaded_joint: NodeIndex,
    diagonal: EdgeIndex,
}

fn build_three_bar_truss() -> (Truss, ThreeBarGeometry) {
    let mut truss = Truss::new();
    let pinned_joint = truss.add_joint(vector(0.0, 0.0));
    let roller_joint = truss.add_joint(vector(1.0, 0.0));
    let loaded_joint = truss.add_joint(vector(1.0, 1.0));
    truss
        .add_member(pinned_joint, roller_joint)
        .expect("base member joins existing joints");
    truss
        .add_member(roller_joint, loaded_joint)
        .expect("upright member joins existing joints");
    let diagonal = truss
        .add_member(loaded_joint, pinned_joint)
        .expect("diagonal member joins existing joints");

    (
        truss,
        ThreeBarGeometry {
            pinned_joint,
            roller_joint,
            loaded_joint,
            diagonal,
        },
    )
}

fn apply_three_bar_conditions(truss: &mut Truss, geometry: &ThreeBarGeometry) {
    truss
        .set_support(geometry.pinned_joint, Support::Pin)
        .expect("pin assignment succeeds");
    truss
        .set_support(geometry.roller_joint, Support::HorizontalRoller)
        .expect("roller assignment succeeds");
    truss
        .set_load(geometry.loaded_joint, vector(100.0, 0.0))
        .expect("load assignment succeeds");
}

fn free_bar() -> TrussProblem {
    TrussProblem {
        vertices: vec![vector(0.0, 0.0), vector(1.0, 0.0)],
        edges: vec![(0, 1)],
        reactions: Vec::new(),
        loads: vec![Load::new(1, vector(0.0, -10.0))],
    }
}

#[test]
fn builds_expected_topology() {
    let (truss, geometry) = build_three_bar_truss();

    assert_eq!(truss.joint_count(), 3);
    assert_eq!(truss.member_count(), 3);
    assert_eq!(geometry.pinned_joint.index(), 0);
    assert_eq!(geometry.loaded_joint.index(), 2);
    assert_eq!(geometry.diagonal.index(), 2);
}

#[test]
fn editor_and_problem_analysis_agree() {
    let (mut truss, geometry) = build_three_bar_truss();
    apply_three_bar_conditions(&mut truss, &geometry);

    assert!(truss.evaluate().expect("valid references"));
    let analysis = analyze(&truss.to_problem()).expect("valid references");
    let tensions = analysis.tensions().expect("determinate truss");

    for (index, &expected) in tensions.iter().enumerate() {
        let tension = truss
            .member_tension(EdgeIndex::new(index))
            .expect("tension stored after evaluation");
        assert_relative_eq!(tension, expected, epsilon = 1.0e-9);
    }
}

#[test]
fn three_bar_response_matches_hand_calculation() {
    let (mut truss, geometry) = build_three_bar_truss();
    apply_three_bar_conditions(&mut truss, &geometry);
    truss.evaluate().expect("valid references");

    let diagonal = truss
        .member_tension(geometry.diagonal)
        .expect("diagonal tension available");
    assert_relative_eq!(diagonal, 100.0 * 2.0_f64.sqrt(), epsilon = 1.0e-9);

    let pin = truss
        .joint_reaction(geometry.pinned_joint)
        .expect("pin reaction available");
    let roller = truss
        .joint_reaction(geometry.roller_joint)
        .expect("roller reaction available");
    assert_relative_eq!(pin.x, -100.0, epsilon = 1.0e-9);
    assert_relative_eq!(pin.y, -100.0, epsilon = 1.0e-9);
    assert_relative_eq!(roller.x, 0.0, epsilon = 1.0e-9);
    assert_relative_eq!(roller.y, 100.0, epsilon = 1.0e-9);
    assert!(truss.joint_reaction(geometry.loaded_joint).is_none());
    assert_relative_eq!(
        truss.max_force().expect("forces available"),
        100.0 * 2.0_f64.sqrt(),
        epsilon = 1.0e-9
    );
}

#[test]
fn reactions_balance_applied_loads() {
    let problem = TrussProblem {
        vertices: vec![vector(0.0, 0.0), vector(4.0, 0.0), vector(2.0, 3.0)],
        edges: vec![(0, 1), (1, 2), (2, 0)],
        reactions: vec![
            Reaction::new(0, Vector2::UNIT_X),
            Reaction::new(0, Vector2::UNIT_Y),
            Reaction::new(1, Vector2::UNIT_Y),
        ],
        loads: vec![Load::new(2, vector(15.0, -40.0))],
    };

    let solution = match analyze(&problem).expect("valid references") {
        Analysis::Solved(solution) => solution,
        Analysis::Unsolvable => panic!("determinate truss should solve"),
    };
    let total = solution.total_reaction();
    assert_relative_eq!(total.x, -15.0, epsilon = 1.0e-9);
    assert_relative_eq!(total.y, 40.0, epsilon = 1.0e-9);
}

#[test]
fn free_floating_bar_is_unsolvable() {
    let analysis = analyze(&free_bar()).expect("valid references");
    assert_eq!(analysis, Analysis::Unsolvable);

    let problem = free_bar();
    for policy in [FitnessPolicy::ForceRms, FitnessPolicy::ForceAndGeometry] {
        let rating = policy.evaluate(&problem.vertices, &problem.edges, analysis.tensions());
        assert_eq!(rating, f64::INFINITY);
    }
}

#[test]
fn removing_a_member_makes_the_truss_unsolvable() {
    let (mut truss, geometry) = build_three_bar_truss();
    apply_three_bar_conditions(&mut truss, &geometry);
    assert!(truss.evaluate().expect("valid references"));

    truss
        .remove_member(geometry.diagonal)
        .expect("diagonal exists");
    assert!(!truss.evaluate().expect("valid references"));
    assert!(truss.max_force().is_none());
    assert!(truss.joint_reaction(geometry.pinned_joint).is_none());
}
