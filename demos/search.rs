use trussopt::{FitnessPolicy, Optimizer, OptimizerConfig, OptimizerState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = OptimizerConfig {
        fitness: FitnessPolicy::ForceAndGeometry,
        seed: Some(7),
        ..OptimizerConfig::default()
    };
    let mut optimizer = Optimizer::new(config);
    let mut state = OptimizerState::default();
    optimizer.run(&mut state, 2_000)?;

    println!(
        "best rating {:.3} after {} improvements, {} points",
        state.best.rating,
        state.accepted,
        state.best.points.len()
    );
    Ok(())
}
