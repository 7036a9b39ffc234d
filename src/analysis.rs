use serde::Serialize;
use trussopt::{
    analyze, Analysis, AnalysisError, Candidate, Optimizer, OptimizerConfig, OptimizerState,
    Strategy, TrussProblem,
};

/// Summary of a single equilibrium analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// The analysed problem.
    pub problem: TrussProblem,
    /// Solving strategy implied by the problem shape.
    pub strategy: Strategy,
    /// Tensions and reactions, or the unsolvable marker.
    pub analysis: Analysis,
}

/// Solve a truss problem and keep the inputs alongside the result.
///
/// The equilibrium method is the one described at
/// <https://en.wikipedia.org/wiki/Truss#Analysis>.
pub fn run_analysis(problem: TrussProblem) -> Result<AnalysisSummary, AnalysisError> {
    let analysis = analyze(&problem)?;
    let strategy = Strategy::for_shape(problem.equation_count(), problem.unknown_count());
    Ok(AnalysisSummary {
        problem,
        strategy,
        analysis,
    })
}

/// Summary of a topology search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSummary {
    /// Number of ticks run.
    pub ticks: u64,
    /// Number of ticks that improved the best layout.
    pub accepted: u64,
    /// Best layout found.
    pub best: Candidate,
}

/// Run `ticks` optimizer ticks from a fresh state.
pub fn run_search(config: OptimizerConfig, ticks: u64) -> Result<SearchSummary, AnalysisError> {
    let mut optimizer = Optimizer::new(config);
    let mut state = OptimizerState::default();
    optimizer.run(&mut state, ticks)?;
    Ok(SearchSummary {
        ticks: state.ticks,
        accepted: state.accepted,
        best: state.best,
    })
}
