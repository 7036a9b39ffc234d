use std::fmt::Write;

use crate::analysis::{AnalysisSummary, SearchSummary};
use trussopt::Analysis;

/// Render a textual summary of an equilibrium analysis.
///
/// Positive tensions pull on the joints (tension), negative ones push
/// (compression), matching the sign convention in
/// <https://en.wikipedia.org/wiki/Tension_(physics)>.
#[must_use]
pub fn render_summary(summary: &AnalysisSummary) -> String {
    let mut output = String::new();
    let problem = &summary.problem;

    writeln!(
        &mut output,
        "Truss with {} joints, {} members, {} reactions ({} equations, {} unknowns, {:?} solve)",
        problem.vertices.len(),
        problem.edges.len(),
        problem.reactions.len(),
        problem.equation_count(),
        problem.unknown_count(),
        summary.strategy,
    )
    .expect("writing to string cannot fail");

    let solution = match &summary.analysis {
        Analysis::Solved(solution) => solution,
        Analysis::Unsolvable => {
            output.push_str("System is unsolvable: the supports cannot balance the loads\n");
            return output;
        }
    };

    for (index, (&(a, b), tension)) in problem.edges.iter().zip(&solution.tensions).enumerate() {
        writeln!(
            &mut output,
            "Member {index} ({a} -> {b}): tension = {tension:+.3} N"
        )
        .expect("writing to string cannot fail");
    }

    for (vertex, reaction) in solution.reactions.iter().enumerate() {
        if let Some(reaction) = reaction {
            writeln!(
                &mut output,
                "Reaction at joint {vertex}: ({:+.3}, {:+.3}) N",
                reaction.x, reaction.y
            )
            .expect("writing to string cannot fail");
        }
    }

    writeln!(&mut output, "Peak member force: {:.3} N", solution.max_force())
        .expect("writing to string cannot fail");

    output
}

/// Render a textual summary of a topology search.
#[must_use]
pub fn render_search(summary: &SearchSummary) -> String {
    let mut output = String::new();
    writeln!(
        &mut output,
        "Search ran {} ticks, {} improvements",
        summary.ticks, summary.accepted
    )
    .expect("writing to string cannot fail");

    let best = &summary.best;
    if !best.is_rated() {
        output.push_str("No solvable layout found\n");
        return output;
    }

    writeln!(
        &mut output,
        "Best rating: {:.3} ({} points, {} members)",
        best.rating,
        best.points.len(),
        best.edges.len()
    )
    .expect("writing to string cannot fail");
    for (index, point) in best.points.iter().enumerate() {
        writeln!(&mut output, "  point {index}: ({:.1}, {:.1})", point.x, point.y)
            .expect("writing to string cannot fail");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use trussopt::{vector, Candidate, Strategy, TrussProblem, TrussSolution};

    fn summary(analysis: Analysis) -> AnalysisSummary {
        AnalysisSummary {
            problem: TrussProblem {
                vertices: vec![vector(0.0, 0.0), vector(1.0, 0.0)],
                edges: vec![(0, 1)],
                ..TrussProblem::default()
            },
            strategy: Strategy::LeastSquares,
            analysis,
        }
    }

    #[test]
    fn formats_human_readable_report() {
        let report = render_summary(&summary(Analysis::Solved(TrussSolution {
            tensions: vec![-12.5],
            reactions: vec![Some(vector(1.0, -2.0)), None],
        })));
        assert!(report.contains("2 joints, 1 members"));
        assert!(report.contains("tension = -12.500 N"));
        assert!(report.contains("Reaction at joint 0: (+1.000, -2.000) N"));
        assert!(!report.contains("joint 1:"));
        assert!(report.contains("Peak member force: 12.500 N"));
    }

    #[test]
    fn reports_unsolvable_instead_of_values() {
        let report = render_summary(&summary(Analysis::Unsolvable));
        assert!(report.contains("unsolvable"));
        assert!(!report.contains("tension"));
    }

    #[test]
    fn search_without_solution_says_so() {
        let report = render_search(&SearchSummary {
            ticks: 3,
            accepted: 0,
            best: Candidate::unrated(),
        });
        assert!(report.contains("3 ticks"));
        assert!(report.contains("No solvable layout"));
    }
}
