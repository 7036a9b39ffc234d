#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod config;
mod errors;
mod fitness;
mod geometry;
mod matrix;
mod optimizer;
mod problem;
mod solution;
mod solver;
mod triangulation;
mod truss;

pub use config::{OptimizerConfig, Region};
pub use errors::{AnalysisError, ConfigError, ReferenceKind, SolveError, TrussEditError};
pub use fitness::FitnessPolicy;
pub use geometry::{vector, Vector2};
pub use matrix::{assemble, equilibrium_matrix, load_vector};
pub use optimizer::{
    build_problem, Candidate, Optimizer, OptimizerState, TickOutcome, ANCHOR_COUNT,
};
pub use problem::{edge_lengths, Edge, Load, Reaction, TrussProblem};
pub use solution::{analyze, interpret, Analysis, TrussSolution, EQUILIBRIUM_TOLERANCE};
pub use solver::{residual, solve, Strategy};
pub use triangulation::{mesh_edges, next_halfedge, Delaunay, HalfEdgeMesh, Triangulate};
pub use truss::{Support, Truss};
