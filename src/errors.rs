//! Error types produced while editing, solving or configuring trusses.

use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

/// Which part of a [`TrussProblem`](crate::TrussProblem) holds a bad vertex reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    /// A member endpoint.
    Edge,
    /// A support reaction.
    Reaction,
    /// An applied load.
    Load,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReferenceKind::Edge => "edge",
            ReferenceKind::Reaction => "reaction",
            ReferenceKind::Load => "load",
        };
        f.write_str(name)
    }
}

/// Error returned when a truss problem cannot be analysed at all.
///
/// An unsolvable structure is not an error; see [`Analysis::Unsolvable`](crate::Analysis).
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when an edge, reaction or load names a vertex that does not exist.
    #[error("{kind} {index} refers to vertex {vertex}, but only {vertex_count} vertices exist")]
    InvalidReference {
        /// Which list the reference came from.
        kind: ReferenceKind,
        /// Position of the offending entry within its list.
        index: usize,
        /// The vertex id that was referenced.
        vertex: usize,
        /// Number of vertices in the problem.
        vertex_count: usize,
    },
}

/// Error returned by the linear system solver.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SolveError {
    /// Returned when the matrix (or its normal-equation form) cannot be inverted.
    #[error("equilibrium matrix is singular; check supports and connectivity")]
    Singular,
    /// Returned when the system has no equations or no unknowns.
    #[error("equilibrium system is empty ({rows} rows, {columns} columns)")]
    EmptySystem {
        /// Number of equations.
        rows: usize,
        /// Number of unknowns.
        columns: usize,
    },
    /// Returned when the load vector length does not match the matrix height.
    #[error("load vector has {load} entries but the matrix has {rows} rows")]
    DimensionMismatch {
        /// Number of matrix rows.
        rows: usize,
        /// Number of load entries.
        load: usize,
    },
}

/// Error returned when editing a [`Truss`](crate::Truss) with invalid indices.
///
/// Attempting to mutate the structure with a joint or member that is not part of the
/// current arena returns a descriptive variant so callers can decide how to recover.
///
/// # Examples
///
/// ```
/// use petgraph::stable_graph::EdgeIndex;
/// use trussopt::{Truss, TrussEditError};
///
/// let mut truss = Truss::new();
/// let invalid_member = EdgeIndex::new(42);
/// let error = truss
///     .remove_member(invalid_member)
///     .expect_err("unknown member is rejected");
/// assert_eq!(error, TrussEditError::UnknownMember(invalid_member));
/// ```
#[derive(Debug, Error, PartialEq)]
pub enum TrussEditError {
    /// Returned when a joint cannot be found in the truss.
    #[error("joint {0:?} does not exist in this truss")]
    UnknownJoint(NodeIndex),
    /// Returned when a member cannot be found in the truss.
    #[error("member {0:?} does not exist in this truss")]
    UnknownMember(EdgeIndex),
    /// Returned when a member would connect a joint to itself.
    #[error("member cannot connect joint {0:?} to itself")]
    SelfConnectedMember(NodeIndex),
}

/// Error returned when loading an optimizer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the configuration is not valid TOML for the expected schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// Returned when a parsed value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
