//! Editable truss model with live equilibrium results.

use std::collections::HashMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, TrussEditError};
use crate::geometry::Vector2;
use crate::problem::{Load, Reaction, TrussProblem};
use crate::solution::{analyze, Analysis};

/// Support condition of a joint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Support {
    /// Free joint.
    #[default]
    None,
    /// Restrained in both directions.
    Pin,
    /// Rolls along a horizontal surface; only vertical reaction.
    HorizontalRoller,
    /// Rolls along a vertical surface; only horizontal reaction.
    VerticalRoller,
}

impl Support {
    /// Unit directions of the reactions this support provides.
    ///
    /// # Examples
    /// ```
    /// use trussopt::{Support, Vector2};
    ///
    /// assert_eq!(Support::Pin.directions(), &[Vector2::UNIT_X, Vector2::UNIT_Y]);
    /// assert!(Support::None.directions().is_empty());
    /// ```
    #[must_use]
    pub fn directions(self) -> &'static [Vector2] {
        match self {
            Support::None => &[],
            Support::Pin => &[Vector2::UNIT_X, Vector2::UNIT_Y],
            Support::HorizontalRoller => &[Vector2::UNIT_Y],
            Support::VerticalRoller => &[Vector2::UNIT_X],
        }
    }

    /// The next support in editing order, wrapping back to [`Support::None`].
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Support::None => Support::Pin,
            Support::Pin => Support::HorizontalRoller,
            Support::HorizontalRoller => Support::VerticalRoller,
            Support::VerticalRoller => Support::None,
        }
    }
}

/// Internal representation of a truss joint.
#[derive(Clone, Debug)]
struct Joint {
    /// Position of the joint.
    position: Vector2,
    /// Support condition.
    support: Support,
    /// External load, if any.
    load: Option<Vector2>,
    /// Solved total support reaction.
    reaction: Option<Vector2>,
}

impl Joint {
    /// Create a free, unloaded joint at `position`.
    fn new(position: Vector2) -> Self {
        Self {
            position,
            support: Support::None,
            load: None,
            reaction: None,
        }
    }
}

/// Internal representation of a truss member.
#[derive(Clone, Debug, Default)]
struct Member {
    /// Solved tension; positive pulls the joints together.
    tension: Option<f64>,
}

/// Container for a pin-jointed truss being edited.
///
/// Joint and member indices stay valid until the element itself is removed.
///
/// # Examples
/// ```
/// use trussopt::{vector, Support, Truss};
///
/// let mut truss = Truss::new();
/// let a = truss.add_joint(vector(0.0, 0.0));
/// let b = truss.add_joint(vector(1.0, 0.0));
/// let c = truss.add_joint(vector(1.0, 1.0));
/// let ab = truss.add_member(a, b)?;
/// truss.add_member(b, c)?;
/// truss.add_member(c, a)?;
/// truss.set_support(a, Support::Pin)?;
/// truss.set_support(b, Support::HorizontalRoller)?;
/// truss.set_load(c, vector(100.0, 0.0))?;
///
/// assert!(truss.evaluate()?);
/// assert!(truss.member_tension(ab).unwrap().abs() < 1.0e-9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Truss {
    /// Arena storage for joints and members.
    graph: StableGraph<Joint, Member>,
    /// Indicates whether the cached analysis results are current.
    analysis_valid: bool,
    /// Whether the last analysis found an equilibrium solution.
    solvable: bool,
}

impl Truss {
    /// Create an empty truss.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            analysis_valid: false,
            solvable: false,
        }
    }

    /// Return the number of joints in the truss.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members in the truss.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a new free joint.
    pub fn add_joint(&mut self, position: Vector2) -> NodeIndex {
        self.invalidate();
        self.graph.add_node(Joint::new(position))
    }

    /// Mutable access to a joint, invalidating results.
    fn joint_mut(&mut self, joint: NodeIndex) -> Result<&mut Joint, TrussEditError> {
        if !self.graph.contains_node(joint) {
            return Err(TrussEditError::UnknownJoint(joint));
        }
        self.invalidate();
        self.graph
            .node_weight_mut(joint)
            .ok_or(TrussEditError::UnknownJoint(joint))
    }

    /// Update the position of an existing joint.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn move_joint(&mut self, joint: NodeIndex, position: Vector2) -> Result<(), TrussEditError> {
        self.joint_mut(joint)?.position = position;
        Ok(())
    }

    /// Remove a joint together with its members and load.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn remove_joint(&mut self, joint: NodeIndex) -> Result<(), TrussEditError> {
        if !self.graph.contains_node(joint) {
            return Err(TrussEditError::UnknownJoint(joint));
        }
        self.invalidate();
        self.graph
            .remove_node(joint)
            .map(|_| ())
            .ok_or(TrussEditError::UnknownJoint(joint))
    }

    /// Connect two joints with a new member.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when either joint is missing and
    /// [`TrussEditError::SelfConnectedMember`] when `start == end`.
    pub fn add_member(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
    ) -> Result<EdgeIndex, TrussEditError> {
        for joint in [start, end] {
            if !self.graph.contains_node(joint) {
                return Err(TrussEditError::UnknownJoint(joint));
            }
        }
        if start == end {
            return Err(TrussEditError::SelfConnectedMember(start));
        }
        self.invalidate();
        Ok(self.graph.add_edge(start, end, Member::default()))
    }

    /// Remove a member from the truss.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownMember`] when `member` is not part of this truss.
    pub fn remove_member(&mut self, member: EdgeIndex) -> Result<(), TrussEditError> {
        if self.graph.edge_weight(member).is_none() {
            return Err(TrussEditError::UnknownMember(member));
        }
        self.invalidate();
        self.graph
            .remove_edge(member)
            .map(|_| ())
            .ok_or(TrussEditError::UnknownMember(member))
    }

    /// Set the support condition of a joint.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn set_support(&mut self, joint: NodeIndex, support: Support) -> Result<(), TrussEditError> {
        self.joint_mut(joint)?.support = support;
        Ok(())
    }

    /// Advance a joint to the next support condition and return it.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn cycle_support(&mut self, joint: NodeIndex) -> Result<Support, TrussEditError> {
        let node = self.joint_mut(joint)?;
        node.support = node.support.cycle();
        Ok(node.support)
    }

    /// Apply a point load to a joint, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn set_load(&mut self, joint: NodeIndex, load: Vector2) -> Result<(), TrussEditError> {
        self.joint_mut(joint)?.load = Some(load);
        Ok(())
    }

    /// Remove the load from a joint.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn remove_load(&mut self, joint: NodeIndex) -> Result<(), TrussEditError> {
        self.joint_mut(joint)?.load = None;
        Ok(())
    }

    /// Position of a joint.
    #[must_use]
    pub fn joint_position(&self, joint: NodeIndex) -> Option<Vector2> {
        self.graph.node_weight(joint).map(|joint| joint.position)
    }

    /// Support condition of a joint.
    #[must_use]
    pub fn joint_support(&self, joint: NodeIndex) -> Option<Support> {
        self.graph.node_weight(joint).map(|joint| joint.support)
    }

    /// Retrieve the solved reaction at a joint; `None` before analysis, when the
    /// system is unsolvable or when the joint is unsupported.
    #[must_use]
    pub fn joint_reaction(&self, joint: NodeIndex) -> Option<Vector2> {
        self.graph
            .node_weight(joint)
            .and_then(|joint| joint.reaction)
    }

    /// Retrieve the solved tension in a member; `None` before analysis or when the
    /// system is unsolvable.
    #[must_use]
    pub fn member_tension(&self, member: EdgeIndex) -> Option<f64> {
        self.graph
            .edge_weight(member)
            .and_then(|member| member.tension)
    }

    /// Largest absolute member tension of the last successful analysis.
    #[must_use]
    pub fn max_force(&self) -> Option<f64> {
        self.graph
            .edge_indices()
            .filter_map(|member| self.graph[member].tension)
            .map(f64::abs)
            .reduce(f64::max)
    }

    /// Describe the current truss as a [`TrussProblem`].
    ///
    /// Live joints receive dense vertex ids in arena order.
    #[must_use]
    pub fn to_problem(&self) -> TrussProblem {
        self.problem_with_index_map(&self.node_index_map())
    }

    /// Solve the truss and store tensions and reactions.
    ///
    /// Returns `Ok(false)` when the structure cannot be in equilibrium, in which
    /// case every stored tension and reaction is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] when the generated problem is inconsistent.
    pub fn evaluate(&mut self) -> Result<bool, AnalysisError> {
        if self.analysis_valid {
            return Ok(self.solvable);
        }
        let index_map = self.node_index_map();
        let problem = self.problem_with_index_map(&index_map);
        let analysis = analyze(&problem)?;
        self.store_results(&index_map, &analysis);
        self.analysis_valid = true;
        self.solvable = analysis.is_solved();
        Ok(self.solvable)
    }

    /// Reset cached analysis results when the topology or properties change.
    fn invalidate(&mut self) {
        if self.analysis_valid {
            self.clear_results();
            self.analysis_valid = false;
            self.solvable = false;
        }
    }

    /// Mark every result as absent.
    fn clear_results(&mut self) {
        let nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        for node in nodes {
            self.graph[node].reaction = None;
        }
        let edges: Vec<EdgeIndex> = self.graph.edge_indices().collect();
        for edge in edges {
            self.graph[edge].tension = None;
        }
    }

    /// Construct a mapping from arena indices to contiguous vertex ids.
    fn node_index_map(&self) -> HashMap<NodeIndex, usize> {
        self.graph
            .node_indices()
            .enumerate()
            .map(|(idx, node)| (node, idx))
            .collect()
    }

    /// Build the problem description using `index_map` for vertex ids.
    fn problem_with_index_map(&self, index_map: &HashMap<NodeIndex, usize>) -> TrussProblem {
        let mut problem = TrussProblem::default();
        for node in self.graph.node_indices() {
            let joint = &self.graph[node];
            let vertex = index_map[&node];
            problem.vertices.push(joint.position);
            problem.reactions.extend(
                joint
                    .support
                    .directions()
                    .iter()
                    .map(|&direction| Reaction::new(vertex, direction)),
            );
            if let Some(force) = joint.load {
                problem.loads.push(Load::new(vertex, force));
            }
        }
        for edge in self.graph.edge_indices() {
            if let Some((start, end)) = self.graph.edge_endpoints(edge) {
                problem.edges.push((index_map[&start], index_map[&end]));
            }
        }
        problem
    }

    /// Copy an analysis back onto joints and members.
    fn store_results(&mut self, index_map: &HashMap<NodeIndex, usize>, analysis: &Analysis) {
        let Some(solution) = analysis.solution() else {
            self.clear_results();
            return;
        };
        let edges: Vec<EdgeIndex> = self.graph.edge_indices().collect();
        for (member, &tension) in edges.into_iter().zip(&solution.tensions) {
            self.graph[member].tension = Some(tension);
        }
        let nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        for node in nodes {
            self.graph[node].reaction = solution.reactions[index_map[&node]];
        }
    }
}
