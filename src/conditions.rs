use petgraph::stable_graph::NodeIndex;
use trussopt::{vector, Support, Truss, TrussEditError, Vector2};

/// Joints of the three-bar demonstration truss.
#[derive(Debug, Clone, Copy)]
pub struct ThreeBarGeometry {
    /// Pinned corner at the origin.
    pub pinned_joint: NodeIndex,
    /// Roller at the right end of the base.
    pub roller_joint: NodeIndex,
    /// Apex carrying the load.
    pub loaded_joint: NodeIndex,
}

/// Horizontal load applied at the apex, in newtons.
pub const APEX_LOAD: Vector2 = vector(100.0, 0.0);

/// Build the bare right-triangle truss before any supports or loads are applied.
///
/// Members are added in the order base, upright, diagonal.
pub fn build_three_bar_truss() -> Result<(Truss, ThreeBarGeometry), TrussEditError> {
    let mut truss = Truss::new();
    let pinned_joint = truss.add_joint(vector(0.0, 0.0));
    let roller_joint = truss.add_joint(vector(1.0, 0.0));
    let loaded_joint = truss.add_joint(vector(1.0, 1.0));
    truss.add_member(pinned_joint, roller_joint)?;
    truss.add_member(roller_joint, loaded_joint)?;
    truss.add_member(loaded_joint, pinned_joint)?;
    Ok((
        truss,
        ThreeBarGeometry {
            pinned_joint,
            roller_joint,
            loaded_joint,
        },
    ))
}

/// Apply supports and the apex load.
///
/// A pin and a roller give exactly three reactions, which together with three
/// members makes the truss statically determinate
/// (<https://en.wikipedia.org/wiki/Statically_determinate>).
pub fn apply_three_bar_conditions(
    truss: &mut Truss,
    geometry: &ThreeBarGeometry,
) -> Result<(), TrussEditError> {
    truss.set_support(geometry.pinned_joint, Support::Pin)?;

    // The roller sits on the ground, so it only pushes back vertically.
    truss.set_support(geometry.roller_joint, Support::HorizontalRoller)?;

    truss.set_load(geometry.loaded_joint, APEX_LOAD)
}
