use crate::core::models::fragment::BorderBond;
use crate::core::models::molecule::MoleculeGraph;
use crate::core::partition::connected;
use crate::engine::error::FragmentError;
use tracing::trace;

/// Lists every bond whose endpoints lie in different groups.
///
/// Must run after classification and group extension. Each bond is visited once
/// as `(a, b)` with `a < b`; the result is in ascending order.
pub fn find_border_bonds(graph: &mut MoleculeGraph) -> Result<Vec<BorderBond>, FragmentError> {
    let mut border = Vec::new();
    for (a, b) in graph.bonds() {
        if !connected(graph, a, b)? {
            trace!(a = %a, b = %b, "Border bond.");
            border.push(BorderBond::new(a, b));
        }
    }
    Ok(border)
}
