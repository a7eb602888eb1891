//! Bridge and ring-membership detection (Tarjan low-link).
//!
//! A single depth-first traversal assigns every atom a discovery time and a
//! low-link value. A tree edge `(u, v)` is a bridge iff `low_link[v] >
//! discovery_time[u]`; otherwise both endpoints lie on a cycle and are marked
//! `is_cyclic`. The traversal uses an explicit stack so long alkyl chains
//! cannot exhaust the call stack.

use crate::core::models::atom::CycleState;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::MoleculeGraph;
use crate::engine::error::FragmentError;
use tracing::trace;

/// Discovery-time counter scoped to one bridge-detection pass.
#[derive(Debug, Default)]
struct DfsClock {
    time: usize,
}

impl DfsClock {
    fn tick(&mut self) -> usize {
        let now = self.time;
        self.time += 1;
        now
    }
}

fn discover(
    graph: &mut MoleculeGraph,
    id: AtomId,
    parent: Option<AtomId>,
    clock: &mut DfsClock,
) -> Result<(), FragmentError> {
    let time = clock.tick();
    let cycle = &mut graph.get_mut(id)?.cycle;
    cycle.visited = true;
    cycle.discovery_time = time;
    cycle.low_link = time;
    cycle.dfs_parent = parent;
    Ok(())
}

/// Runs one bridge-detection pass over the whole molecule.
///
/// All `CycleState` fields are reset first, so the pass can be repeated on the
/// same graph. Disconnected components are covered by restarting from every
/// unvisited atom in ascending ID order.
///
/// # Return
///
/// The bridge bonds as `(a, b)` with `a < b`, in ascending order.
///
/// # Errors
///
/// Returns [`FragmentError::MissingAtom`] if a bond refers to an absent atom.
pub fn detect_bridges(graph: &mut MoleculeGraph) -> Result<Vec<(AtomId, AtomId)>, FragmentError> {
    for (_, atom) in graph.atoms_iter_mut() {
        atom.cycle = CycleState::default();
    }

    let mut clock = DfsClock::default();
    let mut bridges = Vec::new();
    let starts: Vec<AtomId> = graph.ids().collect();

    for start in starts {
        if graph.get(start)?.cycle.visited {
            continue;
        }
        discover(graph, start, None, &mut clock)?;
        // (atom, index of the next bond to explore)
        let mut stack: Vec<(AtomId, usize)> = vec![(start, 0)];

        while let Some(&(u, next)) = stack.last() {
            let neighbor = graph.get(u)?.bonded.get(next).copied();
            match neighbor {
                Some(v) => {
                    if let Some(top) = stack.last_mut() {
                        top.1 += 1;
                    }
                    let v_cycle = graph.get(v)?.cycle;
                    if !v_cycle.visited {
                        discover(graph, v, Some(u), &mut clock)?;
                        stack.push((v, 0));
                    } else if graph.get(u)?.cycle.dfs_parent != Some(v) {
                        let u_cycle = &mut graph.get_mut(u)?.cycle;
                        u_cycle.low_link = u_cycle.low_link.min(v_cycle.discovery_time);
                    }
                }
                None => {
                    stack.pop();
                    let child = graph.get(u)?.cycle;
                    let Some(parent) = child.dfs_parent else {
                        continue;
                    };
                    let parent_cycle = &mut graph.get_mut(parent)?.cycle;
                    parent_cycle.low_link = parent_cycle.low_link.min(child.low_link);
                    if child.low_link > parent_cycle.discovery_time {
                        trace!(parent = %parent, child = %u, "Bridge bond found.");
                        bridges.push((parent.min(u), parent.max(u)));
                    } else {
                        parent_cycle.is_cyclic = true;
                        graph.get_mut(u)?.cycle.is_cyclic = true;
                    }
                }
            }
        }
    }

    bridges.sort_unstable();
    Ok(bridges)
}
