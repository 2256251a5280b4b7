use crate::store::{DependencyGraph, ModuleId};

/// An edge that closes a cycle: `to` was still being visited when the
/// traversal reached it again from `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackEdge {
    pub from: ModuleId,
    pub to: ModuleId,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    None,
    Visiting, // Used for cycle detection
    Visited,
}

/// Searches the graph for a cycle using a three-colour depth-first traversal.
///
/// Roots are tried in input order, and each module's edges are followed in
/// storage order (implicit root edge, then declaration order), so the
/// reported back edge is deterministic. Edges to missing modules are
/// skipped.
///
/// The traversal keeps its own stack instead of recursing, so deep
/// dependency chains cannot overflow the thread stack.
pub fn find_cycle(graph: &DependencyGraph<'_>) -> Option<BackEdge> {
    let count = graph.count();
    let mut state = vec![VisitState::None; count];
    // (module, index of the next edge to follow)
    let mut stack: Vec<(ModuleId, usize)> = Vec::new();

    for start in graph.module_ids() {
        if state[start.index()] != VisitState::None {
            continue;
        }
        state[start.index()] = VisitState::Visiting;
        stack.push((start, 0));

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            let edges = graph.edges(node);
            if next == edges.len() {
                state[node.index()] = VisitState::Visited;
                stack.pop();
                continue;
            }
            top.1 += 1;
            let edge = edges[next];

            let Some(target) = edge.resolved else { continue };
            match state[target.index()] {
                VisitState::Visited => {}
                VisitState::Visiting => return Some(BackEdge { from: node, to: target }),
                VisitState::None => {
                    state[target.index()] = VisitState::Visiting;
                    stack.push((target, 0));
                }
            }
        }
    }

    None
}
