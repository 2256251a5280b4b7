use super::types::*;
use std::collections::HashMap;

/// The dependency graph of one validation run.
///
/// Nodes are the input modules, addressed by their position. Each module's
/// outgoing edges are stored contiguously: the implicit root edge first
/// (non-root modules only), then the explicit edges in declaration order.
/// The graph borrows the records and is dropped when validation returns.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    modules: &'a [ModuleRecord],

    // First occurrence wins; repeated names are rejected by the structural pass.
    by_name: HashMap<&'a str, ModuleId>,

    // Topology (CSR-ish)
    edges_flat: Vec<Edge<'a>>,
    edge_ranges: Vec<(u32, u32)>, // (start, count)
}

impl<'a> DependencyGraph<'a> {
    /// Builds nodes and edges from the module list.
    ///
    /// Never fails: dangling targets, self references and duplicates are
    /// recorded as-is for the structural pass to reject.
    pub fn build(modules: &'a [ModuleRecord]) -> Self {
        let mut by_name = HashMap::with_capacity(modules.len());
        for (i, module) in modules.iter().enumerate() {
            by_name.entry(module.name.as_str()).or_insert(ModuleId::new(i));
        }

        let explicit: usize = modules.iter().map(|m| m.uses_split.len()).sum();
        let mut edges_flat = Vec::with_capacity(explicit + modules.len());
        let mut edge_ranges = Vec::with_capacity(modules.len());

        for module in modules {
            let start = edges_flat.len() as u32;

            // Present even when no root exists; existence is checked separately.
            if !module.is_root() {
                edges_flat.push(Edge {
                    target: ROOT_MODULE_NAME,
                    resolved: by_name.get(ROOT_MODULE_NAME).copied(),
                    kind: EdgeKind::Implicit,
                });
            }

            for dep in &module.uses_split {
                edges_flat.push(Edge {
                    target: dep.as_str(),
                    resolved: by_name.get(dep.as_str()).copied(),
                    kind: EdgeKind::Explicit,
                });
            }

            let count = edges_flat.len() as u32 - start;
            edge_ranges.push((start, count));
        }

        Self { modules, by_name, edges_flat, edge_ranges }
    }

    pub fn count(&self) -> usize { self.modules.len() }

    pub fn edge_count(&self) -> usize { self.edges_flat.len() }

    pub fn modules(&self) -> &'a [ModuleRecord] { self.modules }

    pub fn module(&self, id: ModuleId) -> &'a ModuleRecord { &self.modules[id.index()] }

    pub fn module_ids(&self) -> impl Iterator<Item = ModuleId> {
        (0..self.modules.len()).map(ModuleId::new)
    }

    pub fn lookup(&self, name: &str) -> Option<ModuleId> { self.by_name.get(name).copied() }

    pub fn root(&self) -> Option<ModuleId> { self.lookup(ROOT_MODULE_NAME) }

    #[inline(always)]
    pub fn edges(&self, id: ModuleId) -> &[Edge<'a>] {
        let (start, count) = self.edge_ranges[id.index()];
        &self.edges_flat[start as usize..(start + count) as usize]
    }

    /// Edges of `id` whose targets exist, paired with the target module.
    pub fn resolved_edges(&self, id: ModuleId) -> impl Iterator<Item = (&Edge<'a>, ModuleId)> + '_ {
        self.edges(id).iter().filter_map(|e| e.resolved.map(|to| (e, to)))
    }
}
