//! Structural well-formedness of the dependency graph.

use crate::analysis::topology;
use crate::store::{DependencyGraph, EdgeKind, ModuleRecord};
use crate::validation::error::StructuralError;
use std::collections::HashSet;

/// Runs the structural checks in order and reports the first violation.
///
/// Within each check modules are scanned in input order, and a module's
/// dependencies in declaration order. Later passes rely on everything
/// established here: a single root without a split id, and an acyclic
/// graph whose edges all resolve.
pub(crate) fn validate_structure(graph: &DependencyGraph<'_>) -> Result<(), StructuralError> {
    let modules = graph.modules();

    check_single_root(modules)?;
    check_unique_names(modules)?;
    check_split_ids(modules)?;

    for module in modules {
        if module.uses_split.iter().any(|dep| *dep == module.name) {
            return Err(StructuralError::SelfDependency { module: module.name.clone() });
        }
    }

    for module in modules {
        let mut seen = HashSet::with_capacity(module.uses_split.len());
        if let Some(dup) = module.uses_split.iter().find(|dep| !seen.insert(dep.as_str())) {
            return Err(StructuralError::DuplicateDependency {
                module: module.name.clone(),
                target: dup.clone(),
            });
        }
    }

    for id in graph.module_ids() {
        let dangling = graph
            .edges(id)
            .iter()
            .find(|e| e.kind == EdgeKind::Explicit && e.resolved.is_none());
        if let Some(edge) = dangling {
            return Err(StructuralError::UnknownDependency {
                module: graph.module(id).name.clone(),
                target: edge.target.to_string(),
            });
        }
    }

    // The root has no outgoing edges, so it can never sit on a cycle.
    if let Some(back) = topology::find_cycle(graph) {
        tracing::debug!(
            from = %graph.module(back.from).name,
            to = %graph.module(back.to).name,
            "edge closes a dependency cycle"
        );
        return Err(StructuralError::CyclicDependency);
    }

    Ok(())
}

fn check_single_root(modules: &[ModuleRecord]) -> Result<(), StructuralError> {
    let roots = modules.iter().filter(|m| m.is_root()).count();
    if roots != 1 {
        return Err(StructuralError::MissingRoot);
    }
    Ok(())
}

fn check_unique_names(modules: &[ModuleRecord]) -> Result<(), StructuralError> {
    let mut seen = HashSet::with_capacity(modules.len());
    for module in modules {
        if !seen.insert(module.name.as_str()) {
            return Err(StructuralError::DuplicateModuleName { module: module.name.clone() });
        }
    }
    Ok(())
}

fn check_split_ids(modules: &[ModuleRecord]) -> Result<(), StructuralError> {
    if let Some(root) = modules.iter().find(|m| m.is_root()) {
        if let Some(declared) = &root.split_id {
            return Err(StructuralError::RootDeclaresSplitId { declared: declared.clone() });
        }
    }

    for module in modules.iter().filter(|m| !m.is_root()) {
        if module.split_id.as_deref() != Some(module.name.as_str()) {
            return Err(StructuralError::SplitIdMismatch {
                module: module.name.clone(),
                declared: module.split_id.clone(),
            });
        }
    }
    Ok(())
}
