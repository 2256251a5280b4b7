//! Delivery-mode compatibility between a module and its dependencies.

use crate::store::{DeliveryMode, DependencyGraph};
use crate::validation::error::ModeError;

/// An install-time module must never depend on an on-demand one: it would be
/// installed without something it needs. Every other pairing is allowed.
///
/// Expects a structurally valid graph. The implicit root edge passes through
/// the same rule; the root is install-time, so it cannot trip it.
pub(crate) fn validate_delivery_modes(graph: &DependencyGraph<'_>) -> Result<(), ModeError> {
    for id in graph.module_ids() {
        let dependent = graph.module(id);
        if dependent.delivery_mode() == DeliveryMode::OnDemand {
            continue;
        }

        for (edge, to) in graph.resolved_edges(id) {
            let dependency = graph.module(to);
            tracing::trace!(from = %dependent.name, to = %dependency.name, kind = ?edge.kind, "checking delivery mode");

            if dependency.delivery_mode() == DeliveryMode::OnDemand {
                return Err(ModeError::InstallTimeDependsOnOnDemand {
                    dependent: dependent.name.clone(),
                    dependency: dependency.name.clone(),
                });
            }
        }
    }
    Ok(())
}
