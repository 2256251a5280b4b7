//! Minimum platform version consistency along dependency edges.

use crate::store::{DeliveryMode, DependencyGraph};
use crate::validation::error::VersionError;

/// Checks every edge against the minimum-platform-version rules.
///
/// - Install-time dependents must match their dependency's effective version
///   exactly. With the implicit root edge this pins every install-time module
///   to the root's version.
/// - On-demand dependents must be at least their dependency's version, unless
///   the dependency is the root: the installed base already satisfied the
///   root's requirement before any on-demand module is fetched.
///
/// Undeclared versions compare as the platform floor. Expects a graph that
/// passed the structural and delivery-mode checks.
pub(crate) fn validate_platform_versions(graph: &DependencyGraph<'_>) -> Result<(), VersionError> {
    let root = graph.root();

    for id in graph.module_ids() {
        let dependent = graph.module(id);
        let dependent_version = dependent.effective_min_sdk_version();

        for (edge, to) in graph.resolved_edges(id) {
            let dependency = graph.module(to);
            let dependency_version = dependency.effective_min_sdk_version();
            tracing::trace!(
                from = %dependent.name,
                to = %dependency.name,
                kind = ?edge.kind,
                dependent_version,
                dependency_version,
                "checking platform versions"
            );

            match dependent.delivery_mode() {
                DeliveryMode::InstallTime if dependent_version != dependency_version => {
                    return Err(VersionError::InstallTimeVersionMismatch {
                        dependent: dependent.name.clone(),
                        dependency: dependency.name.clone(),
                        dependent_version,
                        dependency_version,
                    });
                }
                DeliveryMode::OnDemand if Some(to) != root && dependent_version < dependency_version => {
                    return Err(VersionError::OnDemandVersionTooLow {
                        dependent: dependent.name.clone(),
                        dependency: dependency.name.clone(),
                        dependent_version,
                        dependency_version,
                    });
                }
                _ => {}
            }
        }
    }
    Ok(())
}
