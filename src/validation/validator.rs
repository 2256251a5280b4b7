//! The central validator that runs the dependency-graph passes in order.
use super::error::ValidationError;
use super::rules::{delivery, platform, structure};
use crate::store::{DependencyGraph, ModuleRecord};

/// Validates the module-dependency graph of an application package.
///
/// Stateless: every call builds its own graph and drops it on return. The
/// passes run in a fixed order and the first violation aborts the run, so
/// later passes can rely on the invariants earlier ones established.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleDependencyValidator;

impl ModuleDependencyValidator {
    pub fn new() -> Self { Self }

    /// Checks structure, then delivery modes, then platform versions.
    ///
    /// # Returns
    /// - `Ok(())` if the graph is consistent.
    /// - `Err(ValidationError)` describing the first violation found.
    pub fn validate_all_modules(&self, modules: &[ModuleRecord]) -> Result<(), ValidationError> {
        tracing::debug!(modules = modules.len(), "validating module dependencies");
        let graph = DependencyGraph::build(modules);

        run_pass("structure", || structure::validate_structure(&graph))?;
        run_pass("delivery-mode", || delivery::validate_delivery_modes(&graph))?;
        run_pass("platform-version", || platform::validate_platform_versions(&graph))?;

        tracing::debug!(edges = graph.edge_count(), "module dependency graph is valid");
        Ok(())
    }
}

fn run_pass<E>(name: &str, pass: impl FnOnce() -> Result<(), E>) -> Result<(), ValidationError>
where
    E: Into<ValidationError>,
{
    tracing::debug!(pass = name, "running validation pass");
    pass().map_err(|e| {
        let err: ValidationError = e.into();
        tracing::debug!(pass = name, kind = ?err.kind(), module = err.module(), error = %err, "validation pass rejected the graph");
        err
    })
}

/// Validates `modules` with a fresh [`ModuleDependencyValidator`].
pub fn validate_all_modules(modules: &[ModuleRecord]) -> Result<(), ValidationError> {
    ModuleDependencyValidator::new().validate_all_modules(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;
    use proptest::prelude::*;

    fn module(name: &str) -> ModuleRecord {
        if name == "base" {
            ModuleRecord::new(name)
        } else {
            ModuleRecord::new(name).with_split_id(name)
        }
    }

    fn expect_error(modules: &[ModuleRecord], kind: ValidationErrorKind, message: &str) {
        let err = validate_all_modules(modules).expect_err("validation should fail");
        assert_eq!(err.kind(), kind, "{err}");
        assert!(err.to_string().contains(message), "Msg: {err}");
    }

    #[test]
    fn test_valid_just_base() {
        assert_eq!(validate_all_modules(&[module("base")]), Ok(()));
    }

    #[test]
    fn test_missing_base() {
        expect_error(&[module("not_base")], ValidationErrorKind::MissingRoot, "Mandatory 'base' module is missing");
    }

    #[test]
    fn test_valid_tree() {
        let modules = vec![
            module("base"),
            module("featureA"),
            module("featureB"),
            module("subFeatureA1").with_uses_split(["featureA"]),
            module("subFeatureA2").with_uses_split(["featureA"]),
            module("subFeatureB1").with_uses_split(["featureB"]),
        ];
        assert_eq!(validate_all_modules(&modules), Ok(()));
    }

    #[test]
    fn test_valid_diamond() {
        let modules = vec![
            module("base"),
            module("f1"),
            module("f2"),
            module("f12").with_uses_split(["f1", "f2"]),
        ];
        assert_eq!(validate_all_modules(&modules), Ok(()));
    }

    #[test]
    fn test_reflexive_dependency() {
        let modules = vec![module("base"), module("feature").with_uses_split(["feature"])];
        let err = validate_all_modules(&modules).unwrap_err();
        assert!(err.to_string().contains("depends on itself"));
        assert!(!err.to_string().contains("Found cyclic dependency"));
    }

    #[test]
    fn test_duplicate_dependencies() {
        let modules = vec![
            module("base"),
            module("feature"),
            module("sub_feature").with_uses_split(["feature", "feature"]),
        ];
        expect_error(
            &modules,
            ValidationErrorKind::DuplicateDependency,
            "declares dependency on module 'feature' multiple times",
        );
    }

    #[test]
    fn test_references_unknown_module() {
        let modules = vec![module("base"), module("featureA").with_uses_split(["unknown"])];
        expect_error(
            &modules,
            ValidationErrorKind::UnknownDependency,
            "Module 'unknown' is referenced by <uses-split> but does not exist",
        );
    }

    #[test]
    fn test_cycle() {
        let modules = vec![
            module("base"),
            module("module1").with_uses_split(["module2"]),
            module("module2").with_uses_split(["module3"]),
            module("module3").with_uses_split(["module1"]),
        ];
        let err = validate_all_modules(&modules).unwrap_err();
        assert!(err.to_string().contains("Found cyclic dependency between modules"));
        assert!(!err.to_string().contains("depends on itself"));
    }

    #[test]
    fn test_base_declares_split_id() {
        expect_error(
            &[ModuleRecord::new("base").with_split_id("base")],
            ValidationErrorKind::RootDeclaresSplitId,
            "should not declare split ID",
        );
    }

    #[test]
    fn test_split_id_different_from_module_name() {
        let modules = vec![module("base"), ModuleRecord::new("feature").with_split_id("not_feature")];
        expect_error(
            &modules,
            ValidationErrorKind::SplitIdMismatch,
            "Module 'feature' declares in its manifest that the split ID is 'not_feature'",
        );
    }

    #[test]
    fn test_install_time_to_on_demand() {
        let modules = vec![
            module("base"),
            module("feature1").with_on_demand(true),
            module("feature2").with_uses_split(["feature1"]),
        ];
        expect_error(
            &modules,
            ValidationErrorKind::InstallTimeDependsOnOnDemand,
            "Install-time module 'feature2' declares dependency on on-demand module 'feature1'",
        );
    }

    #[test]
    fn test_install_time_to_on_demand_fails_even_with_matching_versions() {
        let modules = vec![
            module("base").with_min_sdk_version(21),
            module("feature1").with_on_demand(true).with_min_sdk_version(21),
            module("feature2").with_min_sdk_version(21).with_uses_split(["feature1"]),
        ];
        expect_error(&modules, ValidationErrorKind::InstallTimeDependsOnOnDemand, "'feature2'");
    }

    #[test]
    fn test_install_time_to_on_demand_fails_even_with_mismatched_versions() {
        // The versions disagree on every edge, but the mode pass runs first.
        let modules = vec![
            module("base").with_min_sdk_version(21),
            module("feature1").with_on_demand(true).with_min_sdk_version(19),
            module("feature2").with_min_sdk_version(21).with_uses_split(["feature1"]),
        ];
        expect_error(
            &modules,
            ValidationErrorKind::InstallTimeDependsOnOnDemand,
            "Install-time module 'feature2' declares dependency on on-demand module 'feature1'",
        );
    }

    #[test]
    fn test_on_demand_flag_on_base_does_not_fail_features() {
        let modules = vec![module("base").with_on_demand(true), module("feature")];
        assert_eq!(validate_all_modules(&modules), Ok(()));
    }

    #[test]
    fn test_mode_pairs_that_succeed() {
        let install_to_install = vec![module("base"), module("feature1"), module("feature2").with_uses_split(["feature1"])];
        let on_demand_to_install = vec![
            module("base"),
            module("feature1"),
            module("feature2").with_on_demand(true).with_uses_split(["feature1"]),
        ];
        let on_demand_to_on_demand = vec![
            module("base"),
            module("feature1").with_on_demand(true),
            module("feature2").with_on_demand(true).with_uses_split(["feature1"]),
        ];
        for modules in [install_to_install, on_demand_to_install, on_demand_to_on_demand] {
            assert_eq!(validate_all_modules(&modules), Ok(()));
        }
    }

    #[test]
    fn test_on_demand_min_sdk_smaller_than_on_demand_dependency() {
        let modules = vec![
            module("base").with_min_sdk_version(20),
            module("feature1").with_on_demand(true).with_uses_split(["feature2"]).with_min_sdk_version(19),
            module("feature2").with_on_demand(true).with_min_sdk_version(20),
        ];
        expect_error(
            &modules,
            ValidationErrorKind::OnDemandVersionTooLow,
            "On-demand module 'feature1' has a minSdkVersion(19), which is smaller than the \
             minSdkVersion(20) of its dependency 'feature2'.",
        );
    }

    #[test]
    fn test_on_demand_effective_min_sdk_smaller_than_on_demand_dependency() {
        let modules = vec![
            module("base").with_min_sdk_version(20),
            module("feature1").with_on_demand(true).with_uses_split(["feature2"]),
            module("feature2").with_on_demand(true).with_min_sdk_version(20),
        ];
        expect_error(
            &modules,
            ValidationErrorKind::OnDemandVersionTooLow,
            "On-demand module 'feature1' has a minSdkVersion(1), which is smaller than the \
             minSdkVersion(20) of its dependency 'feature2'.",
        );
    }

    #[test]
    fn test_on_demand_min_sdk_relative_to_base_always_succeeds() {
        for version in [None, Some(19), Some(20), Some(21)] {
            let mut feature = module("feature1").with_on_demand(true);
            feature.min_sdk_version = version;
            let modules = vec![module("base").with_min_sdk_version(20), feature];
            assert_eq!(validate_all_modules(&modules), Ok(()), "version {version:?}");
        }
    }

    #[test]
    fn test_install_time_min_sdk_against_base() {
        for (version, effective) in [(Some(21), 21), (Some(19), 19), (None, 1)] {
            let mut feature = module("feature1");
            feature.min_sdk_version = version;
            let modules = vec![module("base").with_min_sdk_version(20), feature];
            expect_error(
                &modules,
                ValidationErrorKind::InstallTimeVersionMismatch,
                &format!(
                    "Install-time module 'feature1' has a minSdkVersion({effective}) different than the \
                     minSdkVersion(20) of its dependency 'base'."
                ),
            );
        }

        let modules = vec![module("base").with_min_sdk_version(20), module("feature1").with_min_sdk_version(20)];
        assert_eq!(validate_all_modules(&modules), Ok(()));
    }

    #[test]
    fn test_install_time_chain_mismatch_cites_explicit_edge() {
        // feature1 agrees with base but not with feature2, which also disagrees with base.
        // feature1 is scanned first, so its explicit edge is the one reported.
        let modules = vec![
            module("base"),
            module("feature1").with_uses_split(["feature2"]),
            module("feature2").with_min_sdk_version(5),
        ];
        let err = validate_all_modules(&modules).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::InstallTimeVersionMismatch);
        assert_eq!(err.module(), Some("feature1"));
        assert!(err.to_string().contains("minSdkVersion(1) different than the minSdkVersion(5) of its dependency 'feature2'"));
    }

    #[test]
    fn test_structural_failure_short_circuits_later_passes() {
        // Both an unknown dependency and an install-time -> on-demand edge.
        let modules = vec![
            module("base"),
            module("od").with_on_demand(true),
            module("it").with_uses_split(["od", "ghost"]),
        ];
        let err = validate_all_modules(&modules).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::UnknownDependency);
    }

    #[test]
    fn test_validator_is_reusable() {
        let validator = ModuleDependencyValidator::new();
        assert!(validator.validate_all_modules(&[module("feature")]).is_err());
        assert!(validator.validate_all_modules(&[module("base")]).is_ok());
    }

    #[test]
    fn test_records_from_json() {
        let json = r#"[
            { "name": "base", "min_sdk_version": 21 },
            { "name": "camera", "split_id": "camera", "on_demand": true, "uses_split": ["filters"] },
            { "name": "filters", "split_id": "filters", "on_demand": true }
        ]"#;
        let modules: Vec<ModuleRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(validate_all_modules(&modules), Ok(()));
    }

    /// Builds a forward-only DAG: module `i` may depend only on modules `< i`,
    /// so the graph is acyclic and every module reaches base.
    fn layered_modules(deps: Vec<Vec<usize>>, on_demand: Vec<bool>, version: u32) -> Vec<ModuleRecord> {
        let mut modules = vec![module("base").with_min_sdk_version(version)];
        for (i, picks) in deps.into_iter().enumerate() {
            let name = format!("f{i}");
            let mut targets: Vec<String> = Vec::new();
            for p in picks {
                if i == 0 {
                    break;
                }
                let target = format!("f{}", p % i);
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
            let od = on_demand.get(i).copied().unwrap_or(false);
            modules.push(module(&name).with_on_demand(od).with_min_sdk_version(version).with_uses_split(targets));
        }
        modules
    }

    proptest! {
        #[test]
        fn prop_no_base_is_missing_root(
            names in proptest::collection::hash_set("[a-z]{1,6}", 0..8)
        ) {
            let modules: Vec<ModuleRecord> = names
                .into_iter()
                .filter(|n| n != "base")
                .map(|n| module(&n))
                .collect();
            let err = validate_all_modules(&modules).unwrap_err();
            prop_assert_eq!(err.kind(), ValidationErrorKind::MissingRoot);
        }

        #[test]
        fn prop_install_time_dags_validate(
            deps in proptest::collection::vec(proptest::collection::vec(0..16usize, 0..4), 0..16),
            version in 1..40u32,
        ) {
            let modules = layered_modules(deps, Vec::new(), version);
            prop_assert_eq!(validate_all_modules(&modules), Ok(()));
        }

        #[test]
        fn prop_on_demand_only_depending_on_on_demand_validates(
            deps in proptest::collection::vec(proptest::collection::vec(0..16usize, 0..4), 0..16),
        ) {
            // All features on demand at one version: every edge is either to base or
            // between equal on-demand versions.
            let on_demand = vec![true; deps.len()];
            let modules = layered_modules(deps, on_demand, 24);
            prop_assert_eq!(validate_all_modules(&modules), Ok(()));
        }

        #[test]
        fn prop_back_edge_introduces_cycle(
            len in 2..12usize,
        ) {
            // f0 <- f1 <- ... <- f{len-1}, then f0 depends on the last one.
            let mut modules = vec![module("base")];
            for i in 0..len {
                let mut m = module(&format!("f{i}"));
                if i > 0 {
                    m = m.with_uses_split([format!("f{}", i - 1)]);
                }
                modules.push(m);
            }
            modules[1].uses_split.push(format!("f{}", len - 1));
            let err = validate_all_modules(&modules).unwrap_err();
            prop_assert_eq!(err.kind(), ValidationErrorKind::CyclicDependency);
        }
    }
}
