//! Defines the error types for the validation module.
//!
//! Each pass reports through its own enum. `ValidationError` is what the
//! build pipeline sees; its message is shown to the user verbatim, and
//! tooling matches on substrings of it, so the quoting of module names and
//! the `minSdkVersion(N)` rendering must stay stable.
use thiserror::Error;

/// Failures of the structural pass, in the order they are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Mandatory 'base' module is missing.")]
    MissingRoot,
    #[error("Module '{module}' is declared more than once.")]
    DuplicateModuleName { module: String },
    #[error("The base module should not declare split ID in the manifest but declares '{declared}'.")]
    RootDeclaresSplitId { declared: String },
    #[error("Module '{module}' {}. The split ID must be the same as the module name.", describe_split_id(.declared))]
    SplitIdMismatch { module: String, declared: Option<String> },
    #[error("Module '{module}' depends on itself via <uses-split>.")]
    SelfDependency { module: String },
    #[error("Module '{module}' declares dependency on module '{target}' multiple times.")]
    DuplicateDependency { module: String, target: String },
    #[error("Module '{target}' is referenced by <uses-split> but does not exist (declared by module '{module}').")]
    UnknownDependency { module: String, target: String },
    #[error("Found cyclic dependency between modules.")]
    CyclicDependency,
}

fn describe_split_id(declared: &Option<String>) -> String {
    match declared {
        Some(id) => format!("declares in its manifest that the split ID is '{id}'"),
        None => "does not declare a split ID in its manifest".to_string(),
    }
}

/// Failures of the delivery-mode pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    #[error("Install-time module '{dependent}' declares dependency on on-demand module '{dependency}'.")]
    InstallTimeDependsOnOnDemand { dependent: String, dependency: String },
}

/// Failures of the platform-version pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error(
        "Install-time module '{dependent}' has a minSdkVersion({dependent_version}) different than \
         the minSdkVersion({dependency_version}) of its dependency '{dependency}'."
    )]
    InstallTimeVersionMismatch {
        dependent: String,
        dependency: String,
        dependent_version: u32,
        dependency_version: u32,
    },
    #[error(
        "On-demand module '{dependent}' has a minSdkVersion({dependent_version}), which is smaller \
         than the minSdkVersion({dependency_version}) of its dependency '{dependency}'."
    )]
    OnDemandVersionTooLow {
        dependent: String,
        dependency: String,
        dependent_version: u32,
        dependency_version: u32,
    },
}

/// The single diagnosis returned by a failed validation run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Mode(#[from] ModeError),
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// The specific category of a validation error.
///
// This enum allows for programmatic inspection of errors, which is more
// robust than string matching on the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    MissingRoot,
    DuplicateModuleName,
    RootDeclaresSplitId,
    SplitIdMismatch,
    SelfDependency,
    DuplicateDependency,
    UnknownDependency,
    CyclicDependency,
    InstallTimeDependsOnOnDemand,
    InstallTimeVersionMismatch,
    OnDemandVersionTooLow,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        use ValidationErrorKind as K;
        match self {
            Self::Structural(e) => match e {
                StructuralError::MissingRoot => K::MissingRoot,
                StructuralError::DuplicateModuleName { .. } => K::DuplicateModuleName,
                StructuralError::RootDeclaresSplitId { .. } => K::RootDeclaresSplitId,
                StructuralError::SplitIdMismatch { .. } => K::SplitIdMismatch,
                StructuralError::SelfDependency { .. } => K::SelfDependency,
                StructuralError::DuplicateDependency { .. } => K::DuplicateDependency,
                StructuralError::UnknownDependency { .. } => K::UnknownDependency,
                StructuralError::CyclicDependency => K::CyclicDependency,
            },
            Self::Mode(ModeError::InstallTimeDependsOnOnDemand { .. }) => K::InstallTimeDependsOnOnDemand,
            Self::Version(VersionError::InstallTimeVersionMismatch { .. }) => K::InstallTimeVersionMismatch,
            Self::Version(VersionError::OnDemandVersionTooLow { .. }) => K::OnDemandVersionTooLow,
        }
    }

    /// The module the diagnosis is about; for edge rules, the dependent.
    pub fn module(&self) -> Option<&str> {
        match self {
            Self::Structural(e) => match e {
                StructuralError::MissingRoot | StructuralError::CyclicDependency => None,
                StructuralError::RootDeclaresSplitId { .. } => Some(crate::store::ROOT_MODULE_NAME),
                StructuralError::DuplicateModuleName { module }
                | StructuralError::SplitIdMismatch { module, .. }
                | StructuralError::SelfDependency { module }
                | StructuralError::DuplicateDependency { module, .. }
                | StructuralError::UnknownDependency { module, .. } => Some(module.as_str()),
            },
            Self::Mode(ModeError::InstallTimeDependsOnOnDemand { dependent, .. }) => Some(dependent.as_str()),
            Self::Version(
                VersionError::InstallTimeVersionMismatch { dependent, .. }
                | VersionError::OnDemandVersionTooLow { dependent, .. },
            ) => Some(dependent.as_str()),
        }
    }
}
