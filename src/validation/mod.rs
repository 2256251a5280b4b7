//! Dependency-graph validation for the modules of an application package.
//!
//! Validation runs three passes over one graph: structure, delivery modes,
//! then platform versions. Each pass assumes the invariants of the ones
//! before it and the first violation aborts the run.

pub use self::error::{ModeError, StructuralError, ValidationError, ValidationErrorKind, VersionError};
pub use self::validator::{validate_all_modules, ModuleDependencyValidator};

// --- MODULE DECLARATIONS ---
mod error;
mod validator;
mod rules {
    pub mod delivery;
    pub mod platform;
    pub mod structure;
}
