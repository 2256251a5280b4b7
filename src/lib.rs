//! Dependency-graph validation for modularized application packages.
//!
//! The crate consumes already-parsed module records and decides whether they
//! form a consistent dependency graph before the package is assembled. The
//! Python facade in `bindings` is compiled only with the `python` feature.

pub mod analysis;
pub mod store;
pub mod validation;

#[cfg(feature = "python")]
mod bindings;

pub use store::{ModuleRecord, DEFAULT_MIN_PLATFORM_VERSION, ROOT_MODULE_NAME};
pub use validation::{validate_all_modules, ModuleDependencyValidator, ValidationError, ValidationErrorKind};

// --- Module Definition ---
/// This function defines the `_core` Python module.
/// The name `_core` is chosen to indicate it's an internal, compiled component.
#[cfg(feature = "python")]
#[pyo3::pymodule]
fn _core(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    bindings::python::register(m)
}
