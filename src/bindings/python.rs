use crate::store::ModuleRecord;
use crate::validation::ModuleDependencyValidator;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

#[pyclass(name = "_ModuleRecord")]
#[derive(Debug, Clone)]
pub struct PyModuleRecord {
    pub inner: ModuleRecord,
}

#[pymethods]
impl PyModuleRecord {
    #[new]
    #[pyo3(signature = (name, split_id=None, on_demand=false, min_sdk_version=None, uses_split=Vec::new()))]
    pub fn new(
        name: String,
        split_id: Option<String>,
        on_demand: bool,
        min_sdk_version: Option<u32>,
        uses_split: Vec<String>,
    ) -> Self {
        Self { inner: ModuleRecord { name, split_id, on_demand, min_sdk_version, uses_split } }
    }

    #[getter]
    pub fn name(&self) -> &str { &self.inner.name }

    #[getter]
    pub fn effective_min_sdk_version(&self) -> u32 { self.inner.effective_min_sdk_version() }

    fn __repr__(&self) -> String { format!("{:?}", self.inner) }
}

/// Raises `ValueError` with the diagnostic message when the graph is invalid.
#[pyfunction]
pub fn validate_all_modules(modules: Vec<PyRef<'_, PyModuleRecord>>) -> PyResult<()> {
    let records: Vec<ModuleRecord> = modules.iter().map(|m| m.inner.clone()).collect();
    ModuleDependencyValidator::new()
        .validate_all_modules(&records)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// A simple function to confirm the Rust core is callable from Python.
#[pyfunction]
pub fn rust_core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyModuleRecord>()?;
    m.add_function(wrap_pyfunction!(validate_all_modules, m)?)?;
    m.add_function(wrap_pyfunction!(rust_core_version, m)?)?;
    Ok(())
}
