//! Module records and the dependency graph built from them.
pub mod registry;
pub mod types;

pub use registry::DependencyGraph;
pub use types::{
    DeliveryMode, Edge, EdgeKind, ModuleId, ModuleRecord, DEFAULT_MIN_PLATFORM_VERSION, ROOT_MODULE_NAME,
};
