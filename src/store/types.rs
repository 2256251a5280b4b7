use serde::{Deserialize, Serialize};

/// Name of the mandatory module every other module implicitly depends on.
pub const ROOT_MODULE_NAME: &str = "base";

/// Effective minimum platform version of a module that does not declare one.
///
/// This is the platform's absolute floor, not the root module's value.
pub const DEFAULT_MIN_PLATFORM_VERSION: u32 = 1;

/// Position of a module in the validated input slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

impl ModuleId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self {
        debug_assert!(idx <= u32::MAX as usize, "module index {idx} does not fit in a ModuleId");
        Self(idx as u32)
    }
}

/// How a module reaches the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryMode {
    /// Present from the initial install.
    InstallTime,
    /// Fetched later, on request.
    OnDemand,
}

/// One module of the application package, as extracted from its manifest.
///
/// Records are produced by the manifest parser and are never mutated while
/// a validation run is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Identity assigned by the module's container, not by its manifest.
    pub name: String,
    /// The split identifier the manifest declares for itself.
    #[serde(default)]
    pub split_id: Option<String>,
    #[serde(default)]
    pub on_demand: bool,
    #[serde(default)]
    pub min_sdk_version: Option<u32>,
    /// Declared dependencies in manifest order. Duplicates and self
    /// references are kept so the structural pass can report them.
    #[serde(default)]
    pub uses_split: Vec<String>,
}

impl ModuleRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_split_id(mut self, split_id: impl Into<String>) -> Self {
        self.split_id = Some(split_id.into());
        self
    }

    pub fn with_on_demand(mut self, on_demand: bool) -> Self {
        self.on_demand = on_demand;
        self
    }

    pub fn with_min_sdk_version(mut self, version: u32) -> Self {
        self.min_sdk_version = Some(version);
        self
    }

    pub fn with_uses_split<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uses_split.extend(deps.into_iter().map(Into::into));
        self
    }

    pub fn is_root(&self) -> bool { self.name == ROOT_MODULE_NAME }

    /// The root is always install-time, whatever its `on_demand` flag says.
    pub fn delivery_mode(&self) -> DeliveryMode {
        if self.on_demand && !self.is_root() { DeliveryMode::OnDemand } else { DeliveryMode::InstallTime }
    }

    /// The declared minimum platform version, or the platform floor.
    pub fn effective_min_sdk_version(&self) -> u32 {
        self.min_sdk_version.unwrap_or(DEFAULT_MIN_PLATFORM_VERSION)
    }
}

/// Describes why an edge exists in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// The edge every non-root module has to the root module. It is added
    /// by the graph builder and never appears in a manifest.
    Implicit,
    /// An entry of the module's `<uses-split>` declarations.
    Explicit,
}

/// A dependency edge from the owning module to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    /// Target name as declared, which may not name any module.
    pub target: &'a str,
    /// The target's position, if a module with that name exists.
    pub resolved: Option<ModuleId>,
    pub kind: EdgeKind,
}
