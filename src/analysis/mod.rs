//! Whole-graph algorithms over the dependency graph.
pub mod topology;
