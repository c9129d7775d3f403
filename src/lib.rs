//! nullability-annotations library: hierarchy-aware [NotNull]/[CanBeNull] presence checks and
//! the code fixes that insert them.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
