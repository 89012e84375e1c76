//! CLI command implementations.

pub(crate) mod paths;
pub(crate) mod show;
pub(crate) mod tree;

pub(crate) use paths::PathsArgs;
pub(crate) use show::ShowArgs;
pub(crate) use tree::TreeArgs;
