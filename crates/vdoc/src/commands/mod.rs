//! CLI command implementations.

pub(crate) mod generate;
pub(crate) mod remove;
pub(crate) mod serve;

pub(crate) use generate::GenerateArgs;
pub(crate) use remove::RemoveArgs;
pub(crate) use serve::ServeArgs;
