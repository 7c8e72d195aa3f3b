//! Built-in resource-graph blueprints.
//!
//! A blueprint is a single synchronous pass from static input tables and
//! stack configuration to a [`ResourceGraph`]. No I/O happens during a
//! build; file and archive inputs stay opaque path references for the
//! engine.

pub mod aws_serverless_api;
pub mod aws_static_site;
pub mod azure_static_site;
pub mod azure_vm_network;

pub use aws_serverless_api::AwsServerlessApi;
pub use aws_static_site::AwsStaticSite;
pub use azure_static_site::AzureStaticSite;
pub use azure_vm_network::AzureVmNetwork;

use crate::error::{Error, Result};
use crate::graph::ResourceGraph;
use crate::stack::StackContext;

/// A named builder of one resource graph.
pub trait Blueprint {
    /// Blueprint name as used on the command line.
    fn name(&self) -> &'static str;

    /// One-line description.
    fn description(&self) -> &'static str;

    /// Builds the declaration graph for a stack.
    fn build(&self, ctx: &StackContext) -> Result<ResourceGraph>;
}

/// The built-in blueprints.
pub fn builtin() -> Vec<Box<dyn Blueprint>> {
    vec![
        Box::new(AwsServerlessApi),
        Box::new(AwsStaticSite),
        Box::new(AzureVmNetwork),
        Box::new(AzureStaticSite),
    ]
}

/// Finds a built-in blueprint by name.
pub fn find(name: &str) -> Result<Box<dyn Blueprint>> {
    builtin()
        .into_iter()
        .find(|blueprint| blueprint.name() == name)
        .ok_or_else(|| Error::BlueprintNotFound(name.to_string()))
}
