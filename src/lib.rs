//! # Cloudplan - Declarative Cloud Resource Graphs
//!
//! Cloudplan builds static, validated, directed-acyclic graphs of cloud
//! resource declarations from built-in blueprints and serializes them into
//! manifests for an external reconciliation engine. The engine, not this
//! crate, performs the actual provisioning: it diffs declared state against
//! its persisted last-known state, topologically orders provider calls by
//! the declared dependency edges, and converges idempotently per
//! declaration name.
//!
//! ## Core Concepts
//!
//! - **Declaration**: a named, typed description of one desired cloud
//!   resource and its configuration
//! - **Dependency edge**: an ordering constraint; prerequisites are
//!   provisioned first and torn down last
//! - **Blueprint**: a single synchronous pass from static input tables and
//!   stack configuration to a resource graph
//! - **Stack**: a named, isolated instance of a declared graph ("dev",
//!   "prod")
//! - **Manifest**: the validated graph serialized for the engine, plus
//!   named stack outputs and declared secret slots
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     CLI Interface                        │
//! │              (clap-based command parsing)                │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Blueprints                          │
//! │       (static input tables → resource declarations)      │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Resource Graph                        │
//! │   (unique names, explicit edges, petgraph validation)    │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Manifest                           │
//! │        (JSON/YAML handed to the external engine)         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use cloudplan::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let ctx = StackContext::new("webshop", "dev");
//!     let blueprint = blueprints::find("aws-serverless-api")?;
//!     let graph = blueprint.build(&ctx)?;
//!     let manifest = Manifest::from_graph(&ctx, &graph)?;
//!     println!("{}", manifest.to_json()?);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types and functions.

    pub use crate::blueprints::{self, Blueprint};
    pub use crate::encoding::encode_custom_data;
    pub use crate::error::{Error, Result};
    pub use crate::graph::ResourceGraph;
    pub use crate::manifest::Manifest;
    pub use crate::naming::{derive_route_names, indexed_name, sanitize_key};
    pub use crate::resource::{Asset, AttrValue, Declaration, ResourceRef, ResourceType};
    pub use crate::stack::{StackConfig, StackContext};
    pub use crate::tags::TagSet;
}

/// Error types and result aliases for cloudplan operations.
///
/// The [`Error`](error::Error) enum covers declaration construction, graph
/// validation, identifier derivation, encoding preconditions, and
/// configuration loading.
pub mod error;

/// Resource declaration model: typed declarations, attribute value trees,
/// references, secrets, and asset blobs.
pub mod resource;

/// The resource dependency graph: insertion-ordered declarations, explicit
/// edges, validation, and provisioning/teardown ordering via petgraph.
pub mod graph;

/// Deterministic identifier derivation for enumerated inputs, with an
/// explicit reject-on-collision policy.
pub mod naming;

/// Base64 encoding of VM boot scripts with an ASCII precondition.
pub mod encoding;

/// The uniform tag set attached to every taggable declaration.
pub mod tags;

/// Stack context and per-stack configuration, including declared secret
/// slots.
pub mod stack;

/// Global configuration loaded from `cloudplan.toml`.
pub mod config;

/// The engine-facing manifest: validated graph plus outputs and secret
/// slots, serialized as JSON or YAML.
pub mod manifest;

/// Built-in resource-graph blueprints.
pub mod blueprints;

/// Returns the current version of cloudplan.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
