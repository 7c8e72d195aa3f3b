//! Engine-facing manifest.
//!
//! The manifest is the sole external interface of cloudplan: the validated
//! resource graph serialized for the reconciliation engine. The engine is
//! assumed idempotent per declaration name; it diffs declared against
//! last-known state and topologically orders its provider calls by the
//! explicit dependency edges carried here.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::graph::ResourceGraph;
use crate::resource::{AttrValue, Declaration};
use crate::stack::StackContext;

/// Manifest format version understood by the engine.
pub const MANIFEST_VERSION: u32 = 1;

/// A validated resource graph serialized for the reconciliation engine.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    /// Manifest format version.
    pub version: u32,
    /// Project name.
    pub project: String,
    /// Stack name.
    pub stack: String,
    /// Generation timestamp (UTC).
    pub generated_at: DateTime<Utc>,
    /// Declarations in insertion order, each with its explicit dependency
    /// list.
    pub resources: Vec<Declaration>,
    /// Named stack outputs, resolved by the engine after provisioning.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub outputs: IndexMap<String, AttrValue>,
    /// Declared secret slots and where the engine finds their material.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub secrets: IndexMap<String, String>,
}

impl Manifest {
    /// Validates the graph and captures it as a manifest.
    pub fn from_graph(ctx: &StackContext, graph: &ResourceGraph) -> Result<Self> {
        graph.validate()?;
        info!(
            project = ctx.project(),
            stack = ctx.stack(),
            resources = graph.len(),
            edges = graph.edge_count(),
            "captured manifest"
        );
        Ok(Self {
            version: MANIFEST_VERSION,
            project: ctx.project().to_string(),
            stack: ctx.stack().to_string(),
            generated_at: Utc::now(),
            resources: graph.declarations().cloned().collect(),
            outputs: graph.outputs().clone(),
            secrets: ctx.secrets().clone(),
        })
    }

    /// Serializes the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the manifest as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Declaration names in manifest order.
    pub fn resource_names(&self) -> Vec<&str> {
        self.resources.iter().map(|decl| decl.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Declaration;

    fn sample() -> (StackContext, ResourceGraph) {
        let ctx = StackContext::new("demo", "dev");
        let mut graph = ResourceGraph::new();
        let api = graph
            .insert(Declaration::new("api", "aws:apigatewayv2:Api"))
            .unwrap();
        graph
            .insert(Declaration::new("stage", "aws:apigatewayv2:Stage").depends_on(&api))
            .unwrap();
        graph.export("endpoint", api.output("endpoint"));
        (ctx, graph)
    }

    #[test]
    fn test_from_graph_validates() {
        let ctx = StackContext::new("demo", "dev");
        let mut graph = ResourceGraph::new();
        graph
            .insert(Declaration::new("orphan", "t").depends_on_name("missing"))
            .unwrap();
        assert!(Manifest::from_graph(&ctx, &graph).is_err());
    }

    #[test]
    fn test_manifest_shape() {
        let (ctx, graph) = sample();
        let manifest = Manifest::from_graph(&ctx, &graph).unwrap();

        assert_eq!(manifest.version, MANIFEST_VERSION);
        assert_eq!(manifest.project, "demo");
        assert_eq!(manifest.stack, "dev");
        assert_eq!(manifest.resource_names(), vec!["api", "stage"]);
        assert!(manifest.outputs.contains_key("endpoint"));
    }

    #[test]
    fn test_json_serialization() {
        let (ctx, graph) = sample();
        let manifest = Manifest::from_graph(&ctx, &graph).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["resources"][1]["depends_on"][0], "api");
        assert_eq!(value["outputs"]["endpoint"]["$ref"]["resource"], "api");
    }

    #[test]
    fn test_yaml_serialization() {
        let (ctx, graph) = sample();
        let manifest = Manifest::from_graph(&ctx, &graph).unwrap();
        let yaml = manifest.to_yaml().unwrap();
        assert!(yaml.contains("project: demo"));
        assert!(yaml.contains("name: api"));
    }
}
