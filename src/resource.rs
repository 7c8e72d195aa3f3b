//! Resource declaration model.
//!
//! A [`Declaration`] describes one desired cloud resource: a unique name, a
//! provider type token, an ordered attribute map, an optional tag set, and
//! explicit dependency edges. Declarations carry no lifecycle of their own;
//! the external reconciliation engine diffs them against its persisted state.
//!
//! Attribute values form a tree ([`AttrValue`]) that can embed references to
//! other declarations' output attributes. References found anywhere in the
//! tree become dependency edges when the declaration is inserted into a
//! [`ResourceGraph`](crate::graph::ResourceGraph), so ordering constraints are
//! always explicit in the emitted manifest.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::tags::TagSet;

/// Provider type token for a declared resource, e.g. `aws:dynamodb:Table`
/// or `azure:network:VirtualNetwork`. Opaque to cloudplan beyond display;
/// interpreted by the reconciliation engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
    /// Creates a new resource type token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceType {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque content blob handed to the engine by path.
///
/// The path is a reference, not something cloudplan reads; packaging and
/// upload are the engine's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    /// A single file.
    File {
        /// Path to the file, relative to the project root.
        path: PathBuf,
    },
    /// A directory packaged into an archive by the engine.
    Archive {
        /// Path to the directory, relative to the project root.
        path: PathBuf,
    },
}

impl Asset {
    /// Creates a file asset.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates an archive asset.
    pub fn archive(path: impl Into<PathBuf>) -> Self {
        Self::Archive { path: path.into() }
    }

    /// Returns the referenced path.
    pub fn path(&self) -> &Path {
        match self {
            Self::File { path } | Self::Archive { path } => path,
        }
    }
}

/// An attribute value in a resource declaration.
///
/// Values are static except for [`AttrValue::Ref`], [`AttrValue::Secret`],
/// and [`AttrValue::Asset`], which the engine resolves during reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// A plain JSON value with no references inside.
    Literal(serde_json::Value),
    /// A reference to an output attribute of another declaration.
    Ref {
        /// Name of the referenced declaration.
        resource: String,
        /// Output attribute path on that declaration.
        attribute: String,
    },
    /// Concatenation of string-producing parts, e.g. ARN construction.
    Concat(Vec<AttrValue>),
    /// A named secret slot resolved by the engine. Credential material is
    /// never embedded as a literal.
    Secret(String),
    /// An opaque content blob.
    Asset(Asset),
    /// An array that may contain references.
    Array(Vec<AttrValue>),
    /// A nested object that may contain references.
    Object(IndexMap<String, AttrValue>),
}

impl AttrValue {
    /// Builds a nested object value from key/value pairs, preserving order.
    pub fn object<'a>(entries: impl IntoIterator<Item = (&'a str, AttrValue)>) -> Self {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Builds an array value.
    pub fn array(items: Vec<AttrValue>) -> Self {
        Self::Array(items)
    }

    /// Builds a concatenation value.
    pub fn concat(parts: Vec<AttrValue>) -> Self {
        Self::Concat(parts)
    }

    /// Collects the names of all declarations referenced anywhere in this
    /// value tree, in encounter order.
    pub(crate) fn collect_refs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Ref { resource, .. } => out.push(resource),
            Self::Concat(parts) | Self::Array(parts) => {
                for part in parts {
                    part.collect_refs(out);
                }
            }
            Self::Object(map) => {
                for value in map.values() {
                    value.collect_refs(out);
                }
            }
            Self::Literal(_) | Self::Secret(_) | Self::Asset(_) => {}
        }
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(value) => value.serialize(serializer),
            Self::Ref {
                resource,
                attribute,
            } => {
                #[derive(Serialize)]
                struct RefBody<'a> {
                    resource: &'a str,
                    attribute: &'a str,
                }
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(
                    "$ref",
                    &RefBody {
                        resource,
                        attribute,
                    },
                )?;
                map.end()
            }
            Self::Concat(parts) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$concat", parts)?;
                map.end()
            }
            Self::Secret(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$secret", name)?;
                map.end()
            }
            Self::Asset(asset) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$asset", asset)?;
                map.end()
            }
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Literal(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Literal(serde_json::Value::String(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Literal(serde_json::Value::Bool(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Literal(serde_json::Value::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Literal(serde_json::Value::from(value))
    }
}

impl From<Asset> for AttrValue {
    fn from(asset: Asset) -> Self {
        Self::Asset(asset)
    }
}

/// A named, typed description of one desired cloud resource.
#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    /// Unique name within its graph.
    pub name: String,
    /// Provider type token.
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// Ordered configuration attributes.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, AttrValue>,
    /// Uniform tag set, when the resource is taggable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagSet>,
    /// Names of declarations that must be provisioned before this one
    /// (and torn down after it). Includes reference-derived edges once
    /// the declaration sits in a graph.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl Declaration {
    /// Creates a new declaration with no attributes.
    pub fn new(name: impl Into<String>, resource_type: impl Into<ResourceType>) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            attributes: IndexMap::new(),
            tags: None,
            depends_on: Vec::new(),
        }
    }

    /// Sets a configuration attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Attaches the uniform tag set.
    pub fn tagged(mut self, tags: TagSet) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Adds an explicit dependency on an already-declared resource.
    pub fn depends_on(mut self, resource: &ResourceRef) -> Self {
        self.depends_on.push(resource.name().to_string());
        self
    }

    /// Adds an explicit dependency by name. The name must resolve within the
    /// graph by validation time.
    pub fn depends_on_name(mut self, name: impl Into<String>) -> Self {
        self.depends_on.push(name.into());
        self
    }

    /// Folds reference-derived dependencies into the explicit list and
    /// removes duplicates, preserving first-seen order. Self-edges are kept
    /// so validation can reject them as unsatisfiable.
    pub(crate) fn normalize_dependencies(&mut self) {
        let mut refs = Vec::new();
        for value in self.attributes.values() {
            value.collect_refs(&mut refs);
        }

        let mut combined: Vec<String> = Vec::new();
        for name in self
            .depends_on
            .iter()
            .map(String::as_str)
            .chain(refs.into_iter())
        {
            if !combined.iter().any(|n| n == name) {
                combined.push(name.to_string());
            }
        }
        self.depends_on = combined;
    }
}

/// Lightweight handle to a declaration inserted into a graph.
///
/// The only way to obtain one is [`ResourceGraph::insert`], so a reference
/// built through [`ResourceRef::output`] always points at a declared resource.
///
/// [`ResourceGraph::insert`]: crate::graph::ResourceGraph::insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    name: String,
}

impl ResourceRef {
    pub(crate) fn new(name: String) -> Self {
        Self { name }
    }

    /// Name of the referenced declaration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds an attribute value referencing one of this resource's output
    /// attributes, e.g. `table.output("arn")`.
    pub fn output(&self, attribute: impl Into<String>) -> AttrValue {
        AttrValue::Ref {
            resource: self.name.clone(),
            attribute: attribute.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collect_refs_nested() {
        let value = AttrValue::object([
            ("plain", "x".into()),
            (
                "nested",
                AttrValue::array(vec![
                    AttrValue::Ref {
                        resource: "table".into(),
                        attribute: "arn".into(),
                    },
                    AttrValue::concat(vec![
                        "prefix/".into(),
                        AttrValue::Ref {
                            resource: "api".into(),
                            attribute: "id".into(),
                        },
                    ]),
                ]),
            ),
        ]);

        let mut refs = Vec::new();
        value.collect_refs(&mut refs);
        assert_eq!(refs, vec!["table", "api"]);
    }

    #[test]
    fn test_normalize_dependencies_dedupes() {
        let mut decl = Declaration::new("route", "aws:apigatewayv2:Route")
            .attr(
                "api_id",
                AttrValue::Ref {
                    resource: "api".into(),
                    attribute: "id".into(),
                },
            )
            .depends_on_name("api")
            .depends_on_name("integration");
        decl.normalize_dependencies();
        assert_eq!(decl.depends_on, vec!["api", "integration"]);
    }

    #[test]
    fn test_normalize_keeps_self_reference() {
        // Unsatisfiable, but kept: the graph rejects it at validation.
        let mut decl = Declaration::new("a", "t").depends_on_name("a");
        decl.normalize_dependencies();
        assert_eq!(decl.depends_on, vec!["a"]);
    }

    #[test]
    fn test_attr_value_serialization() {
        let value = AttrValue::object([
            ("literal", json!(1).into()),
            (
                "reference",
                AttrValue::Ref {
                    resource: "table".into(),
                    attribute: "arn".into(),
                },
            ),
            ("secret", AttrValue::Secret("adminPassword".into())),
            ("asset", Asset::file("www/index.html").into()),
        ]);

        let serialized = serde_json::to_value(&value).unwrap();
        assert_eq!(serialized["literal"], json!(1));
        assert_eq!(serialized["reference"]["$ref"]["resource"], "table");
        assert_eq!(serialized["secret"]["$secret"], "adminPassword");
        assert_eq!(serialized["asset"]["$asset"]["file"]["path"], "www/index.html");
    }

    #[test]
    fn test_declaration_serialization_skips_empty() {
        let decl = Declaration::new("vnet", "azure:network:VirtualNetwork");
        let serialized = serde_json::to_value(&decl).unwrap();
        assert_eq!(serialized["name"], "vnet");
        assert_eq!(serialized["type"], "azure:network:VirtualNetwork");
        assert!(serialized.get("attributes").is_none());
        assert!(serialized.get("depends_on").is_none());
    }
}
