//! Resource dependency graph.
//!
//! [`ResourceGraph`] accumulates declarations in insertion order and tracks
//! the dependency edges between them. It enforces name uniqueness at insert
//! time and checks reference resolution and acyclicity at validation time,
//! before anything reaches the reconciliation engine. Ordering queries
//! (provisioning and teardown order) use petgraph's topological sort; cycle
//! reporting uses Tarjan's strongly connected components.

use std::collections::HashMap;

use indexmap::IndexMap;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::error::{Error, Result};
use crate::resource::{AttrValue, Declaration, ResourceRef};

/// A static directed acyclic graph of resource declarations.
#[derive(Debug, Clone, Default)]
pub struct ResourceGraph {
    /// Declarations in insertion order, keyed by name.
    declarations: IndexMap<String, Declaration>,
    /// Named stack outputs, resolved by the engine after provisioning.
    outputs: IndexMap<String, AttrValue>,
}

impl ResourceGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a declaration, rejecting duplicates.
    ///
    /// Reference-derived dependencies are folded into the declaration's
    /// explicit `depends_on` list so every ordering constraint is visible in
    /// the manifest. Returns a handle usable for output references and
    /// explicit dependencies of later declarations.
    pub fn insert(&mut self, mut declaration: Declaration) -> Result<ResourceRef> {
        let name = declaration.name.clone();
        if self.declarations.contains_key(&name) {
            return Err(Error::DuplicateDeclaration(name));
        }

        declaration.normalize_dependencies();
        debug!(
            resource = %name,
            r#type = %declaration.resource_type,
            dependencies = declaration.depends_on.len(),
            "declared resource"
        );
        self.declarations.insert(name.clone(), declaration);
        Ok(ResourceRef::new(name))
    }

    /// Registers a named stack output.
    pub fn export(&mut self, name: impl Into<String>, value: AttrValue) {
        self.outputs.insert(name.into(), value);
    }

    /// Looks up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// Iterates declarations in insertion order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    /// Named stack outputs.
    pub fn outputs(&self) -> &IndexMap<String, AttrValue> {
        &self.outputs
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the graph holds no declarations.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Total number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.declarations
            .values()
            .map(|decl| decl.depends_on.len())
            .sum()
    }

    /// Checks that every dependency resolves within the graph and that the
    /// edges form no cycle.
    pub fn validate(&self) -> Result<()> {
        let (graph, _) = self.build_digraph()?;

        let sccs = tarjan_scc(&graph);
        if let Some(scc) = sccs.into_iter().find(|scc| scc.len() > 1) {
            let names = scc
                .into_iter()
                .map(|idx| graph[idx].to_string())
                .collect();
            return Err(Error::DependencyCycle(names));
        }
        Ok(())
    }

    /// Names in provisioning order: every declaration appears after all of
    /// its dependencies.
    pub fn provision_order(&self) -> Result<Vec<String>> {
        let (graph, _) = self.build_digraph()?;
        match toposort(&graph, None) {
            Ok(order) => Ok(order.into_iter().map(|idx| graph[idx].to_string()).collect()),
            Err(_) => {
                let names = tarjan_scc(&graph)
                    .into_iter()
                    .find(|scc| scc.len() > 1)
                    .map(|scc| scc.into_iter().map(|idx| graph[idx].to_string()).collect())
                    .unwrap_or_default();
                Err(Error::DependencyCycle(names))
            }
        }
    }

    /// Names in teardown order: dependents are destroyed before the
    /// resources they depend on.
    pub fn teardown_order(&self) -> Result<Vec<String>> {
        let mut order = self.provision_order()?;
        order.reverse();
        Ok(order)
    }

    /// Renders the graph in Graphviz DOT format.
    pub fn to_dot(&self) -> String {
        let mut output = String::new();
        output.push_str("digraph resources {\n");
        output.push_str("  rankdir=LR;\n");
        output.push_str("  node [shape=box];\n\n");

        for decl in self.declarations.values() {
            output.push_str(&format!(
                "  \"{}\" [label=\"{}\\n{}\"];\n",
                decl.name, decl.name, decl.resource_type
            ));
        }

        output.push('\n');

        for decl in self.declarations.values() {
            for dep in &decl.depends_on {
                output.push_str(&format!("  \"{}\" -> \"{}\";\n", dep, decl.name));
            }
        }

        output.push_str("}\n");
        output
    }

    /// Builds the petgraph view with edges from dependency to dependent, so
    /// a topological sort yields prerequisites first. Fails on the first
    /// edge that cannot be satisfied: a target name that is not declared,
    /// or a declaration depending on itself.
    fn build_digraph(&self) -> Result<(DiGraph<&str, ()>, HashMap<&str, NodeIndex>)> {
        let mut graph = DiGraph::new();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

        for name in self.declarations.keys() {
            let idx = graph.add_node(name.as_str());
            indices.insert(name.as_str(), idx);
        }

        for decl in self.declarations.values() {
            let to = indices[decl.name.as_str()];
            for dep in &decl.depends_on {
                if dep == &decl.name {
                    return Err(Error::unresolved(&decl.name, dep));
                }
                let from = indices
                    .get(dep.as_str())
                    .copied()
                    .ok_or_else(|| Error::unresolved(&decl.name, dep))?;
                graph.add_edge(from, to, ());
            }
        }

        Ok((graph, indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Declaration;

    fn decl(name: &str) -> Declaration {
        Declaration::new(name, "test:resource")
    }

    #[test]
    fn test_empty_graph() {
        let graph = ResourceGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut graph = ResourceGraph::new();
        graph.insert(decl("table")).unwrap();
        let err = graph.insert(decl("table")).unwrap_err();
        assert!(matches!(err, Error::DuplicateDeclaration(name) if name == "table"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_reference_becomes_edge() {
        let mut graph = ResourceGraph::new();
        let table = graph.insert(decl("table")).unwrap();
        graph
            .insert(decl("policy").attr("resource", table.output("arn")))
            .unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.get("policy").unwrap().depends_on, vec!["table"]);
    }

    #[test]
    fn test_unresolved_dependency_detected() {
        let mut graph = ResourceGraph::new();
        graph
            .insert(decl("orphan").depends_on_name("missing"))
            .unwrap();
        let err = graph.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::UnresolvedDependency { resource, dependency }
                if resource == "orphan" && dependency == "missing"
        ));
    }

    #[test]
    fn test_self_dependency_rejected_at_validation() {
        let mut graph = ResourceGraph::new();
        graph.insert(decl("a").depends_on_name("a")).unwrap();
        assert_eq!(graph.get("a").unwrap().depends_on, vec!["a"]);

        let err = graph.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::UnresolvedDependency { resource, dependency }
                if resource == "a" && dependency == "a"
        ));
        assert!(graph.provision_order().is_err());
    }

    #[test]
    fn test_cycle_detected() {
        let mut graph = ResourceGraph::new();
        graph.insert(decl("a").depends_on_name("b")).unwrap();
        graph.insert(decl("b").depends_on_name("a")).unwrap();
        let err = graph.validate().unwrap_err();
        match err {
            Error::DependencyCycle(names) => {
                assert!(names.contains(&"a".to_string()));
                assert!(names.contains(&"b".to_string()));
            }
            other => panic!("expected cycle error, got {other}"),
        }
    }

    #[test]
    fn test_provision_order_respects_edges() {
        let mut graph = ResourceGraph::new();
        let vnet = graph.insert(decl("vnet")).unwrap();
        let nsg = graph.insert(decl("nsg")).unwrap();
        graph
            .insert(decl("subnet").depends_on(&vnet).depends_on(&nsg))
            .unwrap();

        let order = graph.provision_order().unwrap();
        let pos = |name: &str| order.iter().position(|n| n == name).unwrap();
        assert!(pos("vnet") < pos("subnet"));
        assert!(pos("nsg") < pos("subnet"));
    }

    #[test]
    fn test_teardown_order_is_reversed() {
        let mut graph = ResourceGraph::new();
        let a = graph.insert(decl("a")).unwrap();
        graph.insert(decl("b").depends_on(&a)).unwrap();

        let provision = graph.provision_order().unwrap();
        let mut teardown = graph.teardown_order().unwrap();
        teardown.reverse();
        assert_eq!(provision, teardown);
    }

    #[test]
    fn test_exports() {
        let mut graph = ResourceGraph::new();
        let vm = graph.insert(decl("vm")).unwrap();
        graph.export("vmName", vm.output("name"));
        assert_eq!(graph.outputs().len(), 1);
        assert!(graph.outputs().contains_key("vmName"));
    }

    #[test]
    fn test_to_dot() {
        let mut graph = ResourceGraph::new();
        let a = graph.insert(decl("api")).unwrap();
        graph.insert(decl("route").depends_on(&a)).unwrap();

        let dot = graph.to_dot();
        assert!(dot.contains("digraph"));
        assert!(dot.contains("\"api\" -> \"route\""));
    }
}
