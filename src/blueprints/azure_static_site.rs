//! Azure storage static site blueprint.
//!
//! A StorageV2 account with static-website hosting enabled and a single
//! `index.html` uploaded as a blob. The account keys and the web endpoint
//! are exported as pass-through references, resolved engine-side after
//! provisioning.

use tracing::debug;

use super::Blueprint;
use crate::error::Result;
use crate::graph::ResourceGraph;
use crate::resource::{Asset, AttrValue, Declaration};
use crate::stack::StackContext;

/// The Azure static site blueprint.
pub struct AzureStaticSite;

impl Blueprint for AzureStaticSite {
    fn name(&self) -> &'static str {
        "azure-static-site"
    }

    fn description(&self) -> &'static str {
        "Storage account hosting a single-page static website"
    }

    fn build(&self, ctx: &StackContext) -> Result<ResourceGraph> {
        debug!(stack = ctx.stack(), "building azure-static-site");
        let mut graph = ResourceGraph::new();
        let resource_group = ctx.require("resource_group")?;

        let account = graph.insert(
            Declaration::new("sa", "azure:storage:StorageAccount")
                .attr("resource_group_name", resource_group.as_str())
                .attr("sku", AttrValue::object([("name", "Standard_LRS".into())]))
                .attr("kind", "StorageV2"),
        )?;

        let website = graph.insert(
            Declaration::new("staticWebsite", "azure:storage:StorageAccountStaticWebsite")
                .attr("account_name", account.output("name"))
                .attr("resource_group_name", resource_group.as_str())
                .attr("index_document", "index.html")
                .depends_on(&account),
        )?;

        graph.insert(
            Declaration::new("indexHtml", "azure:storage:Blob")
                .attr("resource_group_name", resource_group.as_str())
                .attr("account_name", account.output("name"))
                .attr("container_name", website.output("container_name"))
                .attr("source", Asset::file("www/index.html"))
                .attr("content_type", "text/html"),
        )?;

        graph.export("primaryStorageKey", account.output("primary_storage_key"));
        graph.export("staticEndpoint", account.output("primary_endpoints.web"));

        Ok(graph)
    }
}
