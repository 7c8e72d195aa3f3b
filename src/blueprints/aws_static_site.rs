//! AWS static site blueprint.
//!
//! An S3 bucket configured as a static website and a public-read bucket
//! object holding the index document. The bucket name and website endpoint
//! are exported as pass-through references; the endpoint URL is assembled
//! by concatenation around the engine-resolved value.

use tracing::debug;

use super::Blueprint;
use crate::error::Result;
use crate::graph::ResourceGraph;
use crate::resource::{Asset, AttrValue, Declaration};
use crate::stack::StackContext;

/// The AWS static site blueprint.
pub struct AwsStaticSite;

impl Blueprint for AwsStaticSite {
    fn name(&self) -> &'static str {
        "aws-static-site"
    }

    fn description(&self) -> &'static str {
        "S3 bucket serving a static website from a public-read object"
    }

    fn build(&self, ctx: &StackContext) -> Result<ResourceGraph> {
        debug!(stack = ctx.stack(), "building aws-static-site");
        let mut graph = ResourceGraph::new();

        let bucket = graph.insert(
            Declaration::new("myBucket", "aws:s3:Bucket").attr(
                "website",
                AttrValue::object([("index_document", "index.html".into())]),
            ),
        )?;

        graph.insert(
            Declaration::new("indexHtml", "aws:s3:BucketObject")
                .attr("acl", "public-read")
                .attr("content_type", "text/html")
                .attr("bucket", bucket.output("id"))
                .attr("source", Asset::file("www/index.html")),
        )?;

        graph.export("bucketName", bucket.output("id"));
        graph.export(
            "bucketEndpoint",
            AttrValue::concat(vec!["http://".into(), bucket.output("website_endpoint")]),
        );
        graph.export("projectName", ctx.project().into());

        Ok(graph)
    }
}
