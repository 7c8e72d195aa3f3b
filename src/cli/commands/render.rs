//! Render command implementation.

use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use super::CommandContext;
use cloudplan::blueprints;
use cloudplan::error::Result;
use cloudplan::manifest::Manifest;

/// Output serialization format for rendered manifests.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ManifestFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

/// Arguments for the render command.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Blueprint to render
    pub blueprint: String,

    /// Stack to render for (defaults to the configured stack)
    #[arg(short, long)]
    pub stack: Option<String>,

    /// Serialization format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ManifestFormat,

    /// Write the manifest to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    pub fn execute(&self, ctx: &mut CommandContext) -> anyhow::Result<i32> {
        match self.run(ctx) {
            Ok(code) => Ok(code),
            Err(e) => {
                ctx.output.error(&e.to_string());
                Ok(e.exit_code())
            }
        }
    }

    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        let stack_ctx = ctx.stack_context(self.stack.as_deref())?;
        let blueprint = blueprints::find(&self.blueprint)?;

        info!(
            blueprint = blueprint.name(),
            stack = stack_ctx.stack(),
            "rendering manifest"
        );

        let graph = blueprint.build(&stack_ctx)?;
        let manifest = Manifest::from_graph(&stack_ctx, &graph)?;

        let rendered = match self.format {
            ManifestFormat::Json => manifest.to_json()?,
            ManifestFormat::Yaml => manifest.to_yaml()?,
        };

        match &self.output {
            Some(path) => {
                fs::write(path, &rendered)?;
                ctx.output.info(&format!(
                    "Wrote {} resources to {}",
                    graph.len(),
                    path.display()
                ));
            }
            None => {
                ctx.output.plain(&rendered);
            }
        }

        ctx.output.flush();
        Ok(0)
    }
}
