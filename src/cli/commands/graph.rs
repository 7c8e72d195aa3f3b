//! Graph command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use super::CommandContext;
use cloudplan::blueprints;
use cloudplan::error::Result;

/// Arguments for the graph command.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Blueprint to graph
    pub blueprint: String,

    /// Stack to build against (defaults to the configured stack)
    #[arg(short, long)]
    pub stack: Option<String>,

    /// Write the DOT output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GraphArgs {
    /// Execute the graph command.
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

        let graph = blueprint.build(&stack_ctx)?;
        graph.validate()?;

        let dot = graph.to_dot();

        match &self.output {
            Some(path) => {
                fs::write(path, &dot)?;
                ctx.output
                    .info(&format!("Wrote dependency graph to {}", path.display()));
            }
            None => {
                ctx.output.plain(&dot);
            }
        }

        ctx.output.flush();
        Ok(0)
    }
}
