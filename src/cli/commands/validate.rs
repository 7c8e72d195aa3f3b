//! Validate command implementation.

use clap::Args;
use tracing::info;

use super::CommandContext;
use cloudplan::blueprints;
use cloudplan::error::Result;

/// Arguments for the validate command.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Blueprint to validate
    pub blueprint: String,

    /// Stack to validate against (defaults to the configured stack)
    #[arg(short, long)]
    pub stack: Option<String>,

    /// Print the resolved provisioning order
    #[arg(long)]
    pub show_order: bool,
}

impl ValidateArgs {
    /// Execute the validate command.
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
            "validating blueprint"
        );

        let graph = blueprint.build(&stack_ctx)?;
        let order = graph.provision_order()?;

        ctx.output.banner("Validation");
        ctx.output.plain(&format!(
            "{}: {} resources, {} dependency edges, no cycles",
            blueprint.name(),
            graph.len(),
            graph.edge_count()
        ));

        if self.show_order {
            ctx.output.list("Provisioning order", &order);
        }

        ctx.output.flush();
        Ok(0)
    }
}
