//! List command implementation.

use clap::Args;

use super::CommandContext;
use cloudplan::blueprints;

/// Arguments for the list command.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Show extended descriptions
    #[arg(long)]
    pub detailed: bool,
}

impl ListArgs {
    /// Execute the list command.
    pub fn execute(&self, ctx: &mut CommandContext) -> anyhow::Result<i32> {
        ctx.output.banner("Blueprints");

        if self.detailed {
            for blueprint in blueprints::builtin() {
                ctx.output.section(blueprint.name());
                ctx.output.plain(&format!("  {}", blueprint.description()));
            }
        } else {
            let items: Vec<String> = blueprints::builtin()
                .iter()
                .map(|b| format!("{} - {}", b.name(), b.description()))
                .collect();
            ctx.output.list("Available", &items);
        }

        ctx.output.flush();
        Ok(0)
    }
}
