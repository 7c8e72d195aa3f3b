//! Subcommands module for the cloudplan CLI.
//!
//! This module contains all the subcommand implementations.

pub mod graph;
pub mod list;
pub mod render;
pub mod validate;

use crate::cli::output::OutputFormatter;
use cloudplan::config::Config;
use cloudplan::stack::StackContext;

/// Common context shared between commands.
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Output formatter
    pub output: OutputFormatter,
    /// Verbosity level
    pub verbosity: u8,
}

impl CommandContext {
    /// Create a new command context from CLI arguments.
    pub fn new(cli: &crate::cli::Cli, config: Config) -> Self {
        let use_color = config.colors.enabled && !cli.no_color;
        let output = OutputFormatter::new(use_color, cli.verbose);

        Self {
            config,
            output,
            verbosity: cli.verbose,
        }
    }

    /// Resolve the stack context for a command, falling back to the
    /// configured default stack.
    pub fn stack_context(&self, stack: Option<&str>) -> cloudplan::error::Result<StackContext> {
        let stack = stack.unwrap_or(&self.config.defaults.stack);
        StackContext::load(
            &self.config.defaults.project,
            &self.config.defaults.stacks_dir,
            stack,
        )
    }
}
