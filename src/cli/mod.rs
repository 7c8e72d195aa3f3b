//! CLI module for cloudplan.
//!
//! This module provides the command-line interface for cloudplan,
//! including argument parsing, configuration loading, and subcommand
//! handling.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cloudplan - declarative cloud resource graphs
///
/// Builds validated resource manifests from built-in blueprints and hands
/// them to an external reconciliation engine.
#[derive(Parser, Debug, Clone)]
#[command(name = "cloudplan")]
#[command(author = "Cloudplan Contributors")]
#[command(version)]
#[command(about = "Declarative cloud resource graph builder", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "CLOUDPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the built-in blueprints
    List(commands::list::ListArgs),

    /// Render a blueprint's manifest for a stack
    Render(commands::render::RenderArgs),

    /// Build and validate a blueprint's graph for a stack
    Validate(commands::validate::ValidateArgs),

    /// Print a blueprint's dependency graph in DOT format
    Graph(commands::graph::GraphArgs),
}
