//! Command-line arguments shared by both configurator binaries.

use clap::Parser;

/// Configures and activates the Coco Pharmaceuticals lab servers.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Platform URL root to connect to.
    #[arg(long, value_name = "URL")]
    pub(crate) url: Option<String>,
    /// Administrator user id issuing the calls.
    #[arg(long, value_name = "USER")]
    pub(crate) userid: Option<String>,
}
