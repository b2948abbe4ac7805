//! Command-line argument definitions.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Finds utility classes in a file and explains them.
#[derive(Parser, Debug)]
#[command(
    name = "tailmark",
    disable_help_subcommand = true,
    after_help = "Configuration flags precede the command:\n  \
        --config-path <PATH>             TOML configuration file\n  \
        --design-system <PATH>           manifest (v3) or stylesheet (v4)\n  \
        --design-system-version <v3|v4>  inferred from the path when omitted\n  \
        --log-filter <FILTER>            for example `tailmark-scan=debug`\n  \
        --log-format <json|compact>\n  \
        --cache-capacity <N>\n\
        Each also reads from TAILMARK_<NAME>, for example TAILMARK_DESIGN_SYSTEM."
)]
pub(crate) struct Cli {
    /// The operation to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Prints the confirmed class spans of a file as JSON.
    Decorate {
        /// The file to scan.
        file: Utf8PathBuf,
    },
    /// Prints the rule generated for the class at an offset.
    Hover {
        /// The file to scan.
        file: Utf8PathBuf,
        /// UTF-16 offset into the file.
        #[arg(long)]
        offset: u32,
    },
}

impl CliCommand {
    /// Returns the input file of either command.
    #[must_use]
    pub(crate) const fn file(&self) -> &Utf8PathBuf {
        match self {
            Self::Decorate { file } | Self::Hover { file, .. } => file,
        }
    }
}
