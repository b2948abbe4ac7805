//! Configuration loading for the CLI.
//!
//! Leading configuration flags are handed to `ortho_config`, which layers
//! them over the defaults, the configuration file and `TAILMARK_*`
//! environment variables. Everything from the first other token onwards is
//! parsed as the command.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use tailmark_config::Config;

use crate::AppError;

/// Flags routed to the configuration loader.
///
/// Must list every command-line flag that [`Config`] accepts.
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--design-system",
    "--design-system-version",
    "--log-filter",
    "--log-format",
    "--cache-capacity",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the given configuration arguments, the
    /// first of which is the program name.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

/// Arguments split into the configuration prefix and the command.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_arguments: Vec<OsString>,
}

/// Returns `Some(needs_value)` when `argument` is a configuration flag.
fn config_flag(argument: &OsStr) -> Option<bool> {
    let text = argument.to_str()?;
    let (flag, has_inline_value) = text
        .split_once('=')
        .map_or((text, false), |(name, _)| (name, true));
    CONFIG_CLI_FLAGS
        .contains(&flag)
        .then_some(!has_inline_value)
}

/// Splits `args` after the run of leading configuration flags. Both halves
/// keep the program name.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let mut remaining = args.iter().peekable();
    let Some(program) = remaining.next() else {
        return ConfigArgumentSplit::default();
    };

    let mut config_arguments = vec![program.clone()];
    while let Some(needs_value) = remaining.peek().and_then(|argument| config_flag(argument)) {
        config_arguments.extend(remaining.next().cloned());
        if needs_value {
            config_arguments.extend(remaining.next().cloned());
        }
    }

    let mut command_arguments = vec![program.clone()];
    command_arguments.extend(remaining.cloned());
    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}
