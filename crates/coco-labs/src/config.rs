//! Configuration loading helpers for the configurators.
//!
//! Arguments meant for `ortho-config` are separated from the configurator's
//! own flags so each parser only sees what it understands.

use std::ffi::OsString;

use coco_config::Config;
use ortho_config::OrthoConfig;

use crate::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration from `args`, which start with the program name.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn classify(argument: &OsString) -> FlagAction {
    let text = argument.to_string_lossy();
    if !text.starts_with("--") {
        return FlagAction::Skip;
    }
    let mut parts = text.splitn(2, '=');
    let flag = parts.next().unwrap_or_default();
    let has_inline_value = parts.next().is_some();
    if super::CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !has_inline_value,
        }
    } else {
        FlagAction::Skip
    }
}

/// Arguments partitioned between the two parsers. Both keep the program name.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) cli_arguments: Vec<OsString>,
}

/// Routes configuration flags (and their values) to the loader, and
/// everything else to the command-line parser.
///
/// Unlike a command with trailing positional arguments, the configurators
/// take flags only, so configuration flags may appear anywhere.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ArgumentSplit::default();
    };
    let mut split = ArgumentSplit {
        config_arguments: vec![program.clone()],
        cli_arguments: vec![program.clone()],
    };

    let mut arguments = rest.iter();
    while let Some(argument) = arguments.next() {
        match classify(argument) {
            FlagAction::Include { needs_value } => {
                split.config_arguments.push(argument.clone());
                if needs_value {
                    if let Some(value) = arguments.next() {
                        split.config_arguments.push(value.clone());
                    }
                }
            }
            FlagAction::Skip => split.cli_arguments.push(argument.clone()),
        }
    }
    split
}
