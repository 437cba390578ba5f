//! One zero-argument flag per built-in extension.
//!
//! The flag set is only known at runtime, so this implements clap's `Args`
//! by hand instead of deriving it.

use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};

use beeproject_core::extensions::{ExtensionRef, builtin_extensions};

const HEADING: &str = "Extensions";

/// Extensions whose flag was given, in command-line order.
#[derive(Debug, Clone, Default)]
pub struct ExtensionFlags {
    pub enabled: Vec<ExtensionRef>,
}

impl FromArgMatches for ExtensionFlags {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut flags = Self::default();
        flags.update_from_arg_matches(matches)?;
        Ok(flags)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        let mut given: Vec<(usize, ExtensionRef)> = builtin_extensions()
            .into_iter()
            .filter_map(|ext| {
                let id = ext.flag();
                matches
                    .get_flag(&id)
                    .then(|| (matches.index_of(&id).unwrap_or(usize::MAX), ext))
            })
            .collect();
        given.sort_by_key(|(index, _)| *index);
        self.enabled = given.into_iter().map(|(_, ext)| ext).collect();
        Ok(())
    }
}

impl Args for ExtensionFlags {
    fn augment_args(cmd: Command) -> Command {
        builtin_extensions().iter().fold(cmd, |cmd, ext| {
            cmd.arg(
                Arg::new(ext.flag())
                    .long(ext.flag())
                    .help(ext.help())
                    .help_heading(HEADING)
                    .action(ArgAction::SetTrue),
            )
        })
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}
