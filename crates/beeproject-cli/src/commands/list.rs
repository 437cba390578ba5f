//! Implementation of the `beeproject list` command.

use beeproject_core::application::ExtensionInfo;
use beeproject_core::extensions::builtin_extensions;

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let extensions: Vec<ExtensionInfo> = builtin_extensions().iter().map(ExtensionInfo::from).collect();

    match args.format {
        ListFormat::Table => {
            output.header("Available extensions:")?;
            for line in table_rows(&extensions) {
                output.print(&line)?;
            }
        }
        ListFormat::List => {
            for ext in &extensions {
                output.print(&ext.name)?;
            }
        }
        // Bypasses the quiet check so pipes always get a parseable document.
        ListFormat::Json => output.json(&extensions)?,
    }

    Ok(())
}

fn table_rows(extensions: &[ExtensionInfo]) -> Vec<String> {
    let width = extensions.iter().map(|e| e.flag.len()).max().unwrap_or(0);
    extensions
        .iter()
        .map(|e| format!("  {:<width$}  {}", e.flag, e.help))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_aligns_help_text() {
        let extensions: Vec<ExtensionInfo> =
            builtin_extensions().iter().map(ExtensionInfo::from).collect();
        let rows = table_rows(&extensions);

        assert_eq!(rows.len(), extensions.len());
        let columns: Vec<usize> = rows
            .iter()
            .zip(&extensions)
            .map(|(row, ext)| row.find(&ext.help).unwrap())
            .collect();
        assert!(columns.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn table_shows_flags() {
        let extensions: Vec<ExtensionInfo> =
            builtin_extensions().iter().map(ExtensionInfo::from).collect();
        let rows = table_rows(&extensions);
        assert!(rows.iter().any(|r| r.contains("--no-skeleton")));
        assert!(rows.iter().any(|r| r.contains("--beeproject")));
    }
}
