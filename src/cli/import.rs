//! Import subcommand for the waste-registry CLI.
//!
//! Bulk-imports records from a CSV export of the field-survey spreadsheet.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the import subcommand.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the CSV file to import
    #[arg(value_name = "FILE", required_unless_present = "show_template")]
    pub file: Option<PathBuf>,

    /// Parse and report what would be imported without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the expected header row instead of importing
    #[arg(long)]
    pub show_template: bool,
}

impl ImportArgs {
    /// Describe the import mode for logging.
    pub fn import_mode(&self) -> &'static str {
        if self.show_template {
            "template"
        } else if self.dry_run {
            "dry-run"
        } else {
            "import"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_mode() {
        let args = ImportArgs {
            file: Some(PathBuf::from("survey.csv")),
            dry_run: false,
            show_template: false,
        };
        assert_eq!(args.import_mode(), "import");

        let args = ImportArgs {
            file: Some(PathBuf::from("survey.csv")),
            dry_run: true,
            show_template: false,
        };
        assert_eq!(args.import_mode(), "dry-run");

        let args = ImportArgs {
            file: Some(PathBuf::from("survey.csv")),
            dry_run: true,
            show_template: true,
        };
        assert_eq!(args.import_mode(), "template");
    }
}
