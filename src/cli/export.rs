//! Export subcommand for the waste-registry CLI.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the export subcommand.
///
/// Default is the pending export: a tab-separated blob of locally created
/// records, ready to be pasted at the end of the shared sheet. With
/// `--output` the full reconciled dataset is written as a CSV report.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write the full dataset report to this CSV file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn is_report(&self) -> bool {
        self.output.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_kind() {
        let args = ExportArgs { output: None };
        assert!(!args.is_report());

        let args = ExportArgs {
            output: Some(PathBuf::from("report.csv")),
        };
        assert!(args.is_report());
    }
}
