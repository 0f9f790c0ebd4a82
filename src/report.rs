/*!
 * Reporting functionality for foldcat
 *
 * Summarises a drop for the console using the tabled library, including the
 * size-limit notice and any reads that failed.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::utils::format_file_size;
use crate::walker::{WalkStatistics, Warnings};

/// Notice shown when at least one file was skipped for size
pub const SIZE_EXCEEDED_NOTICE: &str =
    "Some files exceeded the size limit and were included without content";

/// Everything the report needs about one drop
#[derive(Debug, Clone)]
pub struct DropReport {
    /// Where the document went
    pub output: String,
    /// Time taken to walk and write
    pub duration: Duration,
    /// Size limit in MiB that applied to the drop
    pub max_file_size_mib: u64,
    /// Walk counters
    pub statistics: WalkStatistics,
    /// Walk notices
    pub warnings: Warnings,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for drop results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &DropReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stderr, keeping stdout free for the document
    pub fn print_report(&self, report: &DropReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &DropReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let rows = vec![
            SummaryRow {
                key: "📂 Output".to_string(),
                value: report.output.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Included".to_string(),
                value: stats.files_included.to_string(),
            },
            SummaryRow {
                key: "📏 Skipped (size)".to_string(),
                value: format!("{} (limit {} MiB)", stats.files_oversize, report.max_file_size_mib),
            },
            SummaryRow {
                key: "🧱 Skipped (not text)".to_string(),
                value: stats.files_binary.to_string(),
            },
            SummaryRow {
                key: "📁 Directories".to_string(),
                value: format!("{} ({} ignored)", stats.directories, stats.ignored_directories),
            },
            SummaryRow {
                key: "📝 Text Size".to_string(),
                value: format_file_size(stats.text_bytes),
            },
        ];

        styled(Table::new(rows))
    }

    fn create_failures_table(&self, warnings: &Warnings) -> String {
        #[derive(Tabled)]
        struct FailureRow {
            #[tabled(rename = "Path")]
            path: String,

            #[tabled(rename = "Error")]
            reason: String,
        }

        let rows = warnings.read_failures.iter().map(|f| FailureRow {
            path: f.path.clone(),
            reason: f.reason.clone(),
        });

        styled(Table::new(rows))
    }

    fn generate_console_report(&self, report: &DropReport) -> String {
        let mut out = format!(
            "✅  COMBINE COMPLETE\n{}",
            self.create_summary_table(report)
        );

        if report.warnings.size_exceeded {
            out.push_str(&format!("\n\n⚠️  {}", SIZE_EXCEEDED_NOTICE));
        }

        if !report.warnings.read_failures.is_empty() {
            out.push_str(&format!(
                "\n\n❌  READ FAILURES\n{}",
                self.create_failures_table(&report.warnings)
            ));
        }

        out
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    table.to_string()
}
