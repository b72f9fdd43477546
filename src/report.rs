/*!
 * Run summary reporting
 *
 * Renders the statistics of a finished run as console tables using the
 * tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::pipeline::RunStatistics;

/// Information about a file in the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

impl FileReportInfo {
    pub fn from_content(content: &str) -> Self {
        Self {
            lines: content.lines().count(),
            chars: content.chars().count(),
        }
    }

    /// Rough LLM token estimate
    pub fn estimated_tokens(&self) -> usize {
        self.chars / 4
    }
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Output file path
    pub output_file: String,
    /// Time taken by the whole run
    pub duration: Duration,
    /// Pipeline counters
    pub statistics: RunStatistics,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &RunReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the tail of long paths, cutting at a segment boundary
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.rsplit('/') {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let tail: String = path
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    fn styled(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let rows = vec![
            SummaryRow {
                key: "Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Files Discovered",
                value: self.format_number(stats.discovered),
            },
            SummaryRow {
                key: "Files Included",
                value: self.format_number(stats.included()),
            },
            SummaryRow {
                key: "Skipped (hidden)",
                value: self.format_number(stats.hidden),
            },
            SummaryRow {
                key: "Skipped (binary)",
                value: self.format_number(stats.binary),
            },
            SummaryRow {
                key: "Unreadable",
                value: self.format_number(stats.unreadable),
            },
            SummaryRow {
                key: "Total Lines",
                value: self.format_number(stats.total_lines),
            },
            SummaryRow {
                key: "LLM Tokens",
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(stats.total_chars / 4)
                ),
            },
        ];

        Self::styled(Table::new(rows))
    }

    fn create_files_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<_> = report.statistics.file_details.iter().collect();
        // Stable sort keeps index order among equally sized files
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));

        if files.len() > 15 {
            files.truncate(10);
        }

        let rows: Vec<FileRow> = files
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                lines: self.format_number(info.lines),
                tokens: self.format_number(info.estimated_tokens()),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    fn generate_console_report(&self, report: &RunReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let files_title = if report.statistics.file_details.len() > 15 {
            "TOP 10 LARGEST FILES BY CHARACTER COUNT"
        } else {
            "INCLUDED FILES"
        };

        format!(
            "{}\n{}\n\nSUMMARY\n{}",
            files_title, files_table, summary_table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_files(count: usize) -> RunReport {
        let file_details = (0..count)
            .map(|i| {
                (
                    format!("src/file_{i}.rs"),
                    FileReportInfo {
                        lines: i,
                        chars: i * 100,
                    },
                )
            })
            .collect();

        RunReport {
            output_file: "aggregated_project.txt".to_string(),
            duration: Duration::from_millis(12),
            statistics: RunStatistics {
                discovered: count + 2,
                hidden: 1,
                binary: 1,
                unreadable: 0,
                total_lines: 10,
                total_chars: 4_000,
                file_details,
            },
        }
    }

    #[test]
    fn test_file_report_info_from_content() {
        let info = FileReportInfo::from_content("one\ntwo\nthree");
        assert_eq!(info.lines, 3);
        assert_eq!(info.chars, 13);
        assert_eq!(info.estimated_tokens(), 3);
    }

    #[test]
    fn test_format_number() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        assert_eq!(reporter.format_number(999), "999");
        assert_eq!(reporter.format_number(1_500), "1.5K");
        assert_eq!(reporter.format_number(2_500_000), "2.5M");
    }

    #[test]
    fn test_format_path_truncates_at_segments() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        assert_eq!(reporter.format_path("src/lib.rs", 60), "src/lib.rs");

        let long = "very/long/directory/structure/that/goes/on/and/on/forever/file.rs";
        let formatted = reporter.format_path(long, 30);
        assert!(formatted.starts_with("..."));
        assert!(formatted.ends_with("/file.rs"));
        assert!(formatted.chars().count() <= 30);
    }

    #[test]
    fn test_format_path_single_long_segment() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        let formatted = reporter.format_path(&"x".repeat(80), 20);
        assert_eq!(formatted, format!("...{}", "x".repeat(17)));
    }

    #[test]
    fn test_report_contains_counts() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        let output = reporter.generate_report(&report_with_files(3));

        assert!(output.contains("INCLUDED FILES"));
        assert!(output.contains("aggregated_project.txt"));
        assert!(output.contains("Skipped (hidden)"));
        assert!(output.contains("src/file_2.rs"));
        assert!(output.contains("1.0K tokens (estimated)"));
    }

    #[test]
    fn test_large_report_shows_top_ten() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        let output = reporter.generate_report(&report_with_files(20));

        assert!(output.contains("TOP 10 LARGEST FILES"));
        assert!(output.contains("src/file_19.rs"));
        assert!(!output.contains("src/file_0.rs"));
    }
}
