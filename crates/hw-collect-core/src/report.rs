use crate::consolidate::ConsolidationReport;
use crate::error::Error;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_REPORT_FILE_NAME: &str = "submission-report.txt";

/// Render the plain-text submission report into `out`.
pub fn render_into<W: Write>(
    out: &mut W,
    report: &ConsolidationReport,
    generated_at: DateTime<Local>,
) -> io::Result<()> {
    writeln!(out, "Homework Submission Report")?;
    writeln!(out, "====================================")?;
    writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;
    writeln!(out, "Total files collected: {}", report.copied_files)?;
    writeln!(out)?;

    if report.all_submitted() {
        writeln!(out, "All students submitted a PDF file.")?;
    }

    if !report.missing.is_empty() {
        writeln!(out, "Missing submissions:")?;
        for (i, name) in report.missing.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, name)?;
        }
        writeln!(out)?;
    }

    if !report.wrong_format.is_empty() {
        writeln!(out, "Wrong format (non-PDF files submitted):")?;
        for (i, (name, extensions)) in report.wrong_format.iter().enumerate() {
            writeln!(
                out,
                "{}. {} (uploaded {} files)",
                i + 1,
                name,
                extensions.join(", ")
            )?;
        }
    }

    Ok(())
}

/// Write the report into `destination` and return its path.
pub fn write_report(
    destination: &Path,
    file_name: &str,
    report: &ConsolidationReport,
) -> Result<PathBuf, Error> {
    let path = destination.join(file_name);
    let mut out = BufWriter::new(File::create(&path)?);
    render_into(&mut out, report, Local::now())?;
    out.flush()?;
    info!("Report written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;
    use std::fs;

    fn render(report: &ConsolidationReport) -> String {
        let mut buf = Vec::new();
        render_into(&mut buf, report, fixed_time()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_render_all_submitted() {
        let report = ConsolidationReport {
            submitted: vec!["1001 (Alice)".to_string()],
            copied_files: 1,
            ..Default::default()
        };
        let text = render(&report);

        assert!(text.starts_with("Homework Submission Report\n"));
        assert!(text.contains("Generated: 2024-03-01 09:30:00\n"));
        assert!(text.contains("Total files collected: 1\n"));
        assert!(text.contains("All students submitted a PDF file.\n"));
        assert!(!text.contains("Missing submissions:"));
        assert!(!text.contains("Wrong format"));
    }

    #[test]
    fn test_render_numbered_sections() {
        let mut wrong_format = BTreeMap::new();
        wrong_format.insert(
            "1005 (Eve)".to_string(),
            vec![".docx".to_string(), ".txt".to_string()],
        );
        wrong_format.insert("1003 (Carol)".to_string(), vec![".docx".to_string()]);

        let report = ConsolidationReport {
            missing: vec!["1002 (Bob)".to_string(), "1004 (Dan)".to_string()],
            wrong_format,
            copied_files: 3,
            ..Default::default()
        };
        let text = render(&report);

        assert!(!text.contains("All students submitted"));
        assert!(text.contains("Missing submissions:\n1. 1002 (Bob)\n2. 1004 (Dan)\n\n"));
        assert!(text.contains(
            "Wrong format (non-PDF files submitted):\n\
             1. 1003 (Carol) (uploaded .docx files)\n\
             2. 1005 (Eve) (uploaded .docx, .txt files)\n"
        ));
    }

    #[test]
    fn test_write_report() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_report(tmp.path(), DEFAULT_REPORT_FILE_NAME, &Default::default())
            .unwrap();
        assert_eq!(path, tmp.path().join("submission-report.txt"));
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("Total files collected: 0"));
    }
}
