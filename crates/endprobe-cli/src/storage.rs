//! Report persistence: `endpoint-probe.csv` and `endpoint-probe.md`
//!
//! Both files are overwritten on every completed pass. Nothing is written when
//! the pass aborts.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use endprobe_core::ProbeReport;
use endprobe_core::report::{CSV_FILE, MARKDOWN_FILE};

/// Default reports directory, relative to the working directory.
pub const DEFAULT_REPORTS_DIR: &str = "docs/reports";

/// Paths of the written artifacts.
pub struct SavedReport {
    pub csv: PathBuf,
    pub markdown: PathBuf,
}

/// Write the CSV table and the Markdown summary into `dir`, creating it if needed.
pub fn save_report(report: &ProbeReport, dir: &Path) -> Result<SavedReport, std::io::Error> {
    std::fs::create_dir_all(dir)?;

    let csv = dir.join(CSV_FILE);
    std::fs::write(&csv, report.to_csv())?;

    let markdown = dir.join(MARKDOWN_FILE);
    std::fs::write(&markdown, report.to_markdown())?;

    Ok(SavedReport { csv, markdown })
}

/// Current UTC time, second precision, e.g. `"2026-02-05T19:30:00Z"`.
pub fn timestamp_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use endprobe_core::{Fixtures, Method, ProbeResult, ReportMeta, ResultKind};

    use super::*;

    fn report() -> ProbeReport {
        ProbeReport::new(
            ReportMeta {
                endpoint: "http://localhost:3000".into(),
                default_env: "1".into(),
                allow_mutation: false,
                timestamp: timestamp_iso(),
                duration_secs: 0.2,
            },
            Fixtures::default(),
            vec![ProbeResult {
                method: Method::Get,
                path: "/api/backups".into(),
                http_code: Some(404),
                result: ResultKind::NotPresent,
                note: String::new(),
                issued_method: Some(Method::Get),
                transport_error: None,
            }],
        )
    }

    #[test]
    fn writes_both_artifacts_into_new_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("docs").join("reports");
        let saved = save_report(&report(), &dir).unwrap();

        assert_eq!(saved.csv, dir.join("endpoint-probe.csv"));
        assert_eq!(saved.markdown, dir.join("endpoint-probe.md"));

        let csv = std::fs::read_to_string(&saved.csv).unwrap();
        assert_eq!(csv, "method,path,http_code,result,note\nGET,/api/backups,404,not_present,\n");
        let md = std::fs::read_to_string(&saved.markdown).unwrap();
        assert!(md.contains("## Not Present"));
    }

    #[test]
    fn overwrites_previous_run() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CSV_FILE), "stale").unwrap();
        let saved = save_report(&report(), tmp.path()).unwrap();
        let csv = std::fs::read_to_string(saved.csv).unwrap();
        assert!(!csv.contains("stale"));
    }

    #[test]
    fn iso_timestamp_shape() {
        let ts = timestamp_iso();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        let parsed = chrono::DateTime::parse_from_rfc3339(&ts).unwrap();
        assert!((Utc::now() - parsed.with_timezone(&Utc)).num_seconds() < 60);
    }
}
