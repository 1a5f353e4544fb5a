//! Probe results and their rendering
//!
//! Two artifacts are produced from the same ordered result list: a CSV table
//! for diffing between runs and a Markdown summary for humans.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::Method;
use crate::classify::ResultKind;
use crate::fixtures::Fixtures;

pub const CSV_FILE: &str = "endpoint-probe.csv";
pub const MARKDOWN_FILE: &str = "endpoint-probe.md";
pub const CSV_HEADER: &str = "method,path,http_code,result,note";

/// Outcome for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProbeResult {
    /// Method as declared in the catalog
    pub method: Method,
    /// Raw path template
    pub path: String,
    /// Status returned; absent when nothing was received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_code: Option<u16>,
    pub result: ResultKind,
    /// Explains safe-mode downgrades and skips
    #[serde(default)]
    pub note: String,
    /// Verb actually sent; absent when the entry was skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_method: Option<Method>,
    /// Failure below HTTP, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_error: Option<String>,
}

impl ProbeResult {
    /// "METHOD path"
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// One CSV row. Commas in the note become semicolons so columns stay aligned.
    #[must_use]
    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.method,
            self.path,
            self.http_code.map(|c| c.to_string()).unwrap_or_default(),
            self.result,
            self.note.replace(',', ";"),
        )
    }
}

/// Counts per result kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub total: usize,
    pub present: usize,
    pub not_present: usize,
    pub unverified: usize,
    pub unexpected_404: usize,
    /// Subset of `unverified` caused by transport failures
    pub transport_errors: usize,
}

impl Summary {
    #[must_use]
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let mut s = Self {
            total: results.len(),
            ..Self::default()
        };
        for r in results {
            match r.result {
                ResultKind::Present => s.present += 1,
                ResultKind::NotPresent => s.not_present += 1,
                ResultKind::UnverifiedNoFixture => s.unverified += 1,
                ResultKind::Unexpected404 => s.unexpected_404 += 1,
            }
            if r.transport_error.is_some() {
                s.transport_errors += 1;
            }
        }
        s
    }
}

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportMeta {
    pub endpoint: String,
    pub default_env: String,
    pub allow_mutation: bool,
    /// ISO 8601 UTC
    pub timestamp: String,
    pub duration_secs: f64,
}

/// Complete report for one probe pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProbeReport {
    pub meta: ReportMeta,
    pub summary: Summary,
    pub fixtures: Fixtures,
    /// In catalog order
    pub results: Vec<ProbeResult>,
}

impl ProbeReport {
    #[must_use]
    pub fn new(meta: ReportMeta, fixtures: Fixtures, results: Vec<ProbeResult>) -> Self {
        Self {
            meta,
            summary: Summary::from_results(&results),
            fixtures,
            results,
        }
    }

    pub fn with_result(&self, kind: ResultKind) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(move |r| r.result == kind)
    }

    /// `method,path,http_code,result,note` table, one row per entry.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(64 * (self.results.len() + 1));
        out.push_str(CSV_HEADER);
        out.push('\n');
        for r in &self.results {
            out.push_str(&r.csv_row());
            out.push('\n');
        }
        out
    }

    /// Counts followed by itemized non-present, unverified and unexpected-404 lists.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let s = &self.summary;
        let mut lines = vec![
            "# Endpoint Probe Report".to_string(),
            String::new(),
            "Generated by `endprobe run`.".to_string(),
            String::new(),
            format!("- Total endpoints: {}", s.total),
            format!("- Present (non-404): {}", s.present),
            format!("- Not present (404 on non-parameterized route): {}", s.not_present),
            format!(
                "- Unverified (missing fixture for parameterized route): {}",
                s.unverified
            ),
            format!(
                "- Unexpected 404 (parameterized route with fixture): {}",
                s.unexpected_404
            ),
        ];
        if s.transport_errors > 0 {
            lines.push(format!(
                "- Transport errors (counted as unverified): {}",
                s.transport_errors
            ));
        }
        lines.push(String::new());

        let sections = [
            ("Not Present", ResultKind::NotPresent),
            ("Unverified (No Fixture)", ResultKind::UnverifiedNoFixture),
            ("Unexpected 404", ResultKind::Unexpected404),
        ];
        for (title, kind) in sections {
            let items: Vec<String> = self
                .with_result(kind)
                .filter(|r| r.transport_error.is_none())
                .map(|r| format!("- `{}`", r.label()))
                .collect();
            push_section(&mut lines, title, &items);
        }

        let errors: Vec<String> = self
            .results
            .iter()
            .filter_map(|r| {
                r.transport_error
                    .as_ref()
                    .map(|e| format!("- `{}`: {e}", r.label()))
            })
            .collect();
        push_section(&mut lines, "Transport Errors", &errors);

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// `summary: total=.. present=.. ...`
    #[must_use]
    pub fn summary_line(&self) -> String {
        let s = &self.summary;
        format!(
            "summary: total={} present={} not_present={} unverified={} unexpected_404={}",
            s.total, s.present, s.not_present, s.unverified, s.unexpected_404
        )
    }
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("## {title}"));
    lines.push(String::new());
    lines.extend(items.iter().cloned());
    lines.push(String::new());
}
