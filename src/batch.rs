use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write;
use std::time::Instant;
use tracing::info;

use crate::analyzer::{analyze, display_email, write_token_lists, ReportOptions};
use crate::error::ErrorResponse;
use crate::input::Document;
use crate::stats::{AnalysisResult, FrequencyTable, ProcessingTime};
use crate::utils::format_number;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Analyzed(AnalysisResult),
    Rejected(ErrorResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub source: String,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchTotals {
    pub documents_analyzed: usize,
    pub documents_rejected: usize,
    pub word_count: usize,
    pub email_count: usize,
    pub word_frequency: FrequencyTable,
    pub processing_time: ProcessingTime,
}

impl BatchTotals {
    /// Folds entries in order so the merged table is deterministic.
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut totals = BatchTotals::default();
        for entry in entries {
            match &entry.outcome {
                BatchOutcome::Analyzed(result) => {
                    totals.documents_analyzed += 1;
                    totals.word_count += result.word_count;
                    totals.email_count += result.emails.len();
                    totals.word_frequency.merge(&result.word_frequency);
                    totals.processing_time = totals.processing_time + result.processing_time;
                }
                BatchOutcome::Rejected(_) => totals.documents_rejected += 1,
            }
        }
        totals
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub totals: BatchTotals,
}

pub fn default_workers() -> usize {
    std::cmp::min(num_cpus::get(), 8)
}

/// Analyzes independent documents on a dedicated pool. Entries come back in
/// input order; a rejected document never aborts the others.
pub fn analyze_batch(
    documents: Vec<Document>,
    runtime_tag: &str,
    max_workers: Option<usize>,
) -> Result<BatchReport> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "batch_analysis",
        document_count = documents.len(),
        "Starting batch analysis"
    );

    let max_workers = max_workers.unwrap_or_else(default_workers);
    info!(
        action = "configure",
        component = "batch_analysis",
        worker_count = max_workers,
        "Using workers for processing"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_workers)
        .build()
        .context("Failed to build analysis thread pool")?;

    let entries: Vec<BatchEntry> = pool.install(|| {
        documents
            .into_par_iter()
            .map(|document| {
                let outcome = match document.request {
                    Ok(request) => match analyze(&request, runtime_tag) {
                        Ok(result) => BatchOutcome::Analyzed(result),
                        Err(e) => BatchOutcome::Rejected(ErrorResponse::from(e)),
                    },
                    Err(e) => BatchOutcome::Rejected(ErrorResponse::from(&e)),
                };
                BatchEntry {
                    source: document.source,
                    outcome,
                }
            })
            .collect()
    });

    let totals = BatchTotals::from_entries(&entries);

    info!(
        action = "complete",
        component = "batch_analysis",
        documents_analyzed = totals.documents_analyzed,
        documents_rejected = totals.documents_rejected,
        word_count = totals.word_count,
        duration_ms = start_time.elapsed().as_millis(),
        "Batch analysis completed"
    );

    Ok(BatchReport { entries, totals })
}

pub fn render_batch_report(report: &BatchReport, options: &ReportOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_batch_report(&mut out, report, options);
    out
}

fn write_batch_report(
    out: &mut String,
    report: &BatchReport,
    options: &ReportOptions,
) -> std::fmt::Result {
    let totals = &report.totals;

    writeln!(out, "--- Batch Text Analysis ---")?;
    for entry in &report.entries {
        match &entry.outcome {
            BatchOutcome::Analyzed(result) => {
                writeln!(
                    out,
                    "{}: {} words, {} emails, {}",
                    entry.source,
                    format_number(result.word_count),
                    format_number(result.emails.len()),
                    result.processing_time
                )?;
                for address in &result.emails {
                    writeln!(out, "  - {}", display_email(address, options))?;
                }
            }
            BatchOutcome::Rejected(response) => {
                writeln!(out, "{}: error: {}", entry.source, response.error)?;
            }
        }
    }

    writeln!(
        out,
        "\nDocuments analyzed: {}",
        format_number(totals.documents_analyzed)
    )?;
    writeln!(
        out,
        "Documents rejected: {}",
        format_number(totals.documents_rejected)
    )?;
    writeln!(out, "Total words: {}", format_number(totals.word_count))?;
    writeln!(
        out,
        "Unique tokens: {}",
        format_number(totals.word_frequency.len())
    )?;
    writeln!(out, "Total emails: {}", format_number(totals.email_count))?;

    write_token_lists(out, &totals.word_frequency, options)?;

    writeln!(out, "\nProcessing time: {}", totals.processing_time)
}

pub fn print_batch_results(report: &BatchReport, options: &ReportOptions) {
    print!("{}", render_batch_report(report, options));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::stats::AnalysisRequest;
    use std::io;

    fn document(source: &str, text: &str) -> Document {
        Document {
            source: source.to_string(),
            request: Ok(AnalysisRequest::new(text)),
        }
    }

    #[test]
    fn keeps_input_order() {
        let documents: Vec<Document> = (0..50)
            .map(|i| document(&format!("doc-{}", i), &"word ".repeat(i + 1)))
            .collect();

        let report = analyze_batch(documents, "arch", Some(4)).unwrap();

        assert_eq!(report.entries.len(), 50);
        for (i, entry) in report.entries.iter().enumerate() {
            assert_eq!(entry.source, format!("doc-{}", i));
            match &entry.outcome {
                BatchOutcome::Analyzed(result) => assert_eq!(result.word_count, i + 1),
                BatchOutcome::Rejected(e) => panic!("unexpected rejection: {}", e.error),
            }
        }
    }

    #[test]
    fn rejected_documents_do_not_abort_the_batch() {
        let documents = vec![
            document("good", "a@b.io hello"),
            document("empty", ""),
            Document {
                source: "unreadable".to_string(),
                request: Err(InputError::Read {
                    source_name: "unreadable".to_string(),
                    error: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                }),
            },
        ];

        let report = analyze_batch(documents, "arch", Some(2)).unwrap();

        assert_eq!(report.totals.documents_analyzed, 1);
        assert_eq!(report.totals.documents_rejected, 2);
        assert_eq!(
            report.entries[1].outcome,
            BatchOutcome::Rejected(ErrorResponse::new("Text is required"))
        );
    }

    #[test]
    fn totals_sum_per_document_results() {
        let documents = vec![
            document("one", "red blue red x@y.io"),
            document("two", "blue green x@y.io"),
        ];

        let report = analyze_batch(documents, "arch", None).unwrap();
        let totals = &report.totals;

        assert_eq!(totals.word_count, 7);
        assert_eq!(totals.email_count, 2);
        assert_eq!(totals.word_frequency.total(), 7);
        assert_eq!(
            totals.word_frequency.iter().collect::<Vec<_>>(),
            vec![("red", 2), ("blue", 2), ("x@y.io", 2), ("green", 1)]
        );
    }

    #[test]
    fn entries_serialize_flat() {
        let documents = vec![document("a.txt", "hi"), document("b.txt", "")];
        let report = analyze_batch(documents, "arch", Some(1)).unwrap();

        let value = serde_json::to_value(&report.entries).unwrap();
        assert_eq!(value[0]["source"], "a.txt");
        assert_eq!(value[0]["wordCount"], 1);
        assert_eq!(value[0]["architecture"], "arch");
        assert_eq!(value[1]["source"], "b.txt");
        assert_eq!(value[1]["error"], "Text is required");
    }

    #[test]
    fn report_shows_totals() {
        let documents = vec![document("a.txt", "hi hi"), document("b.txt", "")];
        let report = analyze_batch(documents, "arch", Some(1)).unwrap();
        let options = ReportOptions {
            top: Some(1),
            ..ReportOptions::default()
        };

        let rendered = render_batch_report(&report, &options);
        assert!(rendered.contains("a.txt: 2 words, 0 emails, "));
        assert!(rendered.contains("b.txt: error: Text is required\n"));
        assert!(rendered.contains("Documents analyzed: 1\n"));
        assert!(rendered.contains("Documents rejected: 1\n"));
        assert!(rendered.contains("- hi: 2 occurrences\n"));
    }
}
