use std::fmt::Write;
use std::time::Instant;
use tracing::{info, warn};

use crate::error::ValidationError;
use crate::patterns::email_pattern;
use crate::stats::{AnalysisRequest, AnalysisResult, FrequencyTable, ProcessingTime};
use crate::utils::{format_number, redact_email};
use crate::{email, tokens, Args};

/// Tokenizes `request.text`, collects email-shaped tokens and counts every
/// token. Only the tokenize/classify/count work is timed.
pub fn analyze(
    request: &AnalysisRequest,
    runtime_tag: &str,
) -> Result<AnalysisResult, ValidationError> {
    let text = match request.text.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => {
            warn!(
                action = "reject",
                component = "text_analysis",
                reason = "missing_text",
                "Rejected analysis request"
            );
            return Err(ValidationError::TextRequired);
        }
    };

    // Compile outside the timed region when `init_patterns` wasn't called.
    email_pattern();

    let start_time = Instant::now();

    let words = tokens::tokenize(text);
    let mut emails = Vec::new();
    let mut word_frequency = FrequencyTable::new();
    for word in &words {
        if email::is_email(word) {
            emails.push(word.to_string());
        }
        word_frequency.record(word);
    }

    let processing_time = ProcessingTime::from(start_time.elapsed());

    let result = AnalysisResult {
        runtime_tag: runtime_tag.to_string(),
        word_count: words.len(),
        emails,
        word_frequency,
        processing_time,
    };

    info!(
        action = "complete",
        component = "text_analysis",
        input_bytes = text.len(),
        word_count = result.word_count,
        email_count = result.emails.len(),
        unique_tokens = result.word_frequency.len(),
        duration_ms = result.processing_time_ms(),
        "Text analysis completed"
    );

    Ok(result)
}

/// Controls for the human-readable report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub top: Option<usize>,
    pub bottom: Option<usize>,
    pub redact: bool,
}

impl From<&Args> for ReportOptions {
    fn from(args: &Args) -> Self {
        Self {
            top: args.top,
            bottom: args.bottom,
            redact: args.redact,
        }
    }
}

pub(crate) fn display_email(address: &str, options: &ReportOptions) -> String {
    if options.redact {
        redact_email(address)
    } else {
        address.to_string()
    }
}

pub(crate) fn write_token_lists(
    out: &mut String,
    table: &FrequencyTable,
    options: &ReportOptions,
) -> std::fmt::Result {
    if let Some(top_count) = options.top {
        let top = table.top(top_count);
        writeln!(out, "\nTop {} most frequent tokens:", top.len())?;
        for (token, count) in top {
            writeln!(out, "- {}: {} occurrences", token, format_number(count))?;
        }
    }

    if let Some(bottom_count) = options.bottom {
        let bottom = table.bottom(bottom_count);
        writeln!(out, "\nBottom {} least frequent tokens:", bottom.len())?;
        for (token, count) in bottom {
            writeln!(out, "- {}: {} occurrences", token, format_number(count))?;
        }
    }

    Ok(())
}

pub fn render_analysis_report(result: &AnalysisResult, options: &ReportOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_analysis_report(&mut out, result, options);
    out
}

fn write_analysis_report(
    out: &mut String,
    result: &AnalysisResult,
    options: &ReportOptions,
) -> std::fmt::Result {
    writeln!(out, "--- Text Analysis ({}) ---", result.runtime_tag)?;
    writeln!(out, "Word count: {}", format_number(result.word_count))?;
    writeln!(
        out,
        "Unique tokens: {}",
        format_number(result.word_frequency.len())
    )?;
    writeln!(
        out,
        "Emails found: {}",
        format_number(result.emails.len())
    )?;
    for address in &result.emails {
        writeln!(out, "- {}", display_email(address, options))?;
    }

    write_token_lists(out, &result.word_frequency, options)?;

    writeln!(out, "\nProcessing time: {}", result.processing_time)
}

pub fn print_analysis_results(result: &AnalysisResult, options: &ReportOptions) {
    print!("{}", render_analysis_report(result, options));
}
