use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::error;

use text_processor::input::{load_documents, resolve_sources, Document};
use text_processor::runtime::{resolve_runtime_tag, ServiceInfo};
use text_processor::utils::{setup_logging, validate_args};
use text_processor::{
    analyze, analyze_batch, init_patterns, print_analysis_results, print_batch_results, Args,
    ErrorResponse, OutputFormat, ReportOptions,
};

const EXIT_FAILURE: i32 = 1;
const EXIT_CLIENT_ERROR: i32 = 2;

fn emit_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let body = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize response")?;
    println!("{}", body);
    Ok(())
}

fn emit_error(response: &ErrorResponse, args: &Args) -> Result<()> {
    match args.format {
        OutputFormat::Json => emit_json(response, args.pretty),
        OutputFormat::Text => {
            eprintln!("Error: {}", response.error);
            Ok(())
        }
    }
}

fn run_single(document: Document, args: &Args, runtime_tag: &str) -> Result<i32> {
    let request = match document.request {
        Ok(request) => request,
        Err(e) if e.is_client_error() => {
            emit_error(&ErrorResponse::from(&e), args)?;
            return Ok(EXIT_CLIENT_ERROR);
        }
        Err(e) => return Err(e.into()),
    };

    match analyze(&request, runtime_tag) {
        Ok(result) => {
            match args.format {
                OutputFormat::Json => emit_json(&result, args.pretty)?,
                OutputFormat::Text => print_analysis_results(&result, &ReportOptions::from(args)),
            }
            Ok(0)
        }
        Err(e) => {
            emit_error(&ErrorResponse::from(e), args)?;
            Ok(EXIT_CLIENT_ERROR)
        }
    }
}

fn run(args: &Args) -> Result<i32> {
    let runtime_tag = resolve_runtime_tag(args.arch.as_deref());

    if args.info {
        emit_json(&ServiceInfo::collect(&runtime_tag), args.pretty)?;
        return Ok(0);
    }

    init_patterns();

    let sources = resolve_sources(args);
    let mut documents = load_documents(&sources, args.json);

    if documents.len() == 1 {
        if let Some(document) = documents.pop() {
            return run_single(document, args, &runtime_tag);
        }
    }

    let report = analyze_batch(documents, &runtime_tag, args.workers)?;
    match args.format {
        OutputFormat::Json => emit_json(&report.entries, args.pretty)?,
        OutputFormat::Text => print_batch_results(&report, &ReportOptions::from(args)),
    }
    Ok(0)
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    match run(&args) {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Error: {:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}
