use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::InputError;
use crate::stats::AnalysisRequest;
use crate::Args;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Inline(String),
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn name(&self) -> String {
        match self {
            InputSource::Inline(_) => "<argument>".to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

/// One document to analyze, or the reason it could not be loaded.
#[derive(Debug)]
pub struct Document {
    pub source: String,
    pub request: Result<AnalysisRequest, InputError>,
}

pub fn resolve_sources(args: &Args) -> Vec<InputSource> {
    if let Some(text) = &args.text {
        return vec![InputSource::Inline(text.clone())];
    }

    if args.files.is_empty() {
        return vec![InputSource::Stdin];
    }

    args.files
        .iter()
        .map(|path| {
            if path == Path::new("-") {
                InputSource::Stdin
            } else {
                InputSource::File(path.clone())
            }
        })
        .collect()
}

pub fn read_source(source: &InputSource) -> Result<String, InputError> {
    let read_err = |error: io::Error| InputError::Read {
        source_name: source.name(),
        error,
    };

    match source {
        InputSource::Inline(text) => Ok(text.clone()),
        InputSource::Stdin => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body).map_err(read_err)?;
            Ok(body)
        }
        InputSource::File(path) => fs::read_to_string(path).map_err(read_err),
    }
}

/// Raw bodies become the request text as-is; JSON bodies must be `{"text": ...}`.
pub fn parse_request(body: &str, json: bool) -> Result<AnalysisRequest, InputError> {
    if json {
        Ok(serde_json::from_str(body)?)
    } else {
        Ok(AnalysisRequest::new(body))
    }
}

pub fn load_documents(sources: &[InputSource], json: bool) -> Vec<Document> {
    sources
        .iter()
        .map(|source| {
            let request = read_source(source).and_then(|body| parse_request(&body, json));
            match &request {
                Ok(_) => {
                    info!(action = "load", component = "input", source = %source.name(), json, "Loaded request")
                }
                Err(e) => {
                    warn!(action = "load", component = "input", source = %source.name(), error = %e, "Failed to load request")
                }
            }
            Document {
                source: source.name(),
                request,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn inline_text_wins() {
        let args = Args::try_parse_from(["text-processor", "--text", "hello"]).unwrap();
        assert_eq!(
            resolve_sources(&args),
            vec![InputSource::Inline("hello".to_string())]
        );
    }

    #[test]
    fn no_files_reads_stdin() {
        let args = Args::try_parse_from(["text-processor"]).unwrap();
        assert_eq!(resolve_sources(&args), vec![InputSource::Stdin]);
    }

    #[test]
    fn dash_means_stdin() {
        let args = Args::try_parse_from(["text-processor", "a.txt", "-"]).unwrap();
        assert_eq!(
            resolve_sources(&args),
            vec![
                InputSource::File(PathBuf::from("a.txt")),
                InputSource::Stdin
            ]
        );
    }

    #[test]
    fn raw_body_becomes_text() {
        assert_eq!(
            parse_request("  spaced  ", false).unwrap(),
            AnalysisRequest::new("  spaced  ")
        );
    }

    #[test]
    fn json_body_is_parsed() {
        assert_eq!(
            parse_request(r#"{"text": "a b"}"#, true).unwrap(),
            AnalysisRequest::new("a b")
        );
        assert_eq!(parse_request("{}", true).unwrap().text, None);
        assert!(parse_request("not json", true).unwrap_err().is_client_error());
    }

    #[test]
    fn loads_files_and_reports_missing_ones() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "from a file").unwrap();
        let missing = file.path().with_extension("missing");

        let documents = load_documents(
            &[
                InputSource::File(file.path().to_path_buf()),
                InputSource::File(missing.clone()),
            ],
            false,
        );

        assert_eq!(documents.len(), 2);
        assert_eq!(
            documents[0].request.as_ref().unwrap(),
            &AnalysisRequest::new("from a file")
        );
        assert_eq!(documents[1].source, missing.display().to_string());
        let err = documents[1].request.as_ref().unwrap_err();
        assert!(!err.is_client_error());
    }
}
