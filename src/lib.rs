pub mod analyzer;
pub mod args;
pub mod batch;
pub mod email;
pub mod error;
pub mod input;
pub mod patterns;
pub mod runtime;
pub mod stats;
pub mod tokens;
pub mod utils;

pub use analyzer::{analyze, print_analysis_results, ReportOptions};
pub use args::{Args, OutputFormat};
pub use batch::{analyze_batch, print_batch_results, BatchReport};
pub use error::{ErrorResponse, InputError, ValidationError};
pub use patterns::init_patterns;
pub use stats::{AnalysisRequest, AnalysisResult, FrequencyTable, ProcessingTime};
