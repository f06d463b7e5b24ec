use text_processor::{analyze, AnalysisRequest};

// Kept alone in its own test binary so the email grammar starts uncompiled.
#[test]
fn test_first_analysis_does_not_pay_for_grammar_compilation() {
    let request = AnalysisRequest::new("a b x@y.io");

    let first = analyze(&request, "x").unwrap();
    let second = analyze(&request, "x").unwrap();

    assert_eq!(first.emails, vec!["x@y.io"]);
    assert!(
        first.processing_time_ms() < second.processing_time_ms() + 1.0,
        "first={:.2}ms second={:.2}ms",
        first.processing_time_ms(),
        second.processing_time_ms()
    );
}
