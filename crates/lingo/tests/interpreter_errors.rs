//! Integration tests for interpreter error handling.

use lingo::parser::Node;
use lingo::{EvalError, Evaluator, ParseOptions, Value, compute_suggestions, render};

// =============================================================================
// Unknown operations
// =============================================================================

#[test]
fn unknown_operation_is_an_error() {
    let err = render("{{SITENAME}}", &[], "en").unwrap_err();
    assert!(matches!(err, EvalError::UnknownOperation { ref name, .. } if name == "SITENAME"));
}

#[test]
fn unknown_operation_suggests_close_names() {
    let err = render("{{PLURL:$1|a|b}}", &[], "en").unwrap_err();
    match err {
        EvalError::UnknownOperation { suggestions, .. } => {
            assert_eq!(suggestions, vec!["plural".to_string()]);
        }
        other => panic!("expected UnknownOperation, got {other:?}"),
    }
}

#[test]
fn unknown_operation_message() {
    let err = render("{{gendr:$1|a}}", &[], "en").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown operation 'gendr', did you mean: gender?"
    );

    let err = render("{{zzzzzz}}", &[], "en").unwrap_err();
    assert_eq!(err.to_string(), "unknown operation 'zzzzzz'");
}

#[test]
fn suggestions_include_plugins() {
    let mut evaluator = Evaluator::new();
    evaluator.register_operation("sitename", |_, _| Value::from("Wiki"));
    let err = evaluator
        .render("{{sitenam}}", &[], "en", ParseOptions::default())
        .unwrap_err();
    match err {
        EvalError::UnknownOperation { suggestions, .. } => {
            assert_eq!(suggestions, vec!["sitename".to_string()]);
        }
        other => panic!("expected UnknownOperation, got {other:?}"),
    }
}

#[test]
fn compute_suggestions_limits_and_orders() {
    let available: Vec<String> = ["bidi", "bid", "bind", "bold", "kid", "zzz"]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(compute_suggestions("bi", &available), vec!["bid".to_string()]);
    assert_eq!(
        compute_suggestions("bidx", &available),
        vec!["bid".to_string(), "bidi".to_string(), "bind".to_string()]
    );
    assert!(compute_suggestions("qqqqqq", &available).is_empty());
}

// =============================================================================
// Parse errors
// =============================================================================

#[test]
fn parse_error_propagates_through_render() {
    let err = render("oops {{", &[], "en").unwrap_err();
    match err {
        EvalError::Parse(parse) => assert_eq!(parse.offset(), 5),
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn parse_error_display_is_transparent() {
    let err = render("{{", &[], "en").unwrap_err();
    assert!(err.to_string().starts_with("syntax error at offset 0"));
}

// =============================================================================
// Hand-built trees
// =============================================================================

#[test]
fn element_outside_allowlist_is_rejected() {
    let node = Node::HtmlElement {
        tag: "script".into(),
        attributes: vec![],
        children: vec![Node::Literal("alert(1)".into())],
    };
    let err = Evaluator::new().evaluate(&node, &[], "en").unwrap_err();
    assert!(matches!(err, EvalError::UnexpectedNode { .. }));
}

#[test]
fn element_with_dangerous_style_is_rejected() {
    let node = Node::HtmlElement {
        tag: "span".into(),
        attributes: vec![("style".into(), "background:url(x)".into())],
        children: vec![],
    };
    let err = Evaluator::new().evaluate(&node, &[], "en").unwrap_err();
    assert!(matches!(err, EvalError::UnexpectedNode { .. }));
}

// =============================================================================
// Graceful degradation
// =============================================================================

#[test]
fn missing_arguments_degrade() {
    assert_eq!(render("[{{GENDER:}}]", &[], "en").unwrap(), "[]");
    assert_eq!(render("[{{GRAMMAR:genitive}}]", &[], "fi").unwrap(), "[]");
    assert_eq!(render("[{{BIDI}}]", &[], "en").unwrap(), "[]");
    assert_eq!(render("[{{FORMATNUM}}]", &[], "en").unwrap(), "[]");
}
