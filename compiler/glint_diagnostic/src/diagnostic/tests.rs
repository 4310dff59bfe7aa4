use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builder_collects_labels_and_notes() {
    let diag = Diagnostic::error(ErrorCode::E2005)
        .with_message("integer is out of range for type 'short2': 40000")
        .with_label(Span::new(10, 14), "here")
        .with_label(Span::new(0, 2), "declared here")
        .with_note("in slot 1");

    assert_eq!(diag.primary_span(), Some(Span::new(10, 14)));
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.notes, vec!["in slot 1".to_owned()]);
}

#[test]
fn unlabelled_diagnostic_has_no_position() {
    let diag = Diagnostic::error(ErrorCode::E2004).with_message("cannot construct 'Pixel'");
    assert_eq!(diag.primary_span(), None);
    assert_eq!(diag.to_string(), "error[E2004]: cannot construct 'Pixel'");
}

#[test]
fn display_includes_code_and_position() {
    let diag = type_mismatch(Span::new(3, 5), "float", "bool");
    assert_eq!(
        diag.to_string(),
        "error[E2001]: expected 'float', but found 'bool' (at 3..5)"
    );
}

#[test]
fn display_omits_missing_position() {
    let diag = Diagnostic::error(ErrorCode::E2002)
        .with_message("expected '(' to begin function call")
        .with_label(Span::NONE, "here")
        .with_note("call it");
    assert_eq!(
        diag.to_string(),
        "error[E2002]: expected '(' to begin function call\n  = note: call it"
    );
}
