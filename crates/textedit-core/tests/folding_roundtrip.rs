use pretty_assertions::assert_eq;
use textedit_core::{FOLD_MARKER, FoldEngine, FoldError, TextBuffer};

#[test]
fn test_heading_fold_hides_section_and_restores_it() {
    let original = "# A\n## B\ntext\n# C\ntail";
    let mut buffer = TextBuffer::from_text(original);
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), "# A [...]\n# C\ntail");
    assert!(engine.is_folded(0));

    assert!(engine.expand(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), original);
    assert!(!engine.is_folded(0));
}

#[test]
fn test_round_trip_without_trailing_newline() {
    let original = "# T\na\nb";
    let mut buffer = TextBuffer::from_text(original);
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), "# T [...]");

    assert!(engine.expand(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), original);
}

#[test]
fn test_round_trip_with_trailing_newline() {
    let original = "# T\na\nb\n";
    let mut buffer = TextBuffer::from_text(original);
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), "# T [...]");

    assert!(engine.expand(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), original);
}

#[test]
fn test_round_trip_hidden_blank_paragraph() {
    let original = "hello\n\nworld";
    let mut buffer = TextBuffer::from_text(original);
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), "hello [...]\nworld");

    assert!(engine.expand(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), original);
}

#[test]
fn test_round_trip_unicode_content() {
    let original = "# 見出し\n本文です\nまだ本文\n# 次";
    let mut buffer = TextBuffer::from_text(original);
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), "# 見出し [...]\n# 次");

    assert!(engine.expand(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), original);
}

#[test]
fn test_list_fold_stops_at_blank_line() {
    let original = "- one\n- two\n\n- three";
    let mut buffer = TextBuffer::from_text(original);
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), "- one [...]\n\n- three");

    assert!(engine.expand(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), original);
}

#[test]
fn test_fold_is_idempotent() {
    let mut buffer = TextBuffer::from_text("# A\nbody");
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 0).unwrap());
    let folded_text = buffer.full_text();
    let folded_set = engine.folded_paragraphs();

    assert!(!engine.fold(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), folded_text);
    assert_eq!(engine.folded_paragraphs(), folded_set);
}

#[test]
fn test_clear_all_folding_with_three_independent_folds() {
    let original = "# A\none\n# B\ntwo\n# C\nthree";
    let mut buffer = TextBuffer::from_text(original);
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 0).unwrap());
    assert!(engine.fold(&mut buffer, 1).unwrap());
    assert!(engine.fold(&mut buffer, 2).unwrap());
    assert_eq!(buffer.full_text(), "# A [...]\n# B [...]\n# C [...]");
    assert_eq!(engine.folded_paragraphs().len(), 3);

    engine.clear_all_folding(&mut buffer).unwrap();
    assert!(engine.folded_paragraphs().is_empty());
    assert_eq!(buffer.full_text(), original);
    for i in 0..buffer.paragraph_count() {
        assert!(!buffer.paragraph_text(i).unwrap().contains(FOLD_MARKER));
    }
}

#[test]
fn test_clear_all_folding_on_empty_engine_is_noop() {
    let mut buffer = TextBuffer::from_text("a\nb");
    let mut engine = FoldEngine::new();
    engine.clear_all_folding(&mut buffer).unwrap();
    assert_eq!(buffer.full_text(), "a\nb");
}

#[test]
fn test_interleaved_folds_expand_in_any_order() {
    let original = "# A\nx\ny\n# B\nz";
    let mut buffer = TextBuffer::from_text(original);
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 3).unwrap());
    assert!(engine.fold(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), "# A [...]\n# B [...]");

    // Expanding the earlier fold first shifts the later record down past it.
    assert!(engine.expand(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), "# A\nx\ny\n# B [...]");
    assert!(engine.is_folded(3));

    assert!(engine.expand(&mut buffer, 3).unwrap());
    assert_eq!(buffer.full_text(), original);
}

#[test]
fn test_fold_rejected_when_range_swallows_folded_header() {
    let mut buffer = TextBuffer::from_text("# A\n## B\nbody\n# C");
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 1).unwrap());
    assert_eq!(buffer.full_text(), "# A\n## B [...]\n# C");

    assert!(!engine.fold(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), "# A\n## B [...]\n# C");
    assert!(engine.is_folded(1));
    assert!(!engine.is_folded(0));
}

#[test]
fn test_tampered_marker_surfaces_inconsistency_and_clear_recovers() {
    let mut buffer = TextBuffer::from_text("# A\nbody\n# B\nmore");
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 0).unwrap());
    assert!(engine.fold(&mut buffer, 1).unwrap());

    // Host edit strips paragraph 0's marker behind the engine's back.
    let header = buffer.paragraph_text(0).unwrap();
    let marker_at = header.rfind(FOLD_MARKER).unwrap();
    buffer
        .delete_text(marker_at, marker_at + FOLD_MARKER.chars().count())
        .unwrap();

    let err = engine.expand(&mut buffer, 0).unwrap_err();
    assert!(matches!(err, FoldError::InconsistentFoldState { paragraph: 0, .. }));
    assert!(engine.is_folded(0));

    // The sweep reports the inconsistency but still empties the folded set.
    assert!(engine.clear_all_folding(&mut buffer).is_err());
    assert!(engine.folded_paragraphs().is_empty());
    assert_eq!(buffer.full_text(), "# A\n# B\nmore");
}

#[test]
fn test_quote_header_folds_as_plain_block() {
    let original = "> quoted\nplain after\nmore\n\ntail";
    let mut buffer = TextBuffer::from_text(original);
    let mut engine = FoldEngine::new();

    assert!(engine.fold(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), "> quoted [...]\n\ntail");

    assert!(engine.expand(&mut buffer, 0).unwrap());
    assert_eq!(buffer.full_text(), original);
}
