use super::*;
use crate::kernel::mode::JavaScriptMode;
use crate::kernel::services::ports::EditorConfig;
use std::sync::Arc;

fn session(text: &str) -> EditSession {
    EditSession::new(text, Arc::new(JavaScriptMode::new()), &EditorConfig::default())
}

#[test]
fn nested_brackets_fold_between_delimiters() {
    let s = session("function f(a) {\n  if (a) {\n    return [\n      1,\n    ];\n  }\n}\n");
    let mode = CStyleFoldMode::new();

    assert_eq!(
        mode.fold_widget(&s, FoldStyle::MarkBegin, 0),
        Some(FoldWidget::Start)
    );
    assert_eq!(mode.fold_widget(&s, FoldStyle::MarkBegin, 3), None);
    assert_eq!(
        mode.fold_ranges(&s),
        vec![
            FoldRange::new(0, 15, 6, 0),
            FoldRange::new(1, 10, 5, 2),
            FoldRange::new(2, 12, 4, 4),
        ]
    );
}

#[test]
fn fold_stops_before_a_line_that_reopens() {
    let s = session("if (a) {\n  x();\n} else {\n  y();\n}\n");
    let mode = CStyleFoldMode::new();

    assert_eq!(
        mode.fold_widget_range(&s, FoldStyle::MarkBegin, 0),
        Some(FoldRange::new(0, 8, 1, 6))
    );
    assert_eq!(
        mode.fold_widget_range(&s, FoldStyle::MarkBegin, 2),
        Some(FoldRange::new(2, 8, 4, 0))
    );
}

#[test]
fn closing_lines_are_widgets_only_with_mark_begin_end() {
    let s = session("if (a) {\n  x();\n} else {\n  y();\n}\n");
    let mode = CStyleFoldMode::new();

    assert_eq!(mode.fold_widget(&s, FoldStyle::MarkBegin, 4), None);
    assert_eq!(
        mode.fold_widget(&s, FoldStyle::MarkBeginEnd, 4),
        Some(FoldWidget::End)
    );
    assert_eq!(
        mode.fold_widget_range(&s, FoldStyle::MarkBeginEnd, 4),
        Some(FoldRange::new(2, 8, 4, 0))
    );
    assert_eq!(mode.fold_widget_range(&s, FoldStyle::MarkBegin, 4), None);
}

#[test]
fn block_comments_fold_and_one_liners_do_not() {
    let s = session("/*\n * doc\n */\nconst a = 1; /* one */\n/* single */\n");
    let mode = CStyleFoldMode::new();

    assert_eq!(
        mode.fold_widget_range(&s, FoldStyle::MarkBegin, 0),
        Some(FoldRange::new(0, 2, 2, 1))
    );
    assert_eq!(
        mode.fold_widget(&s, FoldStyle::MarkBeginEnd, 2),
        Some(FoldWidget::End)
    );
    assert_eq!(
        mode.fold_widget_range(&s, FoldStyle::MarkBeginEnd, 2),
        Some(FoldRange::new(0, 2, 2, 1))
    );
    assert_eq!(mode.fold_widget(&s, FoldStyle::MarkBegin, 4), None);
    assert_eq!(mode.fold_ranges(&s), vec![FoldRange::new(0, 2, 2, 1)]);
}

#[test]
fn region_markers_fold_to_their_end_marker() {
    let s = session("//#region helpers\nfunction a() {}\n//#endregion\n");
    let mode = CStyleFoldMode::new();

    assert_eq!(
        mode.fold_widget(&s, FoldStyle::MarkBegin, 0),
        Some(FoldWidget::Start)
    );
    assert_eq!(mode.fold_ranges(&s), vec![FoldRange::new(0, 17, 2, 12)]);
}

#[test]
fn unterminated_region_reaches_end_of_document() {
    let s = session("//#region a\nx\ny");
    let mode = CStyleFoldMode::new();

    assert_eq!(
        mode.fold_widget_range(&s, FoldStyle::MarkBegin, 0),
        Some(FoldRange::new(0, 11, 2, 1))
    );
}

#[test]
fn brackets_inside_strings_are_not_matched() {
    let s = session("const s = \"{\";\nconst o = {\n  k: \"}\",\n};\n");
    let mode = CStyleFoldMode::new();

    assert_eq!(mode.fold_widget_range(&s, FoldStyle::MarkBegin, 0), None);
    assert_eq!(
        mode.fold_widget_range(&s, FoldStyle::MarkBegin, 1),
        Some(FoldRange::new(1, 11, 3, 0))
    );
}
