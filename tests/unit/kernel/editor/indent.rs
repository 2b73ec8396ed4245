use super::*;
use crate::kernel::mode::JavaScriptMode;
use crate::kernel::services::ports::EditorConfig;
use std::sync::Arc;

fn session(text: &str) -> EditSession {
    EditSession::new(text, Arc::new(JavaScriptMode::new()), &EditorConfig::default())
}

#[test]
fn opening_brackets_and_case_labels_indent_one_level() {
    assert_eq!(next_line_indent(LineState::Code, "function f() {", "  "), "  ");
    assert_eq!(next_line_indent(LineState::Code, "    foo(", "  "), "      ");
    assert_eq!(next_line_indent(LineState::Code, "  const a = [  ", "\t"), "  \t");
    assert_eq!(next_line_indent(LineState::Code, "  case 1:", "  "), "    ");
    assert_eq!(next_line_indent(LineState::Code, "  default:", "  "), "  ");
}

#[test]
fn plain_lines_keep_their_indentation() {
    assert_eq!(next_line_indent(LineState::Code, "  return x;", "  "), "  ");
    assert_eq!(next_line_indent(LineState::Code, "\tfoo();", "  "), "\t");
    assert_eq!(next_line_indent(LineState::Code, "", "  "), "");
}

#[test]
fn trailing_line_comment_suppresses_block_indent() {
    assert_eq!(next_line_indent(LineState::Code, "  x = 1; // opens {", "  "), "  ");
}

#[test]
fn open_doc_comments_continue_the_gutter() {
    assert_eq!(next_line_indent(LineState::DocComment, "/**", "  "), " * ");
    assert_eq!(next_line_indent(LineState::DocComment, "   * text", "  "), "   * ");
    assert_eq!(next_line_indent(LineState::DocComment, "  text {", "  "), "  ");
    assert_eq!(next_line_indent(LineState::Code, "   */", "  "), "   ");
}

#[test]
fn star_prefixed_code_keeps_plain_indentation() {
    assert_eq!(next_line_indent(LineState::Code, "    *c = 0;", "  "), "    ");
    assert_eq!(next_line_indent(LineState::Code, "    * rate;", "  "), "    ");
    assert_eq!(next_line_indent(LineState::Code, "  *p = (", "  "), "    ");
}

#[test]
fn plain_block_comments_keep_their_indentation() {
    assert_eq!(next_line_indent(LineState::BlockComment, "/* note", "  "), "");
    assert_eq!(next_line_indent(LineState::BlockComment, "  /* opens {", "  "), "  ");
    assert_eq!(next_line_indent(LineState::BlockComment, "   * text", "  "), "   ");
}

#[test]
fn check_outdent_requires_whitespace_line_and_closing_brace() {
    assert!(check_outdent("    ", "}"));
    assert!(!check_outdent("    ", "x"));
    assert!(!check_outdent("  a", "}"));
    assert!(!check_outdent("", "}"));
}

#[test]
fn auto_outdent_aligns_brace_with_its_opening_line() {
    let mut s = session("  if (a) {\n    x();\n      }");
    assert!(auto_outdent(&mut s, 2));
    assert_eq!(s.text(), "  if (a) {\n    x();\n  }");
    assert!(!auto_outdent(&mut s, 2));
}

#[test]
fn auto_outdent_without_opening_brace_is_a_no_op() {
    let mut s = session("    }");
    assert!(!auto_outdent(&mut s, 0));
    assert_eq!(s.text(), "    }");
    assert_eq!(s.version(), 0);
}
