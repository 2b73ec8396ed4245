use super::*;
use ropey::Rope;

#[test]
fn comments_every_non_blank_line_at_minimum_indent() {
    let mut rope = Rope::from_str("fn a() {\n    b();\n\n}\n");
    assert!(toggle_line_comments(&mut rope, 0, 3, CommentTokens::C_STYLE));
    assert_eq!(rope.to_string(), "// fn a() {\n//     b();\n\n// }\n");
}

#[test]
fn uncomments_when_all_lines_are_commented() {
    let mut rope = Rope::from_str("    // one\n    //two\n");
    assert!(toggle_line_comments(&mut rope, 0, 1, CommentTokens::C_STYLE));
    assert_eq!(rope.to_string(), "    one\n    two\n");
}

#[test]
fn mixed_range_is_commented_again() {
    let mut rope = Rope::from_str("// done\ntodo\n");
    assert!(toggle_line_comments(&mut rope, 0, 1, CommentTokens::C_STYLE));
    assert_eq!(rope.to_string(), "// // done\n// todo\n");
}

#[test]
fn toggling_twice_restores_the_text() {
    let src = "  let x = 1;\n  if (x) {\n    go();\n  }\n";
    let mut rope = Rope::from_str(src);
    toggle_line_comments(&mut rope, 0, 3, CommentTokens::C_STYLE);
    toggle_line_comments(&mut rope, 0, 3, CommentTokens::C_STYLE);
    assert_eq!(rope.to_string(), src);
}

#[test]
fn blank_or_out_of_range_rows_do_nothing() {
    let mut rope = Rope::from_str("a\n\n");
    assert!(!toggle_line_comments(&mut rope, 1, 1, CommentTokens::C_STYLE));
    assert!(!toggle_line_comments(&mut rope, 10, 12, CommentTokens::C_STYLE));
    assert_eq!(rope.to_string(), "a\n\n");
}

#[test]
fn block_tokens_wrap_and_unwrap_lines() {
    let tokens = CommentTokens {
        line: None,
        block: Some(("/*", "*/")),
    };
    let mut rope = Rope::from_str("  a;\n  b;\n");
    assert!(toggle_line_comments(&mut rope, 0, 1, tokens));
    assert_eq!(rope.to_string(), "  /* a; */\n  /* b; */\n");
    assert!(toggle_line_comments(&mut rope, 0, 1, tokens));
    assert_eq!(rope.to_string(), "  a;\n  b;\n");
}
