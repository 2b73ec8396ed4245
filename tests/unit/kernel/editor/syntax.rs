use super::*;
use ropey::Rope;

fn covers(spans: &[HighlightSpan], kind: HighlightKind, idx: usize) -> bool {
    spans
        .iter()
        .any(|s| s.kind == kind && s.start <= idx && idx < s.end)
}

#[test]
fn test_highlight_javascript_comment_string_keyword_and_in_string_or_comment() {
    let src = "function f() { return \"x\" } // hi\n";
    let rope = Rope::from_str(src);
    let doc = SyntaxDocument::new(&JAVASCRIPT_HIGHLIGHT_RULES, &rope).expect("js syntax");

    let spans = doc.highlight_lines(&rope, 0, 1);
    let line = "function f() { return \"x\" } // hi";
    let idx_func = line.find("function").unwrap();
    let idx_name = line.find("f(").unwrap();
    let idx_return = line.find("return").unwrap();
    let idx_str = line.find("\"x\"").unwrap() + 1;
    let idx_comment = line.find("//").unwrap();

    assert!(covers(&spans[0], HighlightKind::Keyword, idx_func));
    assert!(covers(&spans[0], HighlightKind::Function, idx_name));
    assert!(covers(&spans[0], HighlightKind::KeywordControl, idx_return));
    assert!(covers(&spans[0], HighlightKind::String, idx_str));
    assert!(covers(&spans[0], HighlightKind::Comment, idx_comment));

    let in_comment = src.find("// hi").unwrap() + 3;
    assert!(doc.is_in_string_or_comment(in_comment));
    let in_string = src.find("\"x\"").unwrap() + 1;
    assert!(doc.is_in_string_or_comment(in_string));
    let in_code = src.find("function").unwrap();
    assert!(!doc.is_in_string_or_comment(in_code));
}

#[test]
fn test_javascript_function_expression_body_is_not_keyword() {
    let src = "const g = function () { foo(); };\n";
    let rope = Rope::from_str(src);
    let doc = SyntaxDocument::new(&JAVASCRIPT_HIGHLIGHT_RULES, &rope).expect("js syntax");

    let spans = doc.highlight_lines(&rope, 0, 1);
    let idx_call = src.find("foo").unwrap();
    let idx_brace = src.find('{').unwrap();
    assert!(covers(&spans[0], HighlightKind::Function, idx_call));
    assert!(!covers(&spans[0], HighlightKind::Keyword, idx_brace));
    assert!(covers(&spans[0], HighlightKind::Keyword, src.find("function").unwrap()));
}

#[test]
fn test_highlight_anchor_framework_vocabulary() {
    let src = "\
use anchor_lang::prelude::*;

declare_id!(\"Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS\");

#[program]
pub mod counter {
    pub fn increment(ctx: Context<Update>) -> Result<()> {
        ctx.accounts.counter.count += 1;
        Ok(())
    }
}

#[derive(Accounts)]
pub struct Update<'info> {
    #[account(mut)]
    pub counter: Account<'info, Counter>,
}

#[derive(Debug)]
pub struct Plain;
";
    let rope = Rope::from_str(src);
    let doc = SyntaxDocument::new(&ANCHOR_HIGHLIGHT_RULES, &rope).expect("anchor syntax");
    let lines: Vec<&str> = src.lines().collect();
    let all = doc.highlight_lines(&rope, 0, rope.len_lines());

    let row_of = |needle: &str| lines.iter().position(|l| l.contains(needle)).unwrap();

    let declare = row_of("declare_id!");
    assert!(covers(&all[declare], HighlightKind::Macro, 0));
    let program = row_of("#[program]");
    assert!(covers(&all[program], HighlightKind::Macro, 0));
    let accounts = row_of("#[derive(Accounts)]");
    assert!(covers(&all[accounts], HighlightKind::Macro, 0));
    let plain = row_of("#[derive(Debug)]");
    assert!(covers(&all[plain], HighlightKind::Attribute, 0));

    let increment = row_of("pub fn increment");
    let line = lines[increment];
    assert!(covers(&all[increment], HighlightKind::Keyword, line.find("pub").unwrap()));
    assert!(covers(&all[increment], HighlightKind::Function, line.find("increment").unwrap()));
    assert!(covers(&all[increment], HighlightKind::TypeBuiltin, line.find("Context").unwrap()));
    assert!(covers(&all[increment], HighlightKind::Type, line.find("Update").unwrap()));

    let field = row_of("pub counter: Account");
    let line = lines[field];
    assert!(covers(&all[field], HighlightKind::TypeBuiltin, line.find("Account").unwrap()));
    assert!(covers(&all[field], HighlightKind::Lifetime, line.find("'info").unwrap()));
}

#[test]
fn test_anchor_comment_and_string_detection() {
    let src = "// counter program\nfn main() { let s = \"text\"; }\n";
    let rope = Rope::from_str(src);
    let doc = SyntaxDocument::new(&ANCHOR_HIGHLIGHT_RULES, &rope).expect("anchor syntax");

    assert!(doc.is_in_string_or_comment(3));
    assert!(doc.is_in_string_or_comment(src.find("text").unwrap()));
    assert!(!doc.is_in_string_or_comment(src.find("main").unwrap()));
}

#[test]
fn test_literal_at_reports_the_enclosing_comment_start() {
    let src = "let s = \"/*\";\n/** doc */\nlet t = 1;\n";
    let rope = Rope::from_str(src);
    let doc = SyntaxDocument::new(&JAVASCRIPT_HIGHLIGHT_RULES, &rope).expect("js syntax");

    let quoted = doc.literal_at(src.find("/*").unwrap()).expect("string");
    assert_eq!(quoted.kind, LiteralKind::String);

    let doc_start = src.find("/**").unwrap();
    let comment = doc.literal_at(src.find("*/").unwrap()).expect("comment");
    assert_eq!(comment.kind, LiteralKind::Comment);
    assert_eq!(comment.start_byte, doc_start);
    assert_eq!(comment.end_byte, src.find("*/").unwrap() + 2);

    assert_eq!(doc.literal_at(src.find("t =").unwrap()), None);
}

#[test]
fn test_incremental_edit_matches_full_parse() {
    let mut rope = Rope::from_str("let a = 1;\n");
    let mut doc = SyntaxDocument::new(&JAVASCRIPT_HIGHLIGHT_RULES, &rope).expect("js syntax");

    rope.insert(0, "// note\n");
    doc.apply_edit(&rope, 0, "", "// note\n");

    let spans = doc.highlight_lines(&rope, 0, 2);
    assert!(covers(&spans[0], HighlightKind::Comment, 0));
    assert!(covers(&spans[1], HighlightKind::Keyword, 0));
    assert_eq!(
        doc.tree().root_node().to_sexp(),
        SyntaxDocument::new(&JAVASCRIPT_HIGHLIGHT_RULES, &rope)
            .expect("js syntax")
            .tree()
            .root_node()
            .to_sexp()
    );
}

#[test]
fn test_error_nodes_report_broken_code() {
    let rope = Rope::from_str("function f( {\n");
    let doc = SyntaxDocument::new(&JAVASCRIPT_HIGHLIGHT_RULES, &rope).expect("js syntax");
    assert!(!doc.error_nodes().is_empty());

    let rope = Rope::from_str("function f() {}\n");
    let doc = SyntaxDocument::new(&JAVASCRIPT_HIGHLIGHT_RULES, &rope).expect("js syntax");
    assert!(doc.error_nodes().is_empty());
}

#[test]
fn test_highlight_snippet_returns_one_entry_per_line() {
    let lines = highlight_snippet(&JAVASCRIPT_HIGHLIGHT_RULES, "let a = 1;\nlet b = 'x';");
    assert_eq!(lines.len(), 2);
    assert!(covers(&lines[1], HighlightKind::String, "let b = ".len()));
}

#[test]
fn test_spans_within_a_line_do_not_overlap() {
    let src = "const x = foo.bar(1, \"two\", /re/g);\n";
    let spans = highlight_snippet(&JAVASCRIPT_HIGHLIGHT_RULES, src);
    for pair in spans[0].windows(2) {
        assert!(pair[0].end <= pair[1].start, "{:?}", pair);
    }
    let idx_regex = src.find("/re/").unwrap() + 1;
    assert!(covers(&spans[0], HighlightKind::Regex, idx_regex));
    let idx_method = src.find("bar").unwrap();
    assert!(covers(&spans[0], HighlightKind::Method, idx_method));
}

#[test]
fn test_color_groups_fold_related_kinds() {
    assert_eq!(HighlightKind::Method.color_group(), SyntaxColorGroup::Function);
    assert_eq!(HighlightKind::TypeBuiltin.color_group(), SyntaxColorGroup::Type);
    assert_eq!(HighlightKind::Lifetime.color_group(), SyntaxColorGroup::Keyword);
    assert_eq!(HighlightKind::Regex.color_group(), SyntaxColorGroup::Regex);
    assert!(HighlightKind::Comment.is_leaf());
    assert!(!HighlightKind::Macro.is_leaf());
}
