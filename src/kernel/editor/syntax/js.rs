use ropey::Rope;
use tree_sitter::Node;

use super::util::node_is_field;
use super::HighlightKind;

pub(super) fn classify(node: Node<'_>, _rope: &Rope) -> Option<HighlightKind> {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            classify_identifier(node).or_else(|| classify_jsx(node))
        }
        "property_identifier" => {
            classify_property_identifier(node).or_else(|| classify_jsx(node))
        }
        "if" | "else" | "for" | "while" | "do" | "switch" | "case" | "return" | "break"
        | "continue" | "throw" | "try" | "catch" | "finally" | "await" | "yield" => {
            Some(HighlightKind::KeywordControl)
        }
        "typeof" | "instanceof" | "in" | "of" | "delete" | "void" => {
            Some(HighlightKind::KeywordOperator)
        }
        "true" | "false" => Some(HighlightKind::Boolean),
        "null" | "undefined" => Some(HighlightKind::Constant),
        _ => classify_jsx(node),
    }
}

pub(super) fn is_keyword(kind: &str) -> bool {
    matches!(
        kind,
        "async"
            | "break"
            | "case"
            | "catch"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "do"
            | "else"
            | "export"
            | "extends"
            | "finally"
            | "for"
            | "from"
            | "function"
            | "get"
            | "if"
            | "import"
            | "let"
            | "new"
            | "return"
            | "set"
            | "static"
            | "super"
            | "switch"
            | "target"
            | "this"
            | "throw"
            | "try"
            | "var"
            | "while"
            | "with"
    )
}

fn classify_identifier(node: Node<'_>) -> Option<HighlightKind> {
    let parent = node.parent()?;
    match parent.kind() {
        "function_declaration"
        | "function"
        | "generator_function_declaration"
        | "generator_function"
            if node_is_field(parent, "name", node) =>
        {
            Some(HighlightKind::Function)
        }
        "call_expression" if node_is_field(parent, "function", node) => {
            Some(HighlightKind::Function)
        }
        "new_expression" if node_is_field(parent, "constructor", node) => {
            Some(HighlightKind::Type)
        }
        "class_declaration" | "class" if node_is_field(parent, "name", node) => {
            Some(HighlightKind::Type)
        }
        "variable_declarator" if node_is_field(parent, "name", node) => {
            Some(HighlightKind::Variable)
        }
        "formal_parameters" => Some(HighlightKind::Parameter),
        "method_definition" if node_is_field(parent, "name", node) => Some(HighlightKind::Function),
        _ => None,
    }
}

fn classify_property_identifier(node: Node<'_>) -> Option<HighlightKind> {
    let parent = node.parent()?;
    match parent.kind() {
        "member_expression" => {
            if parent.parent().is_some_and(|grand| {
                grand.kind() == "call_expression" && node_is_field(grand, "function", parent)
            }) {
                return Some(HighlightKind::Method);
            }
            Some(HighlightKind::Property)
        }
        "method_definition" if node_is_field(parent, "name", node) => Some(HighlightKind::Method),
        "pair" if node_is_field(parent, "key", node) => Some(HighlightKind::Property),
        _ => None,
    }
}

fn classify_jsx(node: Node<'_>) -> Option<HighlightKind> {
    let parent = node.parent()?;
    match (node.kind(), parent.kind()) {
        ("identifier" | "member_expression", "jsx_opening_element" | "jsx_closing_element")
        | ("identifier", "jsx_self_closing_element") => Some(HighlightKind::Tag),
        ("property_identifier", "jsx_attribute") => Some(HighlightKind::TagAttribute),
        _ => None,
    }
}
