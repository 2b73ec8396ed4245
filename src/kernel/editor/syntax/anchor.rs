//! Anchor (Solana) programs: the Rust grammar plus the framework's vocabulary.

use ropey::Rope;
use tree_sitter::Node;

use super::util::{node_is_field, node_text};
use super::HighlightKind;

/// Attribute macros provided by `anchor_lang`.
const FRAMEWORK_ATTRIBUTES: &[&str] = &[
    "program",
    "account",
    "instruction",
    "error_code",
    "event",
    "constant",
    "access_control",
    "zero_copy",
    "interface",
    "state",
];

/// Derives that generate account validation or space calculation code.
const FRAMEWORK_DERIVES: &[&str] = &["Accounts", "InitSpace"];

const FRAMEWORK_TYPES: &[&str] = &[
    "Account",
    "AccountInfo",
    "AccountLoader",
    "Context",
    "Interface",
    "InterfaceAccount",
    "Program",
    "Pubkey",
    "Signer",
    "SystemAccount",
    "Sysvar",
    "UncheckedAccount",
];

pub(super) fn classify(node: Node<'_>, rope: &Rope) -> Option<HighlightKind> {
    match node.kind() {
        "attribute_item" | "inner_attribute_item" => classify_attribute(node, rope),
        "type_identifier" => {
            let text = node_text(rope, node)?;
            FRAMEWORK_TYPES
                .contains(&text.as_str())
                .then_some(HighlightKind::TypeBuiltin)
        }
        "identifier" => classify_identifier(node),
        "field_identifier" => classify_field_identifier(node),
        "macro_invocation" => Some(HighlightKind::Macro),
        "if" | "else" | "for" | "while" | "loop" | "match" | "return" | "break" | "continue"
        | "await" => Some(HighlightKind::KeywordControl),
        "as" => Some(HighlightKind::KeywordOperator),
        "boolean_literal" => Some(HighlightKind::Boolean),
        _ => None,
    }
}

pub(super) fn is_keyword(kind: &str) -> bool {
    matches!(
        kind,
        "async"
            | "const"
            | "crate"
            | "dyn"
            | "enum"
            | "extern"
            | "fn"
            | "impl"
            | "in"
            | "let"
            | "mod"
            | "move"
            | "mutable_specifier"
            | "pub"
            | "ref"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "type"
            | "unsafe"
            | "use"
            | "where"
    )
}

/// `#[program]`, `#[account(...)]` and `#[derive(Accounts)]` are framework macros; any
/// other attribute falls through to the generic attribute highlight.
fn classify_attribute(node: Node<'_>, rope: &Rope) -> Option<HighlightKind> {
    let text = node_text(rope, node)?;
    let (name, args) = split_attribute(&text)?;
    if FRAMEWORK_ATTRIBUTES.contains(&name) {
        return Some(HighlightKind::Macro);
    }
    if name == "derive"
        && args
            .split(',')
            .map(str::trim)
            .any(|derive| FRAMEWORK_DERIVES.contains(&derive))
    {
        return Some(HighlightKind::Macro);
    }
    None
}

fn split_attribute(text: &str) -> Option<(&str, &str)> {
    let body = text
        .trim()
        .strip_prefix("#!")
        .or_else(|| text.trim().strip_prefix('#'))?
        .trim_start()
        .strip_prefix('[')?
        .trim_end()
        .strip_suffix(']')?
        .trim();

    let name_end = body
        .find(|c: char| c == '(' || c == '=' || c.is_whitespace())
        .unwrap_or(body.len());
    let name = body[..name_end].rsplit("::").next().unwrap_or_default();
    let rest = body[name_end..].trim();
    let args = rest
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or_default();
    Some((name, args))
}

fn classify_identifier(node: Node<'_>) -> Option<HighlightKind> {
    let parent = node.parent()?;
    match parent.kind() {
        "function_item" | "function_signature_item" if node_is_field(parent, "name", node) => {
            Some(HighlightKind::Function)
        }
        "call_expression" if node_is_field(parent, "function", node) => {
            Some(HighlightKind::Function)
        }
        "const_item" | "static_item" if node_is_field(parent, "name", node) => {
            Some(HighlightKind::Constant)
        }
        "let_declaration" if node_is_field(parent, "pattern", node) => {
            Some(HighlightKind::Variable)
        }
        "parameter" if node_is_field(parent, "pattern", node) => Some(HighlightKind::Parameter),
        "closure_parameters" => Some(HighlightKind::Parameter),
        "mod_item" if node_is_field(parent, "name", node) => Some(HighlightKind::Namespace),
        "scoped_identifier" => {
            let called = parent.parent().is_some_and(|grand| {
                grand.kind() == "call_expression" && node_is_field(grand, "function", parent)
            });
            // `Pubkey::new_unique()`: only the `name` part is the function.
            if called && node_is_field(parent, "name", node) {
                Some(HighlightKind::Function)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn classify_field_identifier(node: Node<'_>) -> Option<HighlightKind> {
    let parent = node.parent()?;
    match parent.kind() {
        "field_expression" => {
            if parent.parent().is_some_and(|grand| {
                grand.kind() == "call_expression" && node_is_field(grand, "function", parent)
            }) {
                return Some(HighlightKind::Method);
            }
            Some(HighlightKind::Property)
        }
        "field_declaration" => Some(HighlightKind::Property),
        _ => None,
    }
}
