//! Name scopes as far as one file's syntax tree tells.
//!
//! A definition's references are the same-named tokens of its scope that
//! come after it and are not hidden by a nested redeclaration.
use tree_sitter::Node;

use crate::range::TextRange;
use crate::source::GoFile;
use crate::syntax::{Element, SyntaxKind, in_field};

const BLOCK_SCOPES: [&str; 14] = [
    "block",
    "for_statement",
    "if_statement",
    "expression_switch_statement",
    "type_switch_statement",
    "select_statement",
    "communication_case",
    "expression_case",
    "type_case",
    "default_case",
    "func_literal",
    "function_declaration",
    "method_declaration",
    "source_file",
];

const FUNCTION_SCOPES: [&str; 4] = [
    "func_literal",
    "function_declaration",
    "method_declaration",
    "source_file",
];

/// Statements whose names become visible only once the statement ends.
const BINDING_STATEMENTS: [&str; 5] = [
    "short_var_declaration",
    "range_clause",
    "receive_statement",
    "var_spec",
    "const_spec",
];

/// The node a definition's name is visible in.
pub fn binding_scope(definition: Element<'_>) -> Node<'_> {
    let scopes: &[&str] = match definition.kind() {
        SyntaxKind::ParamDefinition => &FUNCTION_SCOPES,
        SyntaxKind::VarDefinition | SyntaxKind::ConstDefinition => &BLOCK_SCOPES,
        _ => &["source_file"],
    };

    let mut scope = definition.node();
    for ancestor in std::iter::successors(scope.parent(), Node::parent) {
        scope = ancestor;
        if scopes.contains(&ancestor.kind()) {
            break;
        }
    }
    scope
}

/// Where the name defined by `name` starts being visible.
fn visible_from(name: Node<'_>) -> usize {
    std::iter::successors(name.parent(), Node::parent)
        .take(2)
        .find(|statement| BINDING_STATEMENTS.contains(&statement.kind()))
        .map_or(name.end_byte(), |statement| statement.end_byte())
}

/// Struct literal keys (`T{name: v}`) name fields, not variables.
fn is_literal_key(node: Node<'_>) -> bool {
    node.parent()
        .filter(|parent| parent.kind() == "literal_element")
        .and_then(|element| {
            let keyed = element.parent()?;
            (keyed.kind() == "keyed_element")
                .then(|| keyed.child_by_field_name("key"))
                .flatten()
                .map(|key| key.id() == element.id())
        })
        .unwrap_or(false)
}

/// Every identifier or type identifier inside `scope` spelled `text`, in
/// source order.
fn spelled<'t>(file: &'t GoFile, scope: Node<'t>, text: &str) -> Vec<Node<'t>> {
    let mut found = Vec::new();

    let mut cursor = scope.walk();
    loop {
        let node = cursor.node();
        if matches!(node.kind(), "identifier" | "type_identifier") && file.node_text(node) == text
        {
            found.push(node);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return found;
            }
        }
    }
}

/// Whether a token spelled like a definition can refer to it.
fn may_refer(node: Node<'_>, name: Node<'_>) -> bool {
    let parent = node.parent();
    match (node.kind(), name.kind()) {
        ("identifier", "identifier") => !is_literal_key(node),
        // `pkg.T` is another package's type.
        ("type_identifier", "type_identifier") => {
            !parent.is_some_and(|parent| parent.kind() == "qualified_type")
        }
        // Conversions: `T(x)`.
        ("identifier", "type_identifier") => parent.is_some_and(|parent| {
            parent.kind() == "call_expression" && in_field(parent, "function", node)
        }),
        _ => false,
    }
}

/// The definitions in `candidates` that open a scope nested in `scope`, with
/// the range they hide outer names in.
fn shadowing<'t>(scope: Node<'t>, candidates: &[Node<'t>]) -> Vec<(Node<'t>, TextRange)> {
    candidates
        .iter()
        .filter_map(|&node| {
            let element = Element::new(node);
            if !matches!(
                element.kind(),
                SyntaxKind::VarDefinition | SyntaxKind::ConstDefinition | SyntaxKind::ParamDefinition
            ) {
                return None;
            }
            let inner = binding_scope(element);
            (inner.id() != scope.id())
                .then(|| (node, TextRange::new(visible_from(node), inner.end_byte())))
        })
        .collect()
}

/// The tokens naming what `definition` defines, its own name first.
///
/// Tokens before the definition in a block, and tokens inside nested scopes
/// that redeclare the name, refer to something else and are left out.
pub fn references<'t>(file: &'t GoFile, definition: Element<'t>) -> Vec<Node<'t>> {
    let Some(name) = definition.identifier() else {
        return Vec::new();
    };
    let scope = binding_scope(definition);
    let start = if scope.kind() == "source_file" {
        scope.start_byte()
    } else {
        visible_from(name)
    };

    let candidates = spelled(file, scope, file.node_text(name));
    let hidden = shadowing(scope, &candidates);
    let mut found = vec![name];
    found.extend(candidates.into_iter().filter(|node| {
        node.id() != name.id()
            && node.start_byte() >= start
            && may_refer(*node, name)
            && !hidden.iter().any(|(inner, range)| {
                inner.id() == node.id() || range.contains(node.start_byte())
            })
    }));
    found
}

/// Whether some identifier inside `scope` is already spelled `text`.
pub fn is_taken(file: &GoFile, scope: Node<'_>, text: &str) -> bool {
    !spelled(file, scope, text).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::resolve_named;

    const SOURCE: &str = r#"package a

var count = 1

func f(count int) int {
	total := count
	if total > 0 {
		total := 2
		_ = total
	}
	return Config{total: total}.total
}

func g() int {
	return count
}
"#;

    fn texts(source: &str, needle: &str) -> Vec<(usize, String)> {
        let file = GoFile::parse(source).unwrap();
        let offset = source.find(needle).unwrap();
        let definition = resolve_named(&file, offset).unwrap();
        references(&file, definition)
            .into_iter()
            .map(|node| (node.start_byte(), file.node_text(node).to_string()))
            .collect()
    }

    #[test]
    fn parameter_scope_is_the_function() {
        let file = GoFile::parse(SOURCE).unwrap();
        let offset = SOURCE.find("count int").unwrap();
        let definition = resolve_named(&file, offset).unwrap();
        assert_eq!(binding_scope(definition).kind(), "function_declaration");
        assert_eq!(references(&file, definition).len(), 2);
    }

    #[test]
    fn parameter_hides_package_variable() {
        let file = GoFile::parse(SOURCE).unwrap();
        let offset = SOURCE.find("count = 1").unwrap();
        let definition = resolve_named(&file, offset).unwrap();
        assert_eq!(binding_scope(definition).kind(), "source_file");
        let found: Vec<usize> = references(&file, definition)
            .iter()
            .map(Node::start_byte)
            .collect();
        assert_eq!(found, vec![offset, SOURCE.rfind("count").unwrap()]);
    }

    #[test]
    fn inner_block_and_literal_keys_are_skipped() {
        // The inner `total` and the `total:` key are not references.
        let found = texts(SOURCE, "total := count");
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|(offset, _)| *offset < SOURCE.find("total := 2").unwrap()
            || *offset > SOURCE.find("_ = total").unwrap()));
    }

    #[test]
    fn earlier_uses_belong_to_the_outer_name() {
        let source = "package a\n\nfunc f(v int) int {\n\tuserId := v\n\t{\n\t\tv := userId\n\t\tuserId := v + 1\n\t\treturn userId\n\t}\n}\n";
        let inner = source.rfind("userId := v").unwrap();
        let found = texts(source, "userId := v + 1");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|(offset, _)| *offset >= inner));
    }

    #[test]
    fn type_references() {
        let source = "package http\n\ntype HTTPServer struct{}\n\nvar a other.HTTPServer\nvar b = HTTPServer(struct{}{})\nvar c *HTTPServer\n";
        let found = texts(source, "HTTPServer struct");
        let offsets: Vec<usize> = found.iter().map(|(offset, _)| *offset).collect();
        assert_eq!(
            offsets,
            vec![
                source.find("HTTPServer struct").unwrap(),
                source.find("HTTPServer(").unwrap(),
                source.rfind("HTTPServer").unwrap(),
            ]
        );
    }

    #[test]
    fn taken_names() {
        let file = GoFile::parse(SOURCE).unwrap();
        assert!(is_taken(&file, file.root(), "total"));
        assert!(!is_taken(&file, file.root(), "sum"));
    }
}
