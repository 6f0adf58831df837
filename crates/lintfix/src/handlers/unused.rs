//! Shared handler for the tools that report unused declarations
//! (`structcheck`, `varcheck`, `deadcode`, `unused`).
use tree_sitter::Node;

use super::{Context, HandlerResult, NoFix};
use crate::anchor;
use crate::binding::Binding;
use crate::diagnostic::Diagnostic;
use crate::edit;
use crate::fix::{Fix, FixResult};
use crate::message;
use crate::range::TextRange;
use crate::source::{GoFile, TextEdit};
use crate::syntax::{Element, SyntaxKind, has_token};

/// Remove the whole line(s) of the field declaration holding `field`, doc
/// comment included.
///
/// Both bounding newlines must lie inside the field list, so single-line
/// structs get no fix.
fn delete_field(file: &GoFile, field: Element<'_>, name: &str) -> Option<Fix> {
    let declaration = field.node().parent()?;
    let list = declaration.parent()?;
    let text = file.text();

    let first = edit::with_doc_comment(file, declaration);
    let head = text.get(list.start_byte()..first)?;
    let start = list.start_byte() + head.rfind('\n')? + 1;
    let tail = text.get(declaration.end_byte()..list.end_byte())?;
    let end = declaration.end_byte() + tail.find('\n')? + 1;

    Some(Fix::delete(
        file,
        format!("Delete field '{name}'"),
        [TextRange::new(start, end)],
    ))
}

fn delete_function(file: &GoFile, function: Node<'_>, name: &str) -> Fix {
    let start = edit::with_doc_comment(file, function);
    let range = edit::line_extended(file, TextRange::new(start, function.end_byte()));
    Fix::delete(file, format!("Delete function '{name}'"), [range])
}

fn delete_type(file: &GoFile, spec: Node<'_>, name: &str) -> Fix {
    let target = spec
        .parent()
        .filter(|declaration| {
            let mut cursor = declaration.walk();
            let specs = declaration
                .named_children(&mut cursor)
                .filter(|child| matches!(child.kind(), "type_spec" | "type_alias"))
                .count();
            specs == 1
        })
        .unwrap_or(spec);
    let range = edit::line_extended(file, TextRange::of(target));
    Fix::delete(file, format!("Delete type '{name}'"), [range])
}

/// `_ := v` does not compile, so a short declaration whose names would all
/// be blank becomes an assignment.
fn blank_definition_edits(file: &GoFile, name: Node<'_>) -> Vec<TextEdit> {
    let rename = TextEdit::replace(TextRange::of(name), "_");
    let Some(list) = name.parent().filter(|list| list.kind() == "expression_list") else {
        return vec![rename];
    };
    let Some(statement) = list.parent() else {
        return vec![rename];
    };

    let mut cursor = list.walk();
    let all_blank = list
        .named_children(&mut cursor)
        .all(|other| other.id() == name.id() || file.node_text(other) == "_");
    if !all_blank {
        return vec![rename];
    }

    match statement.kind() {
        // `switch x := v.(type)` loses its alias altogether.
        "type_switch_statement" => statement
            .child_by_field_name("value")
            .map(|value| vec![TextEdit::delete(TextRange::new(list.start_byte(), value.start_byte()))])
            .unwrap_or_default(),
        "short_var_declaration" | "range_clause" | "receive_statement"
            if has_token(statement, ":=") =>
        {
            let mut cursor = statement.walk();
            let define = statement
                .children(&mut cursor)
                .find(|child| !child.is_named() && child.kind() == ":=");
            let mut edits = vec![rename];
            edits.extend(define.map(|token| TextEdit::replace(TextRange::of(token), "=")));
            edits
        }
        _ => vec![rename],
    }
}

fn rename_to_blank(file: &GoFile, name: Node<'_>, definition: bool) -> Fix {
    let edits = if definition {
        blank_definition_edits(file, name)
    } else {
        vec![TextEdit::replace(TextRange::of(name), "_")]
    };
    Fix::rename(file, "Rename to _", edits)
}

fn delete_binding(file: &GoFile, definition: Element<'_>, label: String) -> Option<Fix> {
    let ranges = Binding::of(definition)?.deletion(file)?;
    Some(Fix::delete(file, label, ranges))
}

pub fn unused(ctx: &Context<'_>, diagnostic: &Diagnostic) -> HandlerResult {
    let file = ctx.file;
    let expected = message::unused_name(&diagnostic.message).ok_or(NoFix::PatternMismatch)?;
    let element =
        anchor::resolve_named(file, diagnostic.offset).ok_or(NoFix::AnchorNotFound)?;
    let identifier = element.identifier().ok_or(NoFix::AnchorMismatch)?;
    let name = file.node_text(identifier);
    // The walk reaches the enclosing declaration once the name is gone.
    if name != expected {
        return Err(NoFix::AnchorMismatch);
    }

    let fixes = match element.kind() {
        SyntaxKind::FieldDefinition => delete_field(file, element, name).into_iter().collect(),
        SyntaxKind::FunctionDeclaration => vec![
            delete_function(file, element.node(), name),
            rename_to_blank(file, identifier, false),
        ],
        SyntaxKind::TypeSpec => vec![delete_type(file, element.node(), name)],
        SyntaxKind::VarDefinition => {
            let mut fixes = vec![rename_to_blank(file, identifier, true)];
            if ctx.oracle.can_delete(file, element) {
                fixes.extend(delete_binding(
                    file,
                    element,
                    format!("Delete variable '{name}'"),
                ));
            }
            fixes
        }
        SyntaxKind::ConstDefinition if ctx.oracle.can_delete(file, element) => {
            delete_binding(file, element, format!("Delete constant '{name}'"))
                .into_iter()
                .collect()
        }
        _ => Vec::new(),
    };

    Ok(FixResult::new(fixes, Some(TextRange::of(identifier))))
}
