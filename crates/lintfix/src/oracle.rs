//! Deciding whether removing a definition can change behavior.
use tree_sitter::Node;

use crate::binding::{Binding, Value};
use crate::scope;
use crate::source::GoFile;
use crate::syntax::Element;

pub trait UsageOracle {
    /// Whether the definition (a variable or constant name) can be deleted
    /// together with its initializer.
    fn can_delete(&self, file: &GoFile, definition: Element<'_>) -> bool;
}

/// Answers from the syntax tree of a single file.
///
/// A definition is deletable when its name appears nowhere else in its
/// scope and its initializer cannot have side effects.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalUsageOracle;

fn has_side_effects(node: Node<'_>) -> bool {
    let is_receive = node.kind() == "unary_expression"
        && node
            .child_by_field_name("operator")
            .is_some_and(|op| op.kind() == "<-");
    if node.kind() == "call_expression" || is_receive {
        return true;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.named_children(&mut cursor).collect();
    children.into_iter().any(has_side_effects)
}

impl UsageOracle for LocalUsageOracle {
    fn can_delete(&self, file: &GoFile, definition: Element<'_>) -> bool {
        let Some(binding) = Binding::of(definition) else {
            return false;
        };
        if scope::references(file, definition).len() > 1 {
            return false;
        }
        let pure = match binding.value() {
            Value::None => true,
            Value::Expr(value) => !has_side_effects(value),
            Value::Unpaired => false,
        };
        pure && !binding.shifts_later_constants(file)
    }
}
