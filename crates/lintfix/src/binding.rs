//! The statement or spec that binds a variable or constant name.
use tree_sitter::Node;

use crate::edit;
use crate::range::TextRange;
use crate::source::GoFile;
use crate::syntax::{Element, SyntaxKind};

/// What a name is initialised with.
#[derive(Debug, Clone, Copy)]
pub enum Value<'t> {
    /// `var x int`, or an implicitly repeated constant.
    None,
    /// The expression paired with the name.
    Expr(Node<'t>),
    /// Values that do not pair up with names (`a, b := f()`, `range`).
    Unpaired,
}

#[derive(Debug, Clone)]
pub struct Binding<'t> {
    /// `var_spec`, `const_spec`, `short_var_declaration`, `range_clause`, ...
    pub spec: Node<'t>,
    pub names: Vec<Node<'t>>,
    pub values: Vec<Node<'t>>,
    /// Position of the definition in `names`.
    pub index: usize,
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

impl<'t> Binding<'t> {
    pub fn of(definition: Element<'t>) -> Option<Self> {
        if !matches!(
            definition.kind(),
            SyntaxKind::VarDefinition | SyntaxKind::ConstDefinition
        ) {
            return None;
        }

        let name = definition.node();
        let parent = name.parent()?;
        let (spec, names, values) = match parent.kind() {
            "var_spec" | "const_spec" => {
                let values = parent
                    .child_by_field_name("value")
                    .map(named_children)
                    .unwrap_or_default();
                (parent, field_children(parent, "name"), values)
            }
            "expression_list" => {
                let spec = parent.parent()?;
                let values = match spec.kind() {
                    "short_var_declaration" => spec
                        .child_by_field_name("right")
                        .map(named_children)
                        .unwrap_or_default(),
                    _ => Vec::new(),
                };
                (spec, named_children(parent), values)
            }
            _ => return None,
        };
        let index = names.iter().position(|node| node.id() == name.id())?;

        Some(Self {
            spec,
            names,
            values,
            index,
        })
    }

    pub fn value(&self) -> Value<'t> {
        match self.spec.kind() {
            "var_spec" | "const_spec" if self.values.is_empty() => Value::None,
            "var_spec" | "const_spec" | "short_var_declaration"
                if self.values.len() == self.names.len() =>
            {
                self.values
                    .get(self.index)
                    .copied()
                    .map_or(Value::Unpaired, Value::Expr)
            }
            _ => Value::Unpaired,
        }
    }

    /// The `var`/`const` declaration around a spec, when it holds nothing else.
    fn sole_declaration(&self) -> Option<Node<'t>> {
        let declaration = std::iter::successors(self.spec.parent(), Node::parent)
            .find(|node| matches!(node.kind(), "var_declaration" | "const_declaration"))?;
        let specs = named_children(declaration)
            .into_iter()
            .flat_map(|child| match child.kind() {
                "var_spec_list" => named_children(child),
                _ => vec![child],
            })
            .filter(|child| child.kind() == self.spec.kind())
            .count();
        (specs == 1).then_some(declaration)
    }

    /// Ranges to delete so that the definition, and its paired value, are gone.
    pub fn deletion(&self, file: &GoFile) -> Option<Vec<TextRange>> {
        if self.names.len() > 1 {
            let mut ranges = vec![edit::list_element(&self.names, self.index)?];
            if self.values.len() == self.names.len() {
                ranges.push(edit::list_element(&self.values, self.index)?);
            }
            return Some(ranges);
        }

        let target = match self.spec.kind() {
            "var_spec" | "const_spec" => self.sole_declaration().unwrap_or(self.spec),
            "short_var_declaration" => {
                let parent = self.spec.parent()?.kind();
                if !matches!(parent, "block" | "statement_list" | "source_file") {
                    return None;
                }
                self.spec
            }
            _ => return None,
        };
        Some(vec![edit::line_extended(file, TextRange::of(target))])
    }

    /// Whether this constant spec sits in a group where a later spec
    /// depends on its position (implicit repetition or `iota`).
    pub fn shifts_later_constants(&self, file: &GoFile) -> bool {
        if self.spec.kind() != "const_spec" {
            return false;
        }
        std::iter::successors(self.spec.next_named_sibling(), Node::next_named_sibling)
            .filter(|sibling| sibling.kind() == "const_spec")
            .any(|sibling| match sibling.child_by_field_name("value") {
                None => true,
                Some(value) => mentions_iota(file, value),
            })
    }
}

fn mentions_iota(file: &GoFile, node: Node<'_>) -> bool {
    if node.kind() == "iota" || (node.kind() == "identifier" && file.node_text(node) == "iota") {
        return true;
    }
    named_children(node)
        .into_iter()
        .any(|child| mentions_iota(file, child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::resolve_named;

    fn binding_at<'t>(file: &'t GoFile, needle: &str) -> Binding<'t> {
        let offset = file.text().find(needle).unwrap();
        Binding::of(resolve_named(file, offset).unwrap()).unwrap()
    }

    #[test]
    fn short_var_pairs() {
        let file = GoFile::parse("package a\n\nfunc f() {\n\ta, b := 1, g()\n}\n").unwrap();
        let binding = binding_at(&file, "b :=");
        assert_eq!(binding.index, 1);
        assert!(matches!(binding.value(), Value::Expr(node) if file.node_text(node) == "g()"));
    }

    #[test]
    fn multi_value_call_is_unpaired() {
        let file = GoFile::parse("package a\n\nfunc f() {\n\ta, b := g()\n}\n").unwrap();
        let binding = binding_at(&file, "a,");
        assert!(matches!(binding.value(), Value::Unpaired));
    }

    #[test]
    fn var_without_value() {
        let file = GoFile::parse("package a\n\nvar x int\n").unwrap();
        let binding = binding_at(&file, "x int");
        assert!(matches!(binding.value(), Value::None));
        assert_eq!(
            binding.deletion(&file),
            Some(vec![TextRange::new(11, 21)])
        );
    }

    #[test]
    fn delete_from_name_list() {
        let file = GoFile::parse("package a\n\nvar x, y = 1, 2\n").unwrap();
        let binding = binding_at(&file, "y =");
        let ranges = binding.deletion(&file).unwrap();
        let texts: Vec<_> = ranges.iter().map(|r| file.slice(*r).unwrap()).collect();
        assert_eq!(texts, vec![", y", ", 2"]);
    }

    #[test]
    fn iota_groups() {
        let file =
            GoFile::parse("package a\n\nconst (\n\tA = iota\n\tB\n\tC = 10\n)\n").unwrap();
        assert!(binding_at(&file, "A =").shifts_later_constants(&file));
        assert!(!binding_at(&file, "C =").shifts_later_constants(&file));
    }
}
