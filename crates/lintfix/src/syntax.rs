//! Classification of tree-sitter Go nodes into the kinds fixes care about.
use tree_sitter::Node;

use crate::range::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// A field name inside a struct field declaration.
    FieldDefinition,
    FieldDeclaration,
    FunctionDeclaration,
    MethodDeclaration,
    TypeSpec,
    /// A variable name at its binding site (`var x`, `x :=`, range `:=`, ...).
    VarDefinition,
    ConstDefinition,
    /// A parameter or receiver name.
    ParamDefinition,
    ParameterDeclaration,
    AssignmentStatement,
    IncDecStatement,
    /// A comparison (`==`, `!=`, `<`, `<=`, `>`, `>=`).
    ConditionalExpression,
    IndexOrSliceExpression,
    /// An identifier used as a value.
    ReferenceExpression,
    Other,
}

const COMPARISONS: [&str; 6] = ["==", "!=", "<", "<=", ">", ">="];

impl SyntaxKind {
    pub fn of(node: Node<'_>) -> Self {
        match node.kind() {
            "field_declaration" => Self::FieldDeclaration,
            "function_declaration" => Self::FunctionDeclaration,
            "method_declaration" => Self::MethodDeclaration,
            "type_spec" | "type_alias" => Self::TypeSpec,
            "parameter_declaration" | "variadic_parameter_declaration" => {
                Self::ParameterDeclaration
            }
            "assignment_statement" => Self::AssignmentStatement,
            "inc_statement" | "dec_statement" => Self::IncDecStatement,
            "index_expression" | "slice_expression" => Self::IndexOrSliceExpression,
            "binary_expression" => {
                let is_comparison = node
                    .child_by_field_name("operator")
                    .is_some_and(|op| COMPARISONS.contains(&op.kind()));
                if is_comparison {
                    Self::ConditionalExpression
                } else {
                    Self::Other
                }
            }
            "field_identifier" => match node.parent() {
                Some(parent)
                    if parent.kind() == "field_declaration" && in_field(parent, "name", node) =>
                {
                    Self::FieldDefinition
                }
                _ => Self::Other,
            },
            "identifier" => classify_identifier(node),
            _ => Self::Other,
        }
    }

    /// Kinds that declare a name.
    pub const fn is_named_element(self) -> bool {
        matches!(
            self,
            Self::FieldDefinition
                | Self::FunctionDeclaration
                | Self::MethodDeclaration
                | Self::TypeSpec
                | Self::VarDefinition
                | Self::ConstDefinition
                | Self::ParamDefinition
        )
    }
}

fn classify_identifier(node: Node<'_>) -> SyntaxKind {
    let Some(parent) = node.parent() else {
        return SyntaxKind::ReferenceExpression;
    };
    match parent.kind() {
        "var_spec" if in_field(parent, "name", node) => SyntaxKind::VarDefinition,
        "const_spec" if in_field(parent, "name", node) => SyntaxKind::ConstDefinition,
        "parameter_declaration" | "variadic_parameter_declaration"
            if in_field(parent, "name", node) =>
        {
            SyntaxKind::ParamDefinition
        }
        "function_declaration" if in_field(parent, "name", node) => SyntaxKind::Other,
        "expression_list" => match parent.parent() {
            Some(statement) if declares(statement, parent) => SyntaxKind::VarDefinition,
            _ => SyntaxKind::ReferenceExpression,
        },
        _ => SyntaxKind::ReferenceExpression,
    }
}

/// Whether `list` is the binding side of a `:=`-style statement.
fn declares(statement: Node<'_>, list: Node<'_>) -> bool {
    match statement.kind() {
        "short_var_declaration" => in_field(statement, "left", list),
        "range_clause" | "receive_statement" => {
            in_field(statement, "left", list) && has_token(statement, ":=")
        }
        "type_switch_statement" => in_field(statement, "alias", list),
        _ => false,
    }
}

/// Whether `node` is one of the children of `parent` under `field`.
pub fn in_field(parent: Node<'_>, field: &str, node: Node<'_>) -> bool {
    let mut cursor = parent.walk();
    let found = parent
        .children_by_field_name(field, &mut cursor)
        .any(|child| child.id() == node.id());
    found
}

/// Whether `node` has an anonymous child token `token`.
pub fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// A node together with its kind.
#[derive(Debug, Clone, Copy)]
pub struct Element<'t> {
    node: Node<'t>,
    kind: SyntaxKind,
}

impl<'t> Element<'t> {
    pub fn new(node: Node<'t>) -> Self {
        Self {
            node,
            kind: SyntaxKind::of(node),
        }
    }

    pub const fn node(&self) -> Node<'t> {
        self.node
    }

    pub const fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        TextRange::of(self.node)
    }

    /// The name token of a named element.
    ///
    /// Definitions are their own identifier; declarations carry it in their
    /// `name` field.
    pub fn identifier(&self) -> Option<Node<'t>> {
        match self.kind {
            SyntaxKind::FieldDefinition
            | SyntaxKind::VarDefinition
            | SyntaxKind::ConstDefinition
            | SyntaxKind::ParamDefinition
            | SyntaxKind::ReferenceExpression => Some(self.node),
            SyntaxKind::FunctionDeclaration
            | SyntaxKind::MethodDeclaration
            | SyntaxKind::TypeSpec => self.node.child_by_field_name("name"),
            _ => None,
        }
    }

    /// The receiver name of a method declaration (`r` in `func (r *T) M()`).
    pub fn receiver_identifier(&self) -> Option<Node<'t>> {
        if self.kind != SyntaxKind::MethodDeclaration {
            return None;
        }
        let receiver = self.node.child_by_field_name("receiver")?;
        let mut cursor = receiver.walk();
        let declaration = receiver
            .named_children(&mut cursor)
            .find(|node| node.kind() == "parameter_declaration")?;
        declaration.child_by_field_name("name")
    }

    /// The type clause of a parameter declaration.
    pub fn parameter_type(&self) -> Option<Node<'t>> {
        match self.kind {
            SyntaxKind::ParameterDeclaration => self.node.child_by_field_name("type"),
            _ => None,
        }
    }

    /// The sliced or indexed operand of an index or slice expression.
    pub fn operand(&self) -> Option<Node<'t>> {
        match self.kind {
            SyntaxKind::IndexOrSliceExpression => self.node.child_by_field_name("operand"),
            _ => None,
        }
    }
}
