use tree_sitter::Node;

/// The syntax constructs the extractor and scorer care about.
///
/// Everything else maps to `Other` and is only traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Construct {
    Function,
    Class,
    Import,
    FromImport,
    If,
    Elif,
    While,
    For,
    /// `async for`, kept apart from `For` because it is not scored.
    AsyncFor,
    Except,
    BoolOp,
    Other,
}

impl Construct {
    pub(crate) fn of(node: Node) -> Self {
        match node.kind() {
            "function_definition" => Construct::Function,
            "class_definition" => Construct::Class,
            "import_statement" => Construct::Import,
            "import_from_statement" | "future_import_statement" => Construct::FromImport,
            "if_statement" => Construct::If,
            "elif_clause" => Construct::Elif,
            "while_statement" => Construct::While,
            "for_statement" if has_async_keyword(node) => Construct::AsyncFor,
            "for_statement" => Construct::For,
            "except_clause" | "except_group_clause" => Construct::Except,
            "boolean_operator" => Construct::BoolOp,
            _ => Construct::Other,
        }
    }
}

/// Visit `root` and all of its descendants in source (pre-)order.
pub(crate) fn walk_tree<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>)) {
    let mut cursor = root.walk();
    let mut depth = 0usize;
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        loop {
            if depth == 0 {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            cursor.goto_parent();
            depth -= 1;
        }
    }
}

/// True for `async def` / `async for` nodes.
pub(crate) fn has_async_keyword(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == "async");
    found
}

/// Extract text from a tree-sitter node.
pub(crate) fn node_text(node: Node, source: &str) -> String {
    source[node.byte_range()].to_string()
}

/// Text of a `dotted_name`, rebuilt from its identifiers so stray
/// whitespace around the dots is dropped.
pub(crate) fn dotted_text(node: Node, source: &str) -> String {
    if node.kind() != "dotted_name" {
        return node_text(node, source);
    }
    let mut cursor = node.walk();
    let parts: Vec<&str> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "identifier")
        .map(|c| &source[c.byte_range()])
        .collect();
    parts.join(".")
}

/// 1-based line of the last token that belongs to `node`, ignoring
/// trailing comments.
pub(crate) fn last_line(node: Node) -> usize {
    let mut current = node;
    loop {
        let mut cursor = current.walk();
        let last = current
            .children(&mut cursor)
            .filter(|c| c.kind() != "comment")
            .last();
        match last {
            Some(child) => current = child,
            None => break,
        }
    }
    current.end_position().row + 1
}

/// Line span of a definition: end line - start line + 1.
pub(crate) fn span_length(node: Node) -> usize {
    let start = node.start_position().row + 1;
    let end = last_line(node).max(start);
    end - start + 1
}

/// Strip any number of enclosing parentheses from an expression.
pub(crate) fn unwrap_parens(node: Node) -> Node {
    let mut current = node;
    while current.kind() == "parenthesized_expression" {
        let mut cursor = current.walk();
        let inner = current
            .named_children(&mut cursor)
            .find(|c| c.kind() != "comment");
        match inner {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}
