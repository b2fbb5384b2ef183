//! Rejects source that tree-sitter parses cleanly but CPython does not.
//!
//! The grammar still carries Python 2 statements and is lenient about
//! argument order, parameter order and indentation. Each check here looks at
//! one node and its direct children.

use tree_sitter::Node;

use crate::construct::walk_tree;

/// A construct CPython refuses to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Violation {
    pub line: usize,
    pub column: usize,
    pub message: &'static str,
}

impl Violation {
    fn at(node: Node, message: &'static str) -> Self {
        let pos = node.start_position();
        Self {
            line: pos.row + 1,
            column: pos.column,
            message,
        }
    }
}

/// First violation in source order, if any.
pub(crate) fn first_violation(root: Node) -> Option<Violation> {
    let mut found: Option<Violation> = None;

    walk_tree(root, |node| {
        if found.is_some() {
            return;
        }
        found = match node.kind() {
            "print_statement" => Some(Violation::at(node, "Python 2 print statement")),
            "exec_statement" => Some(Violation::at(node, "Python 2 exec statement")),
            "argument_list" => check_arguments(node),
            "parameters" | "lambda_parameters" => check_parameters(node),
            "module" => check_indentation(node, Some(0)),
            "block" => check_indentation(node, None),
            _ => None,
        };
    });

    found
}

fn significant_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|c| !c.is_extra() && c.kind() != "comment")
        .collect();
    children
}

/// Positional after keyword or `**`, and `*` after `**`.
fn check_arguments(args: Node) -> Option<Violation> {
    let mut seen_keyword = false;
    let mut seen_double_star = false;

    for arg in significant_children(args) {
        match arg.kind() {
            "keyword_argument" => seen_keyword = true,
            "dictionary_splat" => seen_double_star = true,
            "list_splat" if seen_double_star => {
                return Some(Violation::at(
                    arg,
                    "iterable argument unpacking follows keyword argument unpacking",
                ));
            }
            "list_splat" => {}
            _ if seen_double_star => {
                return Some(Violation::at(
                    arg,
                    "positional argument follows keyword argument unpacking",
                ));
            }
            _ if seen_keyword => {
                return Some(Violation::at(
                    arg,
                    "positional argument follows keyword argument",
                ));
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    Plain,
    Default,
    Star,
    BareStar,
    DoubleStar,
    Slash,
}

fn classify_param(node: Node) -> Option<Param> {
    match node.kind() {
        "identifier" => Some(Param::Plain),
        "default_parameter" | "typed_default_parameter" => Some(Param::Default),
        "list_splat_pattern" => Some(Param::Star),
        "dictionary_splat_pattern" => Some(Param::DoubleStar),
        "keyword_separator" => Some(Param::BareStar),
        "positional_separator" => Some(Param::Slash),
        // `*args: T` and `**kwargs: T` are typed parameters wrapping a splat.
        "typed_parameter" => match node.named_child(0).map(|c| c.kind()) {
            Some("list_splat_pattern") => Some(Param::Star),
            Some("dictionary_splat_pattern") => Some(Param::DoubleStar),
            _ => Some(Param::Plain),
        },
        _ => None,
    }
}

fn check_parameters(params: Node) -> Option<Violation> {
    let list: Vec<(Node, Param)> = significant_children(params)
        .into_iter()
        .filter_map(|n| classify_param(n).map(|p| (n, p)))
        .collect();

    let mut seen_default = false;
    let mut seen_star = false;
    let mut seen_slash = false;
    let mut prev: Option<Param> = None;

    for (i, &(node, param)) in list.iter().enumerate() {
        if prev == Some(Param::DoubleStar) {
            return Some(Violation::at(node, "parameter follows **kwargs"));
        }
        match param {
            Param::Plain if seen_default && !seen_star => {
                return Some(Violation::at(
                    node,
                    "non-default argument follows default argument",
                ));
            }
            Param::Plain => {}
            Param::Default => seen_default = true,
            Param::Star | Param::BareStar if seen_star => {
                return Some(Violation::at(node, "* argument may appear only once"));
            }
            Param::Star => seen_star = true,
            Param::BareStar => {
                let next = list.get(i + 1).map(|(_, p)| *p);
                if matches!(next, None | Some(Param::DoubleStar)) {
                    return Some(Violation::at(node, "named arguments must follow bare *"));
                }
                seen_star = true;
            }
            Param::Slash if i == 0 || seen_slash || seen_star => {
                return Some(Violation::at(node, "invalid position for /"));
            }
            Param::Slash => seen_slash = true,
            Param::DoubleStar => {}
        }
        prev = Some(param);
    }
    None
}

/// Every statement that begins a new line must start at the indentation of
/// the first statement. The module's indentation is column 0, but its first
/// row is not checked so a byte-order mark does not count as indentation.
fn check_indentation(container: Node, expected: Option<usize>) -> Option<Violation> {
    let statements = significant_children(container);
    let first = statements.first()?;
    let column = expected.unwrap_or(first.start_position().column);

    let mut prev_end_row: Option<usize> = None;
    for stmt in &statements {
        let start = stmt.start_position();
        let new_line = prev_end_row.map_or(true, |row| start.row > row);
        let checked = expected.is_none() || start.row > 0;
        if new_line && checked && start.column != column {
            return Some(Violation::at(*stmt, "unexpected indent"));
        }
        prev_end_row = Some(stmt.end_position().row);
    }
    None
}
