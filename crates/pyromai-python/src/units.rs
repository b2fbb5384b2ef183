use tree_sitter::Node;

use pyromai_core::types::{ClassMetrics, FileUnits, FunctionMetrics, ImportInfo};

use crate::complexity;
use crate::construct::{
    dotted_text, has_async_keyword, node_text, span_length, unwrap_parens, walk_tree,
    Construct,
};

const CONSTRUCTOR_NAME: &str = "__init__";
const MODULE_NAME_DUNDER: &str = "__name__";

/// Parameter node kinds that each count as one parameter. The bare `*` and
/// `/` separators are separate node kinds and are not counted.
const PARAMETER_KINDS: &[&str] = &[
    "identifier",
    "typed_parameter",
    "default_parameter",
    "typed_default_parameter",
    "list_splat_pattern",
    "dictionary_splat_pattern",
];

/// Walk a module once and collect its functions, classes and imports into a
/// fresh [`FileUnits`].
pub fn extract_units(root: Node, source: &str) -> FileUnits {
    let mut units = FileUnits::default();

    walk_tree(root, |node| match Construct::of(node) {
        Construct::Function => units.functions.push(function_metrics(node, source)),
        Construct::Class => units.classes.push(class_metrics(node, source)),
        Construct::Import => collect_plain_import(node, source, &mut units.imports),
        Construct::FromImport => units.imports.push(from_import(node, source)),
        Construct::If | Construct::Elif => {
            if !units.has_entry_point_guard && is_entry_point_guard(node, source) {
                units.has_entry_point_guard = true;
            }
        }
        _ => {}
    });

    units
}

fn function_metrics(node: Node, source: &str) -> FunctionMetrics {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or_default();
    let start = node.start_position();

    // Decorator expressions are scored together with the function.
    let scored = node
        .parent()
        .filter(|p| p.kind() == "decorated_definition")
        .unwrap_or(node);
    let scores = complexity::score(scored);

    FunctionMetrics {
        name,
        line: start.row + 1,
        column: start.column,
        length: span_length(node),
        cyclomatic_complexity: scores.cyclomatic,
        cognitive_complexity: scores.cognitive,
        parameters_count: count_parameters(node),
        is_async: has_async_keyword(node),
    }
}

fn count_parameters(function: Node) -> usize {
    let Some(params) = function.child_by_field_name("parameters") else {
        return 0;
    };
    let mut cursor = params.walk();
    let count = params
        .named_children(&mut cursor)
        .filter(|c| PARAMETER_KINDS.contains(&c.kind()))
        .count();
    count
}

fn class_metrics(node: Node, source: &str) -> ClassMetrics {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or_default();
    let start = node.start_position();

    let mut methods_count = 0;
    let mut has_init = false;

    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for entry in body.named_children(&mut cursor) {
            let Some(method) = direct_function(entry) else {
                continue;
            };
            methods_count += 1;
            if !has_async_keyword(method)
                && method
                    .child_by_field_name("name")
                    .is_some_and(|n| &source[n.byte_range()] == CONSTRUCTOR_NAME)
            {
                has_init = true;
            }
        }
    }

    ClassMetrics {
        name,
        line: start.row + 1,
        column: start.column,
        length: span_length(node),
        methods_count,
        has_init,
        parent_classes: parent_classes(node, source),
    }
}

/// A class body entry that is a function definition, with or without decorators.
fn direct_function(entry: Node) -> Option<Node> {
    match entry.kind() {
        "function_definition" => Some(entry),
        "decorated_definition" => entry
            .child_by_field_name("definition")
            .filter(|d| d.kind() == "function_definition"),
        _ => None,
    }
}

fn parent_classes(class: Node, source: &str) -> Vec<String> {
    let Some(bases) = class.child_by_field_name("superclasses") else {
        return Vec::new();
    };
    let mut cursor = bases.walk();
    let names = bases
        .named_children(&mut cursor)
        .map(unwrap_parens)
        .filter_map(|base| match base.kind() {
            "identifier" => Some(node_text(base, source)),
            "attribute" => Some(attribute_name(base, source)),
            _ => None,
        })
        .collect();
    names
}

/// Flatten `a.b.C` by following the object chain down to its root name.
/// When the root is not a plain name (a call, a subscript), only the final
/// attribute is kept.
fn attribute_name(node: Node, source: &str) -> String {
    let attr = node
        .child_by_field_name("attribute")
        .map(|n| node_text(n, source))
        .unwrap_or_default();

    match node.child_by_field_name("object").map(unwrap_parens) {
        Some(object) if object.kind() == "identifier" => {
            format!("{}.{attr}", node_text(object, source))
        }
        Some(object) if object.kind() == "attribute" => {
            format!("{}.{attr}", attribute_name(object, source))
        }
        _ => attr,
    }
}

/// `import a as b, c` yields one entry per imported module, named by its alias.
fn collect_plain_import(node: Node, source: &str, imports: &mut Vec<ImportInfo>) {
    let line = node.start_position().row + 1;
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        let (module, bound) = match name.kind() {
            "aliased_import" => {
                let module = name
                    .child_by_field_name("name")
                    .map(|n| dotted_text(n, source))
                    .unwrap_or_default();
                let alias = name
                    .child_by_field_name("alias")
                    .map(|n| node_text(n, source))
                    .unwrap_or_else(|| module.clone());
                (module, alias)
            }
            _ => {
                let module = dotted_text(name, source);
                (module.clone(), module)
            }
        };
        imports.push(ImportInfo {
            module,
            names: vec![bound],
            line,
            is_relative: false,
        });
    }
}

/// `from X import a, b` yields a single entry carrying every original name.
fn from_import(node: Node, source: &str) -> ImportInfo {
    let (module, is_relative) = if node.kind() == "future_import_statement" {
        ("__future__".to_string(), false)
    } else {
        match node.child_by_field_name("module_name") {
            Some(m) if m.kind() == "relative_import" => {
                let mut cursor = m.walk();
                let dotted = m
                    .named_children(&mut cursor)
                    .find(|c| c.kind() == "dotted_name")
                    .map(|d| dotted_text(d, source))
                    .unwrap_or_default();
                (dotted, true)
            }
            Some(m) => (dotted_text(m, source), false),
            None => (String::new(), false),
        }
    };

    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "wildcard_import" {
            names.push("*".to_string());
        }
    }
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        let original = match name.kind() {
            "aliased_import" => name
                .child_by_field_name("name")
                .map(|n| dotted_text(n, source))
                .unwrap_or_default(),
            _ => dotted_text(name, source),
        };
        names.push(original);
    }

    ImportInfo {
        module,
        names,
        line: node.start_position().row + 1,
        is_relative,
    }
}

/// `if __name__ ...:` with any comparison operator and any right-hand side.
fn is_entry_point_guard(node: Node, source: &str) -> bool {
    let Some(condition) = node.child_by_field_name("condition").map(unwrap_parens) else {
        return false;
    };
    if condition.kind() != "comparison_operator" {
        return false;
    }

    let mut cursor = condition.walk();
    let left = condition.named_children(&mut cursor).next();
    left.is_some_and(|l| l.kind() == "identifier" && &source[l.byte_range()] == MODULE_NAME_DUNDER)
}
