//! Cyclomatic and cognitive complexity scoring.
//!
//! Both scores fold over the whole subtree of a definition, including the
//! bodies of nested functions and classes. An inner function's branches
//! therefore also count towards every enclosing function.

use tree_sitter::Node;

use crate::construct::{walk_tree, Construct};

/// Complexity scores for one function subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub cyclomatic: u32,
    pub cognitive: u32,
}

/// Score the subtree rooted at `node`.
///
/// Cyclomatic starts at 1 and adds one per `if`, `elif`, `while`, `for` and
/// `except` clause, plus one per `and`/`or` operator (an N-operand chain adds
/// N-1). Cognitive adds one per branch, loop and `except` clause, with no
/// nesting weight.
pub fn score(node: Node) -> Complexity {
    let mut complexity = Complexity {
        cyclomatic: 1,
        cognitive: 0,
    };

    walk_tree(node, |n| match Construct::of(n) {
        Construct::If
        | Construct::Elif
        | Construct::While
        | Construct::For
        | Construct::Except => {
            complexity.cyclomatic += 1;
            complexity.cognitive += 1;
        }
        Construct::BoolOp => complexity.cyclomatic += 1,
        _ => {}
    });

    complexity
}
