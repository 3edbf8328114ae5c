//! Expression tree for the infix rendering
//!
//! Nodes live in a flat arena and refer to their children by index. The
//! tree is built in one pass over the tokens, in the same direction the
//! reducer walks them:
//! - postfix: forward, each operator takes `right` then `left` off the stack
//! - prefix: reversed, each operator takes `left` then `right`
//!
//! Rendering is always fully parenthesized. The tree does not validate its
//! input: a missing child renders as `undefined` and it is up to the
//! reducer to reject malformed expressions.

use crate::eval::{round4, Notation};
use crate::lexer::{Operator, Token};

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    /// A number literal, as typed
    Leaf(String),
    Operator {
        op: Operator,
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExprTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    /// Subtrees still on the build stack when the tokens ran out
    roots: usize,
}

impl ExprTree {
    pub fn build<S: AsRef<str>>(tokens: &[S], notation: Notation) -> Self {
        let words: Vec<&str> = match notation {
            Notation::Postfix => tokens.iter().map(AsRef::as_ref).collect(),
            Notation::Prefix => tokens.iter().rev().map(AsRef::as_ref).collect(),
        };

        let mut nodes = Vec::with_capacity(words.len());
        let mut stack: Vec<NodeId> = Vec::new();

        for word in words {
            let node = match Operator::from_symbol(word) {
                Some(op) => {
                    let (left, right) = match notation {
                        Notation::Postfix => {
                            let right = stack.pop();
                            let left = stack.pop();
                            (left, right)
                        }
                        Notation::Prefix => {
                            let left = stack.pop();
                            let right = stack.pop();
                            (left, right)
                        }
                    };
                    Node::Operator { op, left, right }
                }
                None => Node::Leaf(word.to_string()),
            };
            nodes.push(node);
            stack.push(nodes.len() - 1);
        }

        let roots = stack.len();
        ExprTree {
            nodes,
            root: stack.pop(),
            roots,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Exactly one root and no operator missing a child
    pub fn is_complete(&self) -> bool {
        self.roots == 1
            && self.nodes.iter().all(|node| match node {
                Node::Leaf(_) => true,
                Node::Operator { left, right, .. } => left.is_some() && right.is_some(),
            })
    }

    /// Fully parenthesized infix form; empty for an empty tree
    pub fn render(&self) -> String {
        match self.root {
            Some(id) => self.render_node(Some(id)),
            None => String::new(),
        }
    }

    fn render_node(&self, id: Option<NodeId>) -> String {
        match id.and_then(|id| self.nodes.get(id)) {
            None => "undefined".to_string(),
            Some(Node::Leaf(text)) => text.clone(),
            Some(Node::Operator { op, left, right }) => format!(
                "({} {} {})",
                self.render_node(*left),
                op,
                self.render_node(*right)
            ),
        }
    }

    /// Recursive evaluation with the same per-step rounding as the reducer
    ///
    /// `None` for incomplete trees or unreadable literals.
    pub fn evaluate(&self) -> Option<f64> {
        if !self.is_complete() {
            return None;
        }
        self.evaluate_node(self.root?)
    }

    fn evaluate_node(&self, id: NodeId) -> Option<f64> {
        match self.nodes.get(id)? {
            Node::Leaf(text) => match Token::classify(text).ok()? {
                Token::Number { value, .. } => Some(value),
                Token::Operator(_) => None,
            },
            Node::Operator { op, left, right } => {
                let left = self.evaluate_node((*left)?)?;
                let right = self.evaluate_node((*right)?)?;
                Some(round4(op.apply(left, right)))
            }
        }
    }
}

/// Render `tokens` as a fully parenthesized infix string
pub fn to_infix<S: AsRef<str>>(tokens: &[S], notation: Notation) -> String {
    ExprTree::build(tokens, notation).render()
}
