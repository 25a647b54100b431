use crate::{Atom, Journal, NodeKind, Op, SyntaxTree, TreeNode};
use ptree::TreeItem;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Literal(b) if b.is_ascii_graphic() || *b == b' ' => {
                write!(f, "'{}'", *b as char)
            }
            NodeKind::Literal(b) => write!(f, "'\\x{:02x}'", b),
            NodeKind::Epsilon => write!(f, "epsilon"),
            NodeKind::EndMarker => write!(f, "#"),
            NodeKind::Or => write!(f, "|"),
            NodeKind::Concat => write!(f, "."),
            NodeKind::Star => write!(f, "*"),
        }
    }
}

impl TreeNode {
    pub fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            left: None,
            right: None,
            position: None,
            nullable: false,
            firstpos: BTreeSet::new(),
            lastpos: BTreeSet::new(),
        }
    }

    pub fn star(child: TreeNode) -> Self {
        let mut node = TreeNode::leaf(NodeKind::Star);
        node.left = Some(Box::new(child));
        node
    }

    pub fn or(left: TreeNode, right: TreeNode) -> Self {
        let mut node = TreeNode::leaf(NodeKind::Or);
        node.left = Some(Box::new(left));
        node.right = Some(Box::new(right));
        node
    }

    pub fn concat(left: TreeNode, right: TreeNode) -> Self {
        let mut node = TreeNode::leaf(NodeKind::Concat);
        node.left = Some(Box::new(left));
        node.right = Some(Box::new(right));
        node
    }
}

impl TreeItem for TreeNode {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self.position {
            Some(position) => write!(f, "{} # {}", self.kind, position),
            None => write!(f, "{}", self.kind),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        let mut children = Vec::new();
        if let Some(left) = &self.left {
            children.push(left.as_ref().clone());
        }
        if let Some(right) = &self.right {
            children.push(right.as_ref().clone());
        }
        Cow::from(children)
    }
}

impl SyntaxTree {
    /// Evaluate a postfix atom sequence into a tree with a stack. Literal
    /// bytes push leaves, closures pop one node and the binary operators pop
    /// the right operand first. The `+` closure duplicates its operand so
    /// that the two subtrees receive distinct positions later.
    pub fn from_postfix(postfix: &[Atom]) -> Self {
        let mut journal = Journal::new("syntax tree");
        let mut alphabet: BTreeSet<u8> = BTreeSet::new();
        let mut stack: Vec<TreeNode> = Vec::new();

        for atom in postfix {
            match atom {
                Atom::Byte(byte) => {
                    alphabet.insert(*byte);
                    stack.push(TreeNode::leaf(NodeKind::Literal(*byte)));
                }
                Atom::Op(Op::KleeneStar) => match stack.pop() {
                    Some(child) => stack.push(TreeNode::star(child)),
                    None => {
                        journal.record(
                            "there is no operand to apply the Kleene star to",
                            "invalid regular expression",
                        );
                        break;
                    }
                },
                Atom::Op(Op::ZeroOrOne) => match stack.pop() {
                    Some(child) => {
                        stack.push(TreeNode::or(child, TreeNode::leaf(NodeKind::Epsilon)))
                    }
                    None => {
                        journal.record(
                            "there is no operand to apply the zero or one to",
                            "invalid regular expression",
                        );
                        break;
                    }
                },
                Atom::Op(Op::OneOrMore) => match stack.pop() {
                    Some(child) => {
                        let copy = child.clone();
                        stack.push(TreeNode::concat(TreeNode::star(copy), child));
                    }
                    None => {
                        journal.record(
                            "there is no operand to apply the one or more to",
                            "invalid regular expression",
                        );
                        break;
                    }
                },
                Atom::Op(op @ (Op::Or | Op::Concat)) => {
                    let right = stack.pop();
                    let left = stack.pop();
                    match (left, right) {
                        (Some(left), Some(right)) if *op == Op::Or => {
                            stack.push(TreeNode::or(left, right))
                        }
                        (Some(left), Some(right)) => stack.push(TreeNode::concat(left, right)),
                        _ => {
                            journal.record(
                                format!("there are not enough operands to apply '{}' to", op),
                                "invalid regular expression",
                            );
                            break;
                        }
                    }
                }
                Atom::Op(op) => {
                    journal.record(
                        format!("the operator '{}' cannot appear in postfix form", op),
                        "invalid regular expression",
                    );
                    break;
                }
            }
        }

        let root = if journal.has_faults() {
            None
        } else if stack.len() == 1 {
            stack.pop()
        } else {
            journal.record(
                format!(
                    "the expression reduced to {} fragments instead of one",
                    stack.len()
                ),
                "invalid regular expression",
            );
            None
        };

        Self {
            root,
            alphabet: alphabet.into_iter().collect(),
            journal,
        }
    }
}
