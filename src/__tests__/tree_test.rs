use crate::{Atom, NodeKind, Op, SyntaxTree, TreeNode};

fn kind_of(node: &Option<Box<TreeNode>>) -> Option<NodeKind> {
    node.as_ref().map(|n| n.kind)
}

#[test]
fn concat_pops_right_operand_first() {
    let tree = SyntaxTree::from_postfix(&[
        Atom::Byte(b'a'),
        Atom::Byte(b'b'),
        Atom::Op(Op::Concat),
    ]);
    let root = tree.root.expect("tree");
    assert_eq!(root.kind, NodeKind::Concat);
    assert_eq!(kind_of(&root.left), Some(NodeKind::Literal(b'a')));
    assert_eq!(kind_of(&root.right), Some(NodeKind::Literal(b'b')));
}

#[test]
fn kleene_star_wraps_its_operand() {
    let tree = SyntaxTree::from_postfix(&[Atom::Byte(b'a'), Atom::Op(Op::KleeneStar)]);
    let root = tree.root.expect("tree");
    assert_eq!(root.kind, NodeKind::Star);
    assert_eq!(kind_of(&root.left), Some(NodeKind::Literal(b'a')));
    assert!(root.right.is_none());
}

#[test]
fn zero_or_one_becomes_alternation_with_epsilon() {
    let tree = SyntaxTree::from_postfix(&[Atom::Byte(b'a'), Atom::Op(Op::ZeroOrOne)]);
    let root = tree.root.expect("tree");
    assert_eq!(root.kind, NodeKind::Or);
    assert_eq!(kind_of(&root.left), Some(NodeKind::Literal(b'a')));
    assert_eq!(kind_of(&root.right), Some(NodeKind::Epsilon));
}

#[test]
fn one_or_more_expands_to_star_then_copy() {
    let tree = SyntaxTree::from_postfix(&[Atom::Byte(b'a'), Atom::Op(Op::OneOrMore)]);
    let root = tree.root.expect("tree");
    assert_eq!(root.kind, NodeKind::Concat);
    assert_eq!(kind_of(&root.left), Some(NodeKind::Star));
    assert_eq!(kind_of(&root.right), Some(NodeKind::Literal(b'a')));
}

#[test]
fn operand_underflow_is_a_fault() {
    assert!(SyntaxTree::from_postfix(&[Atom::Op(Op::KleeneStar)])
        .journal
        .has_faults());
    assert!(
        SyntaxTree::from_postfix(&[Atom::Byte(b'a'), Atom::Op(Op::Or)])
            .journal
            .has_faults()
    );
}

#[test]
fn leftover_fragments_are_a_fault() {
    let tree = SyntaxTree::from_postfix(&[Atom::Byte(b'a'), Atom::Byte(b'b')]);
    assert!(tree.journal.has_faults());
    assert!(tree.root.is_none());
}

#[test]
fn empty_postfix_is_a_fault() {
    assert!(SyntaxTree::from_postfix(&[]).journal.has_faults());
}

#[test]
fn stray_structural_operator_is_a_fault() {
    assert!(
        SyntaxTree::from_postfix(&[Atom::Byte(b'a'), Atom::Op(Op::Range)])
            .journal
            .has_faults()
    );
}

#[test]
fn alphabet_is_sorted_and_excludes_epsilon() {
    let tree = SyntaxTree::from_postfix(&[
        Atom::Byte(b'b'),
        Atom::Byte(b'a'),
        Atom::Op(Op::Concat),
        Atom::Op(Op::ZeroOrOne),
    ]);
    assert_eq!(tree.alphabet, vec![b'a', b'b']);
}
