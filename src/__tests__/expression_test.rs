use crate::{Atom, Expression, Op};

fn postfix(source: &[u8]) -> Vec<Atom> {
    let mut expression = Expression::new(source);
    expression.preprocess();
    assert!(
        !expression.journal.has_faults(),
        "unexpected faults: {:?}",
        expression.journal.faults()
    );
    expression.atoms().to_vec()
}

fn faulted(source: &[u8]) -> Expression {
    let mut expression = Expression::new(source);
    expression.preprocess();
    assert!(
        expression.journal.has_faults(),
        "expected faults for {:?}",
        String::from_utf8_lossy(source)
    );
    expression
}

#[test]
fn codify_escapes_and_operators() {
    let expression = Expression::new(br"\n\t\sa*");
    assert_eq!(
        expression.atoms(),
        &[
            Atom::Byte(b'\n'),
            Atom::Byte(b'\t'),
            Atom::Byte(b' '),
            Atom::Byte(b'a'),
            Atom::Op(Op::KleeneStar),
        ]
    );
}

#[test]
fn codify_escaped_operator_is_literal() {
    let expression = Expression::new(br"\*\\");
    assert_eq!(
        expression.atoms(),
        &[Atom::Byte(b'*'), Atom::Byte(b'\\')]
    );
}

#[test]
fn codify_rejects_dangling_escape() {
    let expression = Expression::new(b"ab\\");
    assert!(expression.journal.has_faults());
}

#[test]
fn wildcard_expands_to_every_byte() {
    let atoms = postfix(b"_");
    let bytes = atoms
        .iter()
        .filter(|atom| matches!(atom, Atom::Byte(_)))
        .count();
    let ors = atoms
        .iter()
        .filter(|atom| matches!(atom, Atom::Op(Op::Or)))
        .count();
    assert_eq!(bytes, 256);
    assert_eq!(ors, 255);
}

#[test]
fn wildcard_composes_with_closures() {
    // The expansion is parenthesized, so the closure applies to the whole
    // alternation.
    let atoms = postfix(b"_+");
    assert_eq!(atoms.last(), Some(&Atom::Op(Op::OneOrMore)));
}

#[test]
fn balance_faults() {
    faulted(b"(a");
    faulted(b"a)");
    faulted(b"[a");
    faulted(b"'a");
    faulted(b"\"a");
}

#[test]
fn group_members_are_sorted_and_deduplicated() {
    let atoms = postfix(b"['c''a''b''a']");
    assert_eq!(
        atoms,
        vec![
            Atom::Byte(b'a'),
            Atom::Byte(b'b'),
            Atom::Op(Op::Or),
            Atom::Byte(b'c'),
            Atom::Op(Op::Or),
        ]
    );
}

#[test]
fn group_range_expands_inclusively() {
    let atoms = postfix(b"['0'-'9']");
    let bytes: Vec<u8> = atoms
        .iter()
        .filter_map(|atom| match atom {
            Atom::Byte(byte) => Some(*byte),
            Atom::Op(_) => None,
        })
        .collect();
    assert_eq!(bytes, (b'0'..=b'9').collect::<Vec<u8>>());
    let ors = atoms
        .iter()
        .filter(|atom| matches!(atom, Atom::Op(Op::Or)))
        .count();
    assert_eq!(ors, 9);
}

#[test]
fn group_range_works_unquoted() {
    assert_eq!(postfix(b"[0-9]"), postfix(b"['0'-'9']"));
}

#[test]
fn group_faults() {
    faulted(b"['9'-'0']");
    faulted(b"[]");
    faulted(b"['a'-]");
    faulted(b"[a*b]");
}

#[test]
fn orphan_range_marker_is_rejected() {
    faulted(b"a-b");
}

#[test]
fn concat_insertion_shapes() {
    assert_eq!(
        postfix(b"ab"),
        vec![Atom::Byte(b'a'), Atom::Byte(b'b'), Atom::Op(Op::Concat)]
    );
    assert_eq!(
        postfix(b"a|b"),
        vec![Atom::Byte(b'a'), Atom::Byte(b'b'), Atom::Op(Op::Or)]
    );
    assert_eq!(
        postfix(b"(a)(b)"),
        vec![Atom::Byte(b'a'), Atom::Byte(b'b'), Atom::Op(Op::Concat)]
    );
    assert_eq!(
        postfix(b"a*b"),
        vec![
            Atom::Byte(b'a'),
            Atom::Op(Op::KleeneStar),
            Atom::Byte(b'b'),
            Atom::Op(Op::Concat),
        ]
    );
}

#[test]
fn degenerate_inputs_pass_through() {
    assert_eq!(postfix(b""), vec![]);
    assert_eq!(postfix(b"a"), vec![Atom::Byte(b'a')]);
}

#[test]
fn shunting_yard_precedence() {
    // Alternation binds loosest, closures tightest.
    assert_eq!(
        postfix(b"ab|c"),
        vec![
            Atom::Byte(b'a'),
            Atom::Byte(b'b'),
            Atom::Op(Op::Concat),
            Atom::Byte(b'c'),
            Atom::Op(Op::Or),
        ]
    );
    assert_eq!(
        postfix(b"a|bc"),
        vec![
            Atom::Byte(b'a'),
            Atom::Byte(b'b'),
            Atom::Byte(b'c'),
            Atom::Op(Op::Concat),
            Atom::Op(Op::Or),
        ]
    );
    assert_eq!(
        postfix(b"(a|b)*"),
        vec![
            Atom::Byte(b'a'),
            Atom::Byte(b'b'),
            Atom::Op(Op::Or),
            Atom::Op(Op::KleeneStar),
        ]
    );
}

#[test]
fn quotes_resolve_to_literals() {
    assert_eq!(postfix(b"'a'"), vec![Atom::Byte(b'a')]);
    assert_eq!(postfix(b"'*'"), vec![Atom::Byte(b'*')]);
    assert_eq!(
        postfix(b"\"a*b\""),
        vec![
            Atom::Byte(b'a'),
            Atom::Byte(b'*'),
            Atom::Op(Op::Concat),
            Atom::Byte(b'b'),
            Atom::Op(Op::Concat),
        ]
    );
}

#[test]
fn quoted_space_denotes_the_space_byte() {
    assert_eq!(postfix(b"' '"), vec![Atom::Byte(b' ')]);
}
