//! The fixed patterns which tokenize a YAL specification file, and the
//! templates the sequencer matches over the produced symbols.
//!
//! The main scan order is `COMMENT, WS, ID, EQ, EXPR, RETURN`. `EXPR`
//! deliberately excludes the bare space byte: keywords, identifiers and `=`
//! then tie with `EXPR` on their own lexemes and win by insertion order,
//! while expression bodies still admit spaces in quoted form through the
//! `' '` and `" "` alternatives.

use crate::{Pattern, Template, Verb};
use std::rc::Rc;

pub const COMMENT: &str = "COMMENT";
pub const WS: &str = "WS";
pub const ID: &str = "ID";
pub const EQ: &str = "EQ";
pub const EXPR: &str = "EXPR";
pub const RETURN: &str = "RETURN";
pub const OPERATOR: &str = "OPERATOR";
pub const GROUP: &str = "GROUP";
pub const CHAR: &str = "CHAR";

fn compiled(mut pattern: Pattern) -> Rc<Pattern> {
    pattern.build();
    debug_assert!(
        !pattern.journal.has_faults(),
        "meta pattern '{}' failed to compile",
        pattern.name()
    );
    Rc::new(pattern)
}

/// A comment: `(*` ... `*)` over letters, digits, separators and the
/// accented vowels (which arrive as UTF-8 byte pairs).
pub fn comment() -> Rc<Pattern> {
    compiled(Pattern::new(
        COMMENT,
        r"\(\*(['A'-'Z''a'-'z''0'-'9']|\t| |,|\.|\-|(á|é|í|ó|ú))*\*\)",
    ))
}

/// Whitespace: spaces, tabs and newlines.
pub fn whitespace() -> Rc<Pattern> {
    compiled(Pattern::new(WS, r"( |['\t''\n'])+"))
}

/// An identifier: one or more lowercase letters.
pub fn identifier() -> Rc<Pattern> {
    compiled(Pattern::new(ID, r"['a'-'z']+"))
}

/// The binding equals sign.
pub fn equals_sign() -> Rc<Pattern> {
    compiled(Pattern::new(EQ, "="))
}

/// A run of expression bytes. The bare space is excluded on purpose; quoted
/// spaces are readmitted as three byte alternatives.
pub fn expression() -> Rc<Pattern> {
    compiled(Pattern::new(
        EXPR,
        r#"(['A'-'Z''a'-'z''0'-'9']|\'\s\'|\"\s\"|\'|\"|\-|\||\(|\)|\[|\]|\+|\*|\?|.|\\|/|\_|:|=|;|<)+"#,
    ))
}

/// A return block: `{` ... `}`.
pub fn return_block() -> Rc<Pattern> {
    compiled(Pattern::new(RETURN, r"\{(['A'-'Z''a'-'z']| )*\}"))
}

/// The `let` keyword. Lexically an identifier, hence the aliased `ID` kind.
pub fn let_keyword() -> Rc<Pattern> {
    compiled(Pattern::aliased("let", ID, "let"))
}

/// The `rule` keyword, aliased like [let_keyword].
pub fn rule_keyword() -> Rc<Pattern> {
    compiled(Pattern::aliased("rule", ID, "rule"))
}

/// A single expression operator byte.
pub fn operator() -> Rc<Pattern> {
    compiled(Pattern::new(OPERATOR, r"(\(|\)|\+|\*|\||.|\?|\_)"))
}

/// A bracketed character group, quotes and ranges included.
pub fn group() -> Rc<Pattern> {
    compiled(Pattern::new(
        GROUP,
        r#"\[(['A'-'Z''a'-'z''0'-'9'' ']|\'|\"|\\|\-|\+)+\]"#,
    ))
}

/// A quoted single character.
pub fn quoted_char() -> Rc<Pattern> {
    compiled(Pattern::new(CHAR, r#"\'['A'-'Z''a'-'z''0'-'9'' ']\'"#))
}

/// The ordered pattern set of the main specification scan.
pub fn spec_patterns() -> Vec<Rc<Pattern>> {
    vec![
        comment(),
        whitespace(),
        identifier(),
        equals_sign(),
        expression(),
        return_block(),
    ]
}

/// The sub-patterns a `let` body is re-scanned under when inlining.
pub fn body_subpatterns() -> Vec<Rc<Pattern>> {
    vec![identifier(), operator(), group(), quoted_char()]
}

/// The sub-patterns the rule reminder is re-scanned under. Whitespace is
/// recognized here only to be dropped during assembly.
pub fn rule_subpatterns() -> Vec<Rc<Pattern>> {
    vec![
        whitespace(),
        identifier(),
        operator(),
        group(),
        quoted_char(),
    ]
}

/// The template of a `let` clause: `let WS ID WS = WS EXPR`, repeated over
/// the whole file by the wrap-around of the sequencer.
pub fn let_template() -> Template {
    let ws = whitespace();
    vec![
        (Some(let_keyword()), Verb::Match),
        (Some(ws.clone()), Verb::Exist),
        (Some(identifier()), Verb::Ident),
        (Some(ws.clone()), Verb::Exist),
        (Some(equals_sign()), Verb::Exist),
        (Some(ws), Verb::Exist),
        (Some(expression()), Verb::Value),
    ]
}

/// The template of the `rule` clause: `rule WS ID WS =` followed by the
/// reminder, which captures the rule body.
pub fn rule_template() -> Template {
    let ws = whitespace();
    vec![
        (Some(rule_keyword()), Verb::Match),
        (Some(ws.clone()), Verb::Exist),
        (Some(identifier()), Verb::Ident),
        (Some(ws), Verb::Exist),
        (Some(equals_sign()), Verb::Exist),
        (None, Verb::ExtractReminder),
    ]
}
