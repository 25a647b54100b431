use super::compiled;
use crate::util::Code;
use crate::{MatchMode, Scanner, Symbol};

#[test]
fn longest_prefix_then_lexical_fault() {
    let letters = compiled("LETTERS", "['A'-'Z''a'-'z']+");
    let mut scanner = Scanner::new(vec![letters]);
    let code = Code::from("Hello1world");
    let symbols = scanner.scan(&code);

    assert_eq!(symbols.len(), 1);
    assert_eq!((symbols[0].start, symbols[0].end), (0, 5));
    assert_eq!(symbols[0].text(&code), b"Hello");
    assert!(scanner.journal.has_faults());
}

#[test]
fn full_scan_is_clean() {
    let letters = compiled("LETTERS", "['A'-'Z''a'-'z']+");
    let digits = compiled("DIGITS", "['0'-'9']+");
    let mut scanner = Scanner::new(vec![letters, digits]);
    let code = Code::from("Hello1world");
    let symbols = scanner.scan(&code);

    assert!(!scanner.journal.has_faults());
    assert_eq!(
        symbols
            .iter()
            .map(|s| (s.kind.as_str(), s.len()))
            .collect::<Vec<_>>(),
        vec![("LETTERS", 5), ("DIGITS", 1), ("LETTERS", 5)]
    );
}

#[test]
fn ties_go_to_the_earlier_pattern() {
    let narrow = compiled("NARROW", "['a'-'b']+");
    let wide = compiled("WIDE", "['a'-'z']+");

    let mut scanner = Scanner::new(vec![narrow.clone(), wide.clone()]);
    let symbols = scanner.scan(&Code::from("ab"));
    assert_eq!(symbols[0].kind, "NARROW");

    let mut scanner = Scanner::new(vec![wide, narrow]);
    let symbols = scanner.scan(&Code::from("ab"));
    assert_eq!(symbols[0].kind, "WIDE");
}

#[test]
fn longer_match_beats_earlier_pattern() {
    let single = compiled("SINGLE", "a");
    let run = compiled("RUN", "['a'-'z']+");
    let mut scanner = Scanner::new(vec![single, run]);
    let symbols = scanner.scan(&Code::from("abc"));
    assert_eq!(
        symbols
            .iter()
            .map(|s| s.kind.as_str())
            .collect::<Vec<_>>(),
        vec!["RUN"]
    );
}

#[test]
fn shortest_nonzero_prefers_the_smaller_match() {
    let single = compiled("SINGLE", "a");
    let run = compiled("RUN", "['a'-'z']+");
    let mut scanner =
        Scanner::new(vec![single, run]).with_mode(MatchMode::ShortestNonzero);
    let code = Code::from("abc");
    let symbols = scanner.scan(&code);
    assert_eq!(
        symbols
            .iter()
            .map(|s| (s.kind.as_str(), s.len()))
            .collect::<Vec<_>>(),
        vec![("SINGLE", 1), ("RUN", 2)]
    );
    assert!(!scanner.journal.has_faults());
}

#[test]
fn tokenization_is_deterministic() {
    let letters = compiled("LETTERS", "['a'-'z']+");
    let spaces = compiled("SPACES", r"( |['\t''\n'])+");
    let code = Code::from("one two\nthree");

    let mut first = Scanner::new(vec![letters.clone(), spaces.clone()]);
    let mut second = Scanner::new(vec![letters, spaces]);
    assert_eq!(first.scan(&code), second.scan(&code));
}

#[test]
fn empty_input_scans_to_nothing() {
    let letters = compiled("LETTERS", "['a'-'z']+");
    let mut scanner = Scanner::new(vec![letters]);
    let symbols = scanner.scan(&Code::from(""));
    assert!(symbols.is_empty());
    assert!(!scanner.journal.has_faults());
}

#[test]
fn discard_filters_by_kind() {
    let symbols = vec![
        Symbol::new("WS", 0, 1),
        Symbol::new("ID", 1, 3),
        Symbol::new("WS", 3, 4),
    ];
    let kept = Symbol::discard(symbols, &["WS"]);
    assert_eq!(kept, vec![Symbol::new("ID", 1, 3)]);
}
