use crate::{Atom, Expression, Journal, Op};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

impl Op {
    /// The source byte this operator was codified from.
    pub fn byte(&self) -> u8 {
        match self {
            Op::LParen => b'(',
            Op::RParen => b')',
            Op::LBracket => b'[',
            Op::RBracket => b']',
            Op::Or => b'|',
            Op::KleeneStar => b'*',
            Op::OneOrMore => b'+',
            Op::ZeroOrOne => b'?',
            Op::Concat => b'\xB7',
            Op::Range => b'-',
            Op::SingleQuote => b'\'',
            Op::DoubleQuote => b'"',
        }
    }

    fn from_byte(byte: u8) -> Option<Op> {
        match byte {
            b'(' => Some(Op::LParen),
            b')' => Some(Op::RParen),
            b'[' => Some(Op::LBracket),
            b']' => Some(Op::RBracket),
            b'|' => Some(Op::Or),
            b'*' => Some(Op::KleeneStar),
            b'+' => Some(Op::OneOrMore),
            b'?' => Some(Op::ZeroOrOne),
            b'-' => Some(Op::Range),
            b'\'' => Some(Op::SingleQuote),
            b'"' => Some(Op::DoubleQuote),
            _ => None,
        }
    }

    /// Shunting yard precedence. Atoms rank above every operator so that an
    /// atom on the stack is flushed before any operator is pushed over it.
    fn precedence(&self) -> u8 {
        match self {
            Op::LParen => 1,
            Op::Or => 2,
            Op::Concat => 3,
            Op::KleeneStar | Op::OneOrMore | Op::ZeroOrOne => 4,
            _ => 6,
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Concat => write!(f, "."),
            other => write!(f, "{}", other.byte() as char),
        }
    }
}

impl Atom {
    fn precedence(&self) -> u8 {
        match self {
            Atom::Op(op) => op.precedence(),
            Atom::Byte(_) => 6,
        }
    }

    fn is(&self, op: Op) -> bool {
        matches!(self, Atom::Op(o) if *o == op)
    }

    /// The literal byte this atom stands for inside a quoted region, where
    /// structural characters lose their meaning.
    fn literal_byte(&self) -> u8 {
        match self {
            Atom::Op(op) => op.byte(),
            Atom::Byte(b) => *b,
        }
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Atom::Op(op) => write!(f, "{}", op),
            Atom::Byte(b) if b.is_ascii_graphic() || *b == b' ' => {
                write!(f, "{}", *b as char)
            }
            Atom::Byte(b) => write!(f, "\\x{:02x}", b),
        }
    }
}

// A collected member of a bracket group before expansion.
enum Piece {
    Byte(u8),
    Marker,
}

impl Expression {
    /// Codify a raw pattern into atoms. A backslash escapes the next byte:
    /// `\n`, `\t` and `\s` stand for newline, tab and space, any other `\x`
    /// stands for `x` itself. An unescaped `_` expands to the alternation of
    /// all 256 byte values.
    pub fn new(source: &[u8]) -> Self {
        let mut journal = Journal::new("expression");
        let mut atoms = Vec::with_capacity(source.len());
        let mut index = 0;
        while index < source.len() {
            let byte = source[index];
            if byte == b'\\' {
                index += 1;
                match source.get(index).copied() {
                    Some(b'n') => atoms.push(Atom::Byte(b'\n')),
                    Some(b't') => atoms.push(Atom::Byte(b'\t')),
                    Some(b's') => atoms.push(Atom::Byte(b' ')),
                    Some(escaped) => atoms.push(Atom::Byte(escaped)),
                    None => journal.record(
                        "the pattern ends with a dangling escape",
                        "pattern rejected",
                    ),
                }
            } else if byte == b'_' {
                atoms.push(Atom::Op(Op::LParen));
                for value in 0..=255u8 {
                    if value != 0 {
                        atoms.push(Atom::Op(Op::Or));
                    }
                    atoms.push(Atom::Byte(value));
                }
                atoms.push(Atom::Op(Op::RParen));
            } else if let Some(op) = Op::from_byte(byte) {
                atoms.push(Atom::Op(op));
            } else {
                atoms.push(Atom::Byte(byte));
            }
            index += 1;
        }
        Self { atoms, journal }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Run the full preprocessing pipeline, stopping at the first stage which
    /// records a fault. On success the atoms hold the postfix form of the
    /// pattern.
    pub fn preprocess(&mut self) {
        if self.journal.has_faults() {
            return;
        }
        if !self.check_balance() {
            self.journal.record(
                "the pattern has unbalanced parentheses, brackets or quotes",
                "pattern rejected",
            );
            return;
        }
        self.expand_groups();
        if self.journal.has_faults() {
            return;
        }
        self.resolve_quotes();
        if self.journal.has_faults() {
            return;
        }
        self.insert_concat();
        self.to_postfix();
    }

    /// Whether `(`/`)` and `[`/`]` nest and match and quotes come in pairs.
    fn check_balance(&self) -> bool {
        let mut parens: isize = 0;
        let mut brackets: isize = 0;
        let mut single = false;
        let mut double = false;
        for atom in &self.atoms {
            match atom {
                Atom::Op(Op::LParen) => parens += 1,
                Atom::Op(Op::RParen) => {
                    parens -= 1;
                    if parens < 0 {
                        return false;
                    }
                }
                Atom::Op(Op::LBracket) => brackets += 1,
                Atom::Op(Op::RBracket) => {
                    brackets -= 1;
                    if brackets < 0 {
                        return false;
                    }
                }
                Atom::Op(Op::SingleQuote) => single = !single,
                Atom::Op(Op::DoubleQuote) => double = !double,
                _ => {}
            }
        }
        parens == 0 && brackets == 0 && !single && !double
    }

    /// Replace every `[...]` group with a parenthesized alternation of its
    /// member bytes in ascending order. Quoted regions inside the group
    /// contribute their content literally; an unquoted `-` joins the two
    /// neighboring members into an inclusive range.
    fn expand_groups(&mut self) {
        let mut out = Vec::with_capacity(self.atoms.len());
        let mut index = 0;
        while index < self.atoms.len() {
            if !self.atoms[index].is(Op::LBracket) {
                out.push(self.atoms[index]);
                index += 1;
                continue;
            }
            index += 1;
            let mut pieces: Vec<Piece> = Vec::new();
            let mut closed = false;
            while index < self.atoms.len() {
                let atom = self.atoms[index];
                match atom {
                    Atom::Op(Op::RBracket) => {
                        closed = true;
                        break;
                    }
                    Atom::Op(quote @ (Op::SingleQuote | Op::DoubleQuote)) => {
                        index += 1;
                        while index < self.atoms.len() && !self.atoms[index].is(quote) {
                            pieces.push(Piece::Byte(self.atoms[index].literal_byte()));
                            index += 1;
                        }
                    }
                    Atom::Op(Op::Range) => pieces.push(Piece::Marker),
                    Atom::Op(op) => self.journal.record(
                        format!("unexpected operator '{}' inside a character group", op),
                        "pattern rejected",
                    ),
                    Atom::Byte(b) => pieces.push(Piece::Byte(b)),
                }
                index += 1;
            }
            if !closed {
                // Balance passed, so the closing bracket was swallowed by a
                // quoted region spanning it.
                self.journal
                    .record("a character group is not closed", "pattern rejected");
                return;
            }
            index += 1;
            let members = self.expand_members(&pieces);
            if self.journal.has_faults() {
                return;
            }
            out.push(Atom::Op(Op::LParen));
            for (nth, byte) in members.iter().enumerate() {
                if nth != 0 {
                    out.push(Atom::Op(Op::Or));
                }
                out.push(Atom::Byte(*byte));
            }
            out.push(Atom::Op(Op::RParen));
        }
        self.atoms = out;
    }

    fn expand_members(&mut self, pieces: &[Piece]) -> BTreeSet<u8> {
        let mut members = BTreeSet::new();
        for (index, piece) in pieces.iter().enumerate() {
            match piece {
                Piece::Byte(b) => {
                    members.insert(*b);
                }
                Piece::Marker => {
                    let lo = index
                        .checked_sub(1)
                        .and_then(|i| match pieces.get(i) {
                            Some(Piece::Byte(b)) => Some(*b),
                            _ => None,
                        });
                    let hi = match pieces.get(index + 1) {
                        Some(Piece::Byte(b)) => Some(*b),
                        _ => None,
                    };
                    match (lo, hi) {
                        (Some(lo), Some(hi)) if lo <= hi => {
                            members.extend(lo..=hi);
                        }
                        (Some(lo), Some(hi)) => self.journal.record(
                            format!(
                                "the range '{}'-'{}' is descending",
                                lo as char, hi as char
                            ),
                            "pattern rejected",
                        ),
                        _ => self.journal.record(
                            "a range marker is missing one of its operands",
                            "pattern rejected",
                        ),
                    }
                }
            }
        }
        if members.is_empty() && !self.journal.has_faults() {
            self.journal
                .record("a character group is empty", "pattern rejected");
        }
        members
    }

    /// Collapse the quoted regions left outside groups to their literal
    /// content. Single and double quotes behave identically. Any range
    /// marker still present afterwards has no group to belong to.
    fn resolve_quotes(&mut self) {
        let mut out = Vec::with_capacity(self.atoms.len());
        let mut index = 0;
        while index < self.atoms.len() {
            match self.atoms[index] {
                Atom::Op(quote @ (Op::SingleQuote | Op::DoubleQuote)) => {
                    index += 1;
                    while index < self.atoms.len() && !self.atoms[index].is(quote) {
                        out.push(Atom::Byte(self.atoms[index].literal_byte()));
                        index += 1;
                    }
                }
                atom => out.push(atom),
            }
            index += 1;
        }
        if out.iter().any(|a| a.is(Op::Range)) {
            self.journal.record(
                "a range marker appears outside a character group",
                "pattern rejected",
            );
        }
        self.atoms = out;
    }

    /// Insert an explicit concatenation operator between every adjacent pair
    /// that reads as a juxtaposition. Empty and single atom sequences pass
    /// through unchanged.
    fn insert_concat(&mut self) {
        if self.atoms.len() < 2 {
            return;
        }
        let mut out = Vec::with_capacity(self.atoms.len() * 2);
        for index in 0..self.atoms.len() - 1 {
            let first = self.atoms[index];
            let second = self.atoms[index + 1];
            out.push(first);
            if concatenates(&first, &second) {
                out.push(Atom::Op(Op::Concat));
            }
        }
        out.push(self.atoms[self.atoms.len() - 1]);
        self.atoms = out;
    }

    /// Shunting yard conversion to postfix. All operators are left
    /// associative; parentheses structure the output without appearing in it.
    fn to_postfix(&mut self) {
        let mut output = Vec::with_capacity(self.atoms.len());
        let mut stack: Vec<Atom> = Vec::new();
        for atom in self.atoms.drain(..) {
            match atom {
                Atom::Op(Op::LParen) => stack.push(atom),
                Atom::Op(Op::RParen) => {
                    while let Some(top) = stack.pop() {
                        if top.is(Op::LParen) {
                            break;
                        }
                        output.push(top);
                    }
                }
                _ => {
                    while stack
                        .last()
                        .map_or(false, |top| top.precedence() >= atom.precedence())
                    {
                        if let Some(top) = stack.pop() {
                            output.push(top);
                        }
                    }
                    stack.push(atom);
                }
            }
        }
        while let Some(top) = stack.pop() {
            if !top.is(Op::LParen) {
                output.push(top);
            }
        }
        self.atoms = output;
    }
}

fn concatenates(first: &Atom, second: &Atom) -> bool {
    !matches!(first, Atom::Op(Op::LParen | Op::Or))
        && !matches!(
            second,
            Atom::Op(Op::RParen | Op::Or | Op::KleeneStar | Op::OneOrMore | Op::ZeroOrOne)
        )
}
