use crate::util::{Code, Log};
use crate::{Journal, MatchMode, Pattern, Scanner, Symbol};
use once_cell::unsync::OnceCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

impl Symbol {
    pub fn new(kind: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind: kind.into(),
            start,
            end,
        }
    }

    /// The spanned source bytes of this symbol.
    pub fn text<'c>(&self, code: &Code<'c>) -> &'c [u8] {
        &code.value[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Drop the symbols of the given kinds, keeping the order of the rest.
    pub fn discard(symbols: Vec<Symbol>, kinds: &[&str]) -> Vec<Symbol> {
        symbols
            .into_iter()
            .filter(|symbol| !kinds.contains(&symbol.kind.as_str()))
            .collect()
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("")
            .field(&self.kind)
            .field(&self.start)
            .field(&self.end)
            .finish()
    }
}

impl Scanner {
    /// Create a longest-match scanner over the given patterns. The pattern
    /// order is significant: it breaks ties between equal match lengths.
    pub fn new(patterns: Vec<Rc<Pattern>>) -> Self {
        Self {
            patterns,
            mode: MatchMode::Longest,
            journal: Journal::new("scanner"),
            log: OnceCell::new(),
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set a log label to debug the scanner.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.log
            .set(log)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    /// Split the input into symbols. Scanning stops at the first offset no
    /// pattern matches; stopping short of the end of the input records a
    /// lexical fault with the position and the remaining prefix.
    pub fn scan(&mut self, code: &Code) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        let mut cursor = 0;

        while cursor < code.value.len() {
            let rest = &code.value[cursor..];
            let mut winner: Option<(usize, usize)> = None;
            for (index, pattern) in self.patterns.iter().enumerate() {
                let dfa = match pattern.dfa() {
                    Some(dfa) => dfa,
                    None => continue,
                };
                let length = dfa.longest_match(rest);
                if length == 0 {
                    continue;
                }
                let better = match (self.mode, &winner) {
                    (_, None) => true,
                    (MatchMode::Longest, Some((_, best))) => length > *best,
                    (MatchMode::ShortestNonzero, Some((_, best))) => length < *best,
                };
                if better {
                    winner = Some((index, length));
                }
            }

            match winner {
                Some((index, length)) => {
                    let symbol =
                        Symbol::new(self.patterns[index].emit(), cursor, cursor + length);
                    self.log_symbol(code, &symbol, self.patterns[index].name());
                    symbols.push(symbol);
                    cursor += length;
                }
                None => break,
            }
        }

        if cursor < code.value.len() {
            let excerpt: String = String::from_utf8_lossy(&code.value[cursor..])
                .chars()
                .take(24)
                .collect();
            self.journal.record(
                format!(
                    "no pattern matches at {}",
                    code.obtain_position(cursor)
                ),
                format!("the remaining input '{}' is not tokenized", excerpt),
            );
        }
        symbols
    }

    fn log_symbol(&self, _code: &Code, _symbol: &Symbol, _pattern: &str) {
        #[cfg(debug_assertions)]
        if let Some(log) = self.log.get() {
            if log.covers(&Log::Verbose(())) {
                println!(
                    "[{}; Scanner]: '{}' matched {} at {}",
                    log,
                    _pattern,
                    _symbol,
                    _code.obtain_position(_symbol.start)
                );
            }
        }
    }
}
