use crate::util::Code;
use crate::{meta, Bindings, Journal, MatchMode, Pattern, Scanner, Sequencer, Symbol, Template, Verb};
use std::rc::Rc;

impl Bindings {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, body)| body.as_slice())
    }

    /// Register or replace a binding, keeping the original insertion slot on
    /// replacement.
    pub fn insert(&mut self, name: impl Into<String>, body: Vec<u8>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = body,
            None => self.entries.push((name, body)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The bindings in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(name, body)| (name.as_str(), body.as_slice()))
    }
}

impl<'s> Sequencer<'s> {
    /// Create a sequencer over an already scanned symbol stream.
    /// `sub_patterns` is the pattern set expression bodies are re-scanned
    /// under; `extract` designates the sub-pattern whose matches are
    /// identifier references to be inlined.
    pub fn new(
        scope: &'static str,
        code: &'s Code<'s>,
        symbols: &'s [Symbol],
        template: Template,
        sub_patterns: Vec<Rc<Pattern>>,
        extract: Option<Rc<Pattern>>,
    ) -> Self {
        Self {
            code,
            symbols,
            template,
            sub_patterns,
            extract,
            current: None,
            bindings: Bindings::new(),
            reminders: Vec::new(),
            journal: Journal::new(scope),
        }
    }

    /// Walk the symbols against the template. A successful verb advances both
    /// cursors and the template wraps around; a failure advances the symbol
    /// cursor alone and resets the template, resynchronizing greedily.
    pub fn run(&mut self) {
        let mut symbol = 0;
        let mut step = 0;
        while symbol < self.symbols.len() {
            let verb = self.template[step].1;
            if verb == Verb::ExtractReminder {
                self.reminders = self.symbols[symbol..].to_vec();
                break;
            }
            let accepted = match verb {
                Verb::Match => self.matches(step, symbol),
                Verb::Exist => self.exists(step, symbol),
                Verb::Ident => self.ident(step, symbol),
                Verb::Value => self.value(step, symbol),
                Verb::ExtractReminder => false,
            };
            if accepted {
                symbol += 1;
                step += 1;
                if step >= self.template.len() {
                    step = 0;
                }
            } else {
                symbol += 1;
                step = 0;
            }
        }
    }

    fn exists(&self, step: usize, symbol: usize) -> bool {
        match &self.template[step].0 {
            Some(pattern) => pattern.emit() == self.symbols[symbol].kind,
            None => false,
        }
    }

    // Reserved word check: the symbol must also tokenize under the keyword
    // pattern itself.
    fn matches(&self, step: usize, symbol: usize) -> bool {
        if !self.exists(step, symbol) {
            return false;
        }
        let pattern = match &self.template[step].0 {
            Some(pattern) => pattern.clone(),
            None => return false,
        };
        let text = self.symbols[symbol].text(self.code);
        let nested = Code::new(text);
        let mut scanner = Scanner::new(vec![pattern]);
        !scanner.scan(&nested).is_empty()
    }

    fn ident(&mut self, step: usize, symbol: usize) -> bool {
        if !self.exists(step, symbol) {
            return false;
        }
        let name = String::from_utf8_lossy(self.symbols[symbol].text(self.code)).into_owned();
        if self.bindings.contains(&name) {
            self.journal.warn(
                format!("the identifier '{}' is defined more than once", name),
                "the last definition wins",
            );
        }
        self.bindings.insert(name.clone(), Vec::new());
        self.current = Some(name);
        true
    }

    fn value(&mut self, step: usize, symbol: usize) -> bool {
        if !self.exists(step, symbol) {
            return false;
        }
        let text = self.symbols[symbol].text(self.code);
        let body = self.splice(text);
        if let Some(name) = self.current.clone() {
            self.bindings.insert(name, body);
        }
        true
    }

    /// Re-scan an expression body under the sub-patterns with the shortest
    /// nonzero strategy and splice the pieces: identifier references are
    /// replaced by their bound bodies, quoted characters by their inner byte
    /// and everything else by its raw bytes. The nested scan is lenient, as
    /// the main scan already vouched for the symbol.
    fn splice(&mut self, text: &[u8]) -> Vec<u8> {
        let nested = Code::new(text);
        let mut scanner =
            Scanner::new(self.sub_patterns.clone()).with_mode(MatchMode::ShortestNonzero);
        let mut body = Vec::new();
        for sub in scanner.scan(&nested) {
            let piece = sub.text(&nested);
            let reference = self
                .extract
                .as_ref()
                .map_or(false, |extract| extract.emit() == sub.kind);
            if reference {
                let name = String::from_utf8_lossy(piece);
                match self.bindings.get(&name) {
                    Some(bound) => body.extend_from_slice(bound),
                    None => self.journal.record(
                        format!("'{}' is not defined", name),
                        "reference to an undefined identifier",
                    ),
                }
            } else if sub.kind == meta::CHAR && piece.len() >= 2 {
                body.push(piece[1]);
            } else {
                body.extend_from_slice(piece);
            }
        }
        body
    }

    /// Assemble the final rule expression from the reminder: whitespace
    /// symbols are dropped, every remaining symbol is re-scanned under the
    /// rule sub-patterns and identifier references are inlined from the
    /// given bindings. A reference without a binding is a fatal fault.
    pub fn assemble(&mut self, bindings: &Bindings) -> Vec<u8> {
        let sub_patterns = meta::rule_subpatterns();
        let mut assembled = Vec::new();
        for symbol in self.reminders.iter().filter(|s| s.kind != meta::WS) {
            let text = symbol.text(self.code);
            let nested = Code::new(text);
            let mut scanner =
                Scanner::new(sub_patterns.clone()).with_mode(MatchMode::ShortestNonzero);
            for sub in scanner.scan(&nested) {
                let piece = sub.text(&nested);
                if sub.kind == meta::WS {
                    continue;
                }
                if sub.kind == meta::ID {
                    let name = String::from_utf8_lossy(piece);
                    match bindings.get(&name) {
                        Some(bound) => assembled.extend_from_slice(bound),
                        None => self.journal.record(
                            format!("'{}' is not defined", name),
                            "rule references an undefined identifier",
                        ),
                    }
                } else if sub.kind == meta::CHAR && piece.len() >= 2 {
                    assembled.push(piece[1]);
                } else {
                    assembled.extend_from_slice(piece);
                }
            }
        }
        assembled
    }
}
