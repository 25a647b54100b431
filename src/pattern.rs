use crate::util::Log;
use crate::{Dfa, Expression, Journal, Pattern, SyntaxTree};
use once_cell::unsync::OnceCell;
use std::fmt::{Display, Formatter};

impl Pattern {
    /// Create a pattern whose emitted symbol kind equals its name.
    pub fn new(name: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let emit = name.clone();
        Pattern::aliased(name, emit, source)
    }

    /// Create a pattern which emits symbols under another kind. The `let`
    /// keyword pattern, for example, emits `ID` typed symbols while keeping
    /// its own identity for duplicate detection.
    pub fn aliased(
        name: impl Into<String>,
        emit: impl Into<String>,
        source: impl Into<Vec<u8>>,
    ) -> Self {
        let name = name.into();
        let journal = Journal::new(format!("pattern '{}'", name));
        Self {
            name,
            emit: emit.into(),
            source: source.into(),
            tree: None,
            dfa: None,
            journal,
            log: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn emit(&self) -> &str {
        &self.emit
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// The minimized automaton, available once [build](Pattern::build) ran
    /// without faults.
    pub fn dfa(&self) -> Option<&Dfa> {
        self.dfa.as_ref()
    }

    /// The syntax tree of the source expression, kept for diagnostic
    /// renderings.
    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.tree.as_ref()
    }

    /// Set a log label to debug the pattern compilation.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.log
            .set(log)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    /// Run the compilation pipeline once: preprocess the source expression,
    /// evaluate the syntax tree, construct the automaton directly and
    /// minimize it. Faults of any stage end up in the pattern's journal and
    /// leave the automaton unset.
    pub fn build(&mut self) {
        if self.dfa.is_some() {
            return;
        }

        let mut expression = Expression::new(&self.source);
        expression.preprocess();
        if expression.journal.has_faults() {
            self.journal.absorb(expression.journal);
            self.log_outcome("preprocessing failed");
            return;
        }

        let tree = SyntaxTree::from_postfix(expression.atoms());
        if tree.journal.has_faults() {
            self.journal.absorb(tree.journal);
            self.log_outcome("tree evaluation failed");
            return;
        }

        if let Some(dfa) = Dfa::direct(&tree, &mut self.journal) {
            self.dfa = Some(dfa.minimize());
            self.log_outcome("compiled");
        } else {
            self.log_outcome("construction failed");
        }
        self.tree = Some(tree);
    }

    fn log_outcome(&self, _outcome: &str) {
        #[cfg(debug_assertions)]
        if let Some(log) = self.log.get() {
            if log.covers(&Log::Default(())) {
                println!("[{}; Pattern '{}']: {}", log, self.name, _outcome);
            }
        }
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.name, String::from_utf8_lossy(&self.source))
    }
}
