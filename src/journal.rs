use crate::{Fault, Journal};
use std::fmt::{Display, Formatter};

impl Fault {
    pub fn new(message: impl Into<String>, consequence: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            consequence: consequence.into(),
        }
    }
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.consequence)
    }
}

impl Journal {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            faults: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Record a fault. The owning stage is failed from this point on.
    pub fn record(&mut self, message: impl Into<String>, consequence: impl Into<String>) {
        self.faults.push(Fault::new(message, consequence));
    }

    /// Record a warning. Warnings are reported but never fail the stage.
    pub fn warn(&mut self, message: impl Into<String>, consequence: impl Into<String>) {
        self.warnings.push(Fault::new(message, consequence));
    }

    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }

    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    pub fn warnings(&self) -> &[Fault] {
        &self.warnings
    }

    /// Move another stage's entries into this journal, keeping the origin
    /// scope in the message.
    pub fn absorb(&mut self, other: Journal) {
        for fault in other.faults {
            self.faults.push(Fault::new(
                format!("{}: {}", other.scope, fault.message),
                fault.consequence,
            ));
        }
        for warning in other.warnings {
            self.warnings.push(Fault::new(
                format!("{}: {}", other.scope, warning.message),
                warning.consequence,
            ));
        }
    }

    /// Print every recorded entry to standard error, prefixed with the stage
    /// scope.
    pub fn report(&self) {
        for fault in &self.faults {
            eprintln!("error in {}: {}", self.scope, fault);
        }
        for warning in &self.warnings {
            eprintln!("warning in {}: {}", self.scope, warning);
        }
    }
}

impl Display for Journal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {} faults", self.scope, self.faults.len())?;
        for fault in &self.faults {
            writeln!(f, "  {}", fault)?;
        }
        Ok(())
    }
}
