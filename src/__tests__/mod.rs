mod artifact_test;
mod expression_test;
mod scanner_test;
mod tree_test;
mod util_test;

use crate::Pattern;
use std::rc::Rc;

pub fn compiled(name: &str, source: &str) -> Rc<Pattern> {
    let mut pattern = Pattern::new(name, source);
    pattern.build();
    assert!(
        !pattern.journal.has_faults(),
        "pattern '{}' failed: {:?}",
        name,
        pattern.journal.faults()
    );
    Rc::new(pattern)
}
