use crate::artifact;
use crate::Pattern;
use serde_json::Value;
use std::fs;

#[test]
fn tree_and_dfa_artifacts_are_written() {
    let dir = tempfile::tempdir().expect("temp dir");

    let mut pattern = Pattern::new("digits", "['0'-'9']+");
    pattern.build();
    let tree = pattern.tree().expect("tree");
    let dfa = pattern.dfa().expect("automaton");

    let tree_path = artifact::write_tree(dir.path(), "digits", tree).expect("tree artifact");
    let dfa_path = artifact::write_dfa(dir.path(), "digits", dfa).expect("dfa artifact");

    assert!(tree_path.ends_with("digits_ast.txt"));
    let rendered = fs::read_to_string(&tree_path).expect("readable");
    assert!(!rendered.is_empty());

    let table: Value =
        serde_json::from_str(&fs::read_to_string(&dfa_path).expect("readable")).expect("json");
    assert_eq!(table["initial"], 0);
    assert_eq!(table["states"], 2);
    assert_eq!(table["alphabet"].as_array().map(|a| a.len()), Some(10));
    assert!(table["transitions"].as_array().is_some());
}

#[test]
fn the_directory_is_created_on_demand() {
    let dir = tempfile::tempdir().expect("temp dir");
    let nested = dir.path().join("deep").join("er");

    let mut pattern = Pattern::new("x", "x");
    pattern.build();
    let path = artifact::write_dfa(&nested, "x", pattern.dfa().expect("automaton"))
        .expect("dfa artifact");
    assert!(path.exists());
}
