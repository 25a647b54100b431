//! Diagnostic artifacts: syntax tree renderings and DFA tables written into
//! the artifact directory.

use crate::{Dfa, SyntaxTree};
use serde_json::json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Render the syntax tree of a compiled expression to
/// `<dir>/<name>_ast.txt`.
pub fn write_tree(dir: &Path, name: &str, tree: &SyntaxTree) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_ast.txt", name));
    let mut file = fs::File::create(&path)?;
    if let Some(root) = &tree.root {
        ptree::write_tree(root, &mut file)?;
    }
    Ok(path)
}

/// Dump the automaton table to `<dir>/<name>_dfa.json`.
pub fn write_dfa(dir: &Path, name: &str, dfa: &Dfa) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_dfa.json", name));
    let transitions: Vec<_> = dfa
        .transitions
        .iter()
        .map(|((from, byte), to)| json!({ "from": from, "byte": byte, "to": to }))
        .collect();
    let table = json!({
        "initial": dfa.initial,
        "states": dfa.state_count,
        "accepting": dfa.accepting.iter().collect::<Vec<_>>(),
        "alphabet": dfa.alphabet,
        "transitions": transitions,
    });
    let rendered = serde_json::to_string_pretty(&table)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    fs::write(&path, rendered)?;
    Ok(path)
}
