use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use yalex::util::{parse_switch, Code};
use yalex::{artifact, meta, Expression, Pattern, Scanner, Sequencer, Symbol, SyntaxTree};

/// Compile a YAL lexical specification into minimized deterministic automata.
#[derive(Parser)]
#[command(name = "yalex", version)]
struct Cli {
    /// Path of the YAL specification file.
    spec_path: PathBuf,
    /// Directory receiving the diagnostic artifacts.
    artifact_dir: PathBuf,
    /// Whether to render a syntax tree for every let binding (yes/no).
    #[arg(value_parser = switch)]
    draw_subtrees: bool,
    /// Print the symbol table and per stage progress.
    #[arg(long)]
    verbose: bool,
}

fn switch(value: &str) -> Result<bool, String> {
    parse_switch(value).ok_or_else(|| format!("boolean value expected, got '{}'", value))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if run(&cli) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: &Cli) -> bool {
    let source = match fs::read(&cli.spec_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!(
                "error in input: cannot read '{}': {}",
                cli.spec_path.display(),
                err
            );
            return false;
        }
    };
    if source.is_empty() {
        eprintln!("error in input: the specification file is empty");
        return false;
    }
    let code = Code::new(&source);

    // Main scan of the specification under the fixed meta patterns.
    let mut scanner = Scanner::new(meta::spec_patterns());
    let symbols = scanner.scan(&code);
    if scanner.journal.has_faults() {
        scanner.journal.report();
        return false;
    }
    if cli.verbose {
        println!("tokenized {} symbols:", symbols.len());
        for (index, symbol) in symbols.iter().enumerate() {
            println!(
                "  [{}] {} '{}'",
                index,
                symbol,
                String::from_utf8_lossy(symbol.text(&code))
            );
        }
    }

    // Comments and return blocks carry no grammatical meaning for the
    // sequencer passes.
    let symbols = Symbol::discard(symbols, &[meta::COMMENT, meta::RETURN]);

    let mut lets = Sequencer::new(
        "let pass",
        &code,
        &symbols,
        meta::let_template(),
        meta::body_subpatterns(),
        Some(meta::identifier()),
    );
    lets.run();
    lets.journal.report();
    if lets.journal.has_faults() {
        return false;
    }
    println!("extracted {} let bindings", lets.bindings.len());

    if cli.draw_subtrees {
        if lets.bindings.is_empty() {
            println!("no binding subtrees to draw");
        } else {
            for (name, body) in lets.bindings.iter() {
                draw_binding(cli, name, body);
            }
        }
    } else {
        println!("subtree drawing skipped");
    }

    let mut rule = Sequencer::new(
        "rule pass",
        &code,
        &symbols,
        meta::rule_template(),
        Vec::new(),
        None,
    );
    rule.run();
    if rule.journal.has_faults() {
        rule.journal.report();
        return false;
    }
    if rule.reminders.is_empty() {
        eprintln!("error in rule pass: no rule is defined in the specification");
        return false;
    }

    let assembled = rule.assemble(&lets.bindings);
    if rule.journal.has_faults() {
        rule.journal.report();
        return false;
    }

    let rule_name = rule
        .bindings
        .iter()
        .next()
        .map(|(name, _)| name.to_owned())
        .unwrap_or_else(|| String::from("rule"));

    let mut compiled = Pattern::new(rule_name.clone(), assembled);
    compiled.build();
    if compiled.journal.has_faults() {
        compiled.journal.report();
        return false;
    }

    if let Some(tree) = compiled.tree() {
        write_artifact(artifact::write_tree(&cli.artifact_dir, &rule_name, tree));
    }
    match compiled.dfa() {
        Some(dfa) => {
            write_artifact(artifact::write_dfa(&cli.artifact_dir, &rule_name, dfa));
            println!(
                "rule '{}' compiled into a {} state automaton",
                rule_name, dfa.state_count
            );
            true
        }
        None => {
            eprintln!("error in compilation: rule '{}' produced no automaton", rule_name);
            false
        }
    }
}

fn draw_binding(cli: &Cli, name: &str, body: &[u8]) {
    let mut expression = Expression::new(body);
    expression.preprocess();
    if expression.journal.has_faults() {
        expression.journal.report();
        return;
    }
    let tree = SyntaxTree::from_postfix(expression.atoms());
    if tree.journal.has_faults() {
        tree.journal.report();
        return;
    }
    if cli.verbose {
        println!("drawing subtree of '{}'", name);
    }
    write_artifact(artifact::write_tree(&cli.artifact_dir, name, &tree));
}

fn write_artifact(result: std::io::Result<std::path::PathBuf>) {
    if let Err(err) = result {
        eprintln!("error in artifacts: {}", err);
    }
}
