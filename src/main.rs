use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use query_translator::ast::Group;
use query_translator::config::FilterSetConfig;
use query_translator::mongo_compiler::to_mongo;
use query_translator::mongo_parser::from_mongo;
use query_translator::sql_compiler::to_sql;
use query_translator::sql_parser::from_sql;

/// Load the filter catalogue, falling back to the built-in one.
fn load_catalogue() -> FilterSetConfig {
    match FilterSetConfig::from_json_file("filters.json") {
        Ok(config) => {
            println!("✅ loaded filter catalogue from filters.json");
            config
        }
        Err(e) => {
            println!("⚠️ {} — using the built-in catalogue", e);
            FilterSetConfig::default()
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  sql <where-clause>    decode WHERE text into a tree, re-encode both ways");
    println!("  mongo <json>          decode a query document into a tree");
    println!("  tree <json>           encode a tree (group JSON) to both forms");
    println!("  fields                list the filter catalogue");
    println!("  help                  this message");
    println!("  quit                  exit");
}

fn print_tree(group: &Group) -> Result<()> {
    println!("[tree]:\n{}", serde_json::to_string_pretty(group)?);
    println!("[sql]:   {}", to_sql(group));
    println!(
        "[mongo]: {}",
        serde_json::to_string_pretty(&to_mongo(group))?
    );
    Ok(())
}

fn handle_sql(input: &str) -> Result<()> {
    match from_sql(input) {
        Ok(group) => print_tree(&group)?,
        Err(e) => println!("✗ decode failed: {}", e),
    }
    Ok(())
}

fn handle_mongo(input: &str) -> Result<()> {
    match serde_json::from_str(input) {
        Ok(doc) => print_tree(&from_mongo(&doc))?,
        Err(e) => println!("✗ invalid JSON: {}", e),
    }
    Ok(())
}

fn handle_tree(input: &str) -> Result<()> {
    match serde_json::from_str::<Group>(input) {
        Ok(group) => print_tree(&group)?,
        Err(e) => println!("✗ not a filter group: {}", e),
    }
    Ok(())
}

fn main() -> Result<()> {
    println!("--- Query Translator: filter tree <-> SQL / query document ---");

    let catalogue = load_catalogue();
    println!("known fields:");
    for def in &catalogue.filters {
        println!(
            "  {} ({:?}, {} operators)",
            def.field,
            def.value_type,
            catalogue.operators_for(&def.field).len()
        );
    }
    println!("type 'help' for commands\n");

    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline("query> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match (command, rest.trim()) {
            ("quit", _) | ("exit", _) => break,
            ("help", _) => print_help(),
            ("fields", _) => {
                for def in &catalogue.filters {
                    println!("  {} — {} ({:?})", def.field, def.label, def.value_type);
                }
            }
            ("sql", input) if !input.is_empty() => handle_sql(input)?,
            ("mongo", input) if !input.is_empty() => handle_mongo(input)?,
            ("tree", input) if !input.is_empty() => handle_tree(input)?,
            _ => println!("✗ unknown command, type 'help'"),
        }
    }

    Ok(())
}
