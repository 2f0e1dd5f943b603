//! Debug script to see what the frontend collects from a source file.
//!
//! Usage: `debug_parse [path/to/api.rs]`

use std::path::PathBuf;

use apigen_compiler::frontend::create_frontend;
use apigen_compiler::GeneratorConfig;

fn main() -> miette::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| GeneratorConfig::default().input);

    let source = std::fs::read_to_string(&path)
        .map_err(|e| miette::miette!("failed to read {}: {}", path.display(), e))?;

    let config = GeneratorConfig::default();
    let mut frontend = create_frontend(&config)?;
    let api = frontend.collect(&source, &path)?;

    println!("Parsed file: {} ({})", api.source_path.display(), frontend.language());
    for group in &api.groups {
        println!("\nGroup {}:", group.name);
        for handler in &group.handlers {
            let api = &handler.api;
            println!(
                "  {} -> {} (auth: {}, method: {}, async: {})",
                api.route,
                handler.handler_name(),
                api.requires_auth,
                if api.http_method.is_empty() { "any" } else { &api.http_method },
                handler.call.is_async
            );
            println!(
                "    params: {} (line {}, column {})",
                handler.params_type,
                handler.span.line(),
                handler.span.column()
            );
            for rule in &handler.rules {
                println!("      {:?}", rule);
            }
        }
    }

    Ok(())
}
