//! Glint CLI
//!
//! Inspects rehydration blobs and the builtin type set.

use std::path::PathBuf;

use glint_types::Context;
use glintc::commands::{builtin_types, coercion_cost, dump_files};

fn main() {
    glintc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let ctx = Context::default();
    let command = &args[1];

    match command.as_str() {
        "dump" => {
            if args.len() < 3 {
                eprintln!("Usage: glintc dump <blob>...");
                std::process::exit(1);
            }
            let paths: Vec<PathBuf> = args[2..].iter().map(PathBuf::from).collect();
            let failed = dump_files(&ctx, &paths);
            if failed > 0 {
                std::process::exit(1);
            }
        }
        "cost" => {
            let [_, _, from, to] = &args[..] else {
                eprintln!("Usage: glintc cost <from-type> <to-type>");
                std::process::exit(1);
            };
            match coercion_cost(&ctx, from, to) {
                Ok(cost) => {
                    let possible = cost.is_possible(ctx.settings.allow_narrowing_conversions);
                    println!("{from} -> {to}: {cost:?} (implicit: {possible})");
                }
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            }
        }
        "types" => {
            for line in builtin_types(&ctx) {
                println!("{line}");
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("glintc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Glint front-end tools");
    println!();
    println!("Usage: glintc <command> [options]");
    println!();
    println!("Commands:");
    println!("  dump <blob>...       Rehydrate blobs and print their symbols and elements");
    println!("  cost <from> <to>     Show the coercion cost between two builtin types");
    println!("  types                List the builtin types");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=glint_rehydrate=debug) to trace decoding.");
}
