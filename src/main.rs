//! luapad - a multi-tab Lua script editor for the terminal

mod buffer;
mod config;
mod display;
mod editor;
mod error;
mod highlight;
mod input;
mod line;
mod palette;
mod tabs;
mod terminal;

use std::env;
use std::path::PathBuf;
use std::process;

use config::Config;
use editor::EditorState;
use error::Result;
use terminal::Terminal;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            _ => {}
        }
    }

    let config = Config::load();
    let terminal = Terminal::new()?;
    let mut editor = EditorState::new(terminal, config);

    // Open file if provided
    if args.len() > 1 && !args[1].starts_with('-') {
        let path = PathBuf::from(&args[1]);
        if path.exists() {
            editor.open_file(&path)?;
        } else {
            editor.adopt_new_file(&path);
        }
    }

    editor.run()?;

    Ok(())
}

fn print_usage() {
    println!("luapad {} - Lua script editor for the terminal", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: luapad [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Key bindings:");
    println!("  Ctrl-N         New tab");
    println!("  Ctrl-W         Close tab");
    println!("  Ctrl-T         Next tab");
    println!("  Ctrl-O         Open file");
    println!("  Ctrl-S         Save file");
    println!("  Ctrl-L         Clear script");
    println!("  Ctrl-Q         Quit");
    println!("  F5             Execute script (placeholder)");
    println!("  F6             Attach to process (placeholder)");
    println!("  F7             Kill script (placeholder)");
    println!("  F8             Cycle color theme");
}

fn print_version() {
    println!("luapad {}", env!("CARGO_PKG_VERSION"));
}
