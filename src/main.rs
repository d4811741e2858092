//! whistle-raven CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = whistle_raven::run() {
        eprintln!("error: {}", e.display_chain());
        std::process::exit(1);
    }
}
