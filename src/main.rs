//! kitlabel CLI binary
//!
//! Minimal entrypoint; all logic lives in the library.

fn main() {
    // cli::run() prints everything, including errors
    if let Err(code) = kitlabel::cli::run() {
        std::process::exit(code.as_i32());
    }
}
