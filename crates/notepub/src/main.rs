//! notepub CLI binary
//!
//! Decides whether a documentation workspace needs a fresh publish run by
//! fingerprinting vault content, and skips the external publish pipeline
//! on a cache hit. Emits a `was-published` flag either way.

// CLI binary reports results and errors on stdout/stderr by design.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use notepub::cli::{self, EXIT_FAILURE, EXIT_OK, CliError, exit_code_for, render_error};
use notepub::tracing::{TracingConfig, init_tracing};
use notepub::{output, run};

fn main() {
    std::process::exit(real_main());
}

fn real_main() -> i32 {
    let cli = cli::parse();

    let tracing_config = TracingConfig {
        format: cli.format,
        level: cli.level.into(),
    };
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Failed to initialize tracing: {e}");
        return EXIT_FAILURE;
    }

    match run(&cli) {
        Ok(outcome) => {
            if let Err(e) = output::emit_was_published(outcome.was_published) {
                render_error(CliError::Output {
                    message: e.to_string(),
                });
                return EXIT_FAILURE;
            }
            EXIT_OK
        }
        Err(error) => {
            let code = exit_code_for(&error);
            render_error(error);
            code
        }
    }
}
