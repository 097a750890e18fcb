//! Styled terminal output utilities.
//!
//! Progress goes to stdout, diagnostics to stderr.


use miette::Diagnostic;
use owo_colors::OwoColorize;

/// Print a success message
pub fn success(text: &str) {
    println!("{} {}", "✔".green().bold(), text.green());
}

/// Print an info message
pub fn info(text: &str) {
    println!("{} {}", "ℹ".blue().bold(), text);
}

/// Print one result row, unstyled
pub fn row(text: &str) {
    println!("{}", text);
}

/// Print an error message
pub fn error(text: &str) {
    eprintln!("{} {}", "✖".red().bold(), text.red());
}

/// Print an underlying cause of an error
pub fn cause(text: &str) {
    eprintln!("  {} {}", "caused by:".dimmed(), text);
}

/// Print a hint
pub fn hint(text: &str) {
    eprintln!("  {} {}", "help:".cyan(), text);
}

/// Print a diagnostic with its cause chain and help text
pub fn report(diagnostic: &dyn Diagnostic) {
    error(&capitalize(&diagnostic.to_string()));

    let mut source = diagnostic.source();
    while let Some(err) = source {
        cause(&err.to_string());
        source = err.source();
    }

    if let Some(help) = diagnostic.help() {
        hint(&help.to_string());
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
