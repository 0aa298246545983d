use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::ui::style::format_header;

pub fn print_overview(registry: &CommandRegistry) {
    output::plain(format_header("Available commands"));
    let width = registry
        .names()
        .map(|name| name.len())
        .max()
        .unwrap_or(0);
    for entry in registry.list() {
        output::plain(format!(
            "  {:width$}  {}",
            entry.name,
            entry.description,
            width = width
        ));
    }
    output::plain("Use `help <command>` for usage details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::plain(format_header(&format!("Help: {}", entry.name)));
    output::plain(format!("  {}", entry.description));
    output::plain(format!("  usage: {}", entry.usage));
}
