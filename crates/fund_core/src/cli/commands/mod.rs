pub mod actions;
pub mod borrowing;
pub mod config;
pub mod deposit;
pub mod fund;
pub mod investment;
pub mod penalty;
pub mod repayment;
pub mod report;
pub mod shareholder;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "fund",
    "shareholder",
    "deposit",
    "borrowing",
    "repayment",
    "penalty",
    "investment",
    "actions",
    "report",
    "config",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(fund::definitions());
    commands.extend(shareholder::definitions());
    commands.extend(deposit::definitions());
    commands.extend(borrowing::definitions());
    commands.extend(repayment::definitions());
    commands.extend(penalty::definitions());
    commands.extend(investment::definitions());
    commands.extend(actions::definitions());
    commands.extend(report::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}
