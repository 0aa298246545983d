use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show, change, and back up CLI configuration",
        "config <show|set <key> <value>|backup [note]|backups|restore <ref>>",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None => context.show_config(),
        Some((subcommand, rest)) => match subcommand.to_ascii_lowercase().as_str() {
            "show" => context.show_config(),
            "set" => {
                if rest.len() < 2 {
                    return Err(CommandError::InvalidArguments(
                        "usage: config set <key> <value>".into(),
                    ));
                }
                let value = rest[1..].join(" ");
                context.set_config_value(rest[0], &value)
            }
            "backup" => handle_backup(context, rest),
            "backups" => handle_backups(context),
            "restore" => handle_restore(context, rest),
            other => Err(CommandError::InvalidArguments(format!(
                "unknown config subcommand `{}`",
                other
            ))),
        },
    }
}

fn handle_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };
    let name = context
        .config_manager
        .backup(&context.config, note.as_deref())
        .map_err(|err| CommandError::Command(err.to_string()))?;
    io::print_success(format!("Configuration backup saved: {}", name));
    Ok(())
}

fn handle_backups(context: &mut ShellContext) -> CommandResult {
    let backups = context
        .config_manager
        .list_backups()
        .map_err(|err| CommandError::Command(err.to_string()))?;
    if backups.is_empty() {
        io::print_warning("No configuration backups found.");
        return Ok(());
    }
    io::print_info("Available configuration backups:");
    for (idx, name) in backups.iter().enumerate() {
        io::print_info(format!("  {:>2}. {}", idx + 1, name));
    }
    Ok(())
}

fn handle_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: config restore <backup-ref>".into())
    })?;
    let backups = context
        .config_manager
        .list_backups()
        .map_err(|err| CommandError::Command(err.to_string()))?;
    if backups.is_empty() {
        return Err(CommandError::InvalidArguments(
            "no configuration backups available".into(),
        ));
    }
    let target = if let Ok(index_raw) = reference.parse::<usize>() {
        backups
            .get(index_raw.saturating_sub(1))
            .cloned()
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "configuration backup index {} out of range",
                    reference
                ))
            })?
    } else {
        backups
            .iter()
            .find(|candidate| candidate.contains(reference))
            .cloned()
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "no configuration backup matches reference `{}`",
                    reference
                ))
            })?
    };
    let restored = context
        .config_manager
        .restore(&target)
        .map_err(|err| CommandError::Command(err.to_string()))?;
    context.config = restored;
    context.persist_config()?;
    crate::cli::io::apply_config(&context.config);
    io::print_success(format!("Configuration restored from `{}`.", target));
    Ok(())
}
