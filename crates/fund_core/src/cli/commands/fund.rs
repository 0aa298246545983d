use std::path::Path;

use growfund_core::SummaryService;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CliMode, ShellContext};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "fund",
        "Create, load, save, and inspect fund books",
        "fund <new|load|load-path|save|save-as|list|backup|backups|restore|status>",
        cmd_fund,
    )]
}

fn cmd_fund(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: fund <new|load|load-path|save|save-as|list|backup|backups|restore|status>"
                .into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "new" => handle_new(context, rest),
        "load" => handle_load(context, rest),
        "load-path" => handle_load_path(context, rest),
        "save" => context.save_current_fund(),
        "save-as" => handle_save_as(context, rest),
        "list" => handle_list(context),
        "backup" => handle_backup(context, rest),
        "backups" => handle_backups(context, rest),
        "restore" => handle_restore(context, rest),
        "status" => handle_status(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown fund subcommand `{}`",
            other
        ))),
    }
}

fn handle_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = if args.is_empty() {
        if context.mode() != CliMode::Interactive {
            return Err(CommandError::InvalidArguments("usage: fund new <name>".into()));
        }
        let input = io::prompt_text(&context.theme, "Fund name")?;
        let trimmed = input.trim().to_string();
        if trimmed.is_empty() {
            return Err(CommandError::InvalidArguments("name cannot be empty".into()));
        }
        trimmed
    } else {
        args.join(" ")
    };
    context.new_fund(&name)
}

fn handle_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: fund load <name>".into()))?;
    context.load_named_fund(name)
}

fn handle_load_path(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: fund load-path <path>".into()))?;
    context.load_fund_path(Path::new(path))
}

fn handle_save_as(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: fund save-as <name>".into()))?;
    context.save_named_fund(name)
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let funds = context
        .manager
        .list_funds()
        .map_err(CommandError::from_core)?;
    if funds.is_empty() {
        io::print_warning("No funds saved yet.");
        return Ok(());
    }
    io::print_info("Saved funds:");
    for name in funds {
        io::print_info(format!("  {}", name));
    }
    Ok(())
}

fn handle_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };
    context.create_backup(note.as_deref())
}

fn handle_backups(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = match args.first() {
        Some(name) => name.to_string(),
        None => context.require_named_fund()?,
    };
    context.list_backups(&name)
}

fn handle_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (reference, name) = match args {
        [reference] => (reference.to_string(), context.require_named_fund()?),
        [reference, name] => (reference.to_string(), name.to_string()),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: fund restore <backup-ref> [name]".into(),
            ))
        }
    };
    context.restore_backup(&name, &reference)
}

fn handle_status(context: &mut ShellContext) -> CommandResult {
    let summary = context.with_fund(|fund| Ok(SummaryService::summarize(fund)))?;
    let name = context
        .manager
        .current_name()
        .unwrap_or("(unnamed)")
        .to_string();
    io::print_info(format!("Fund: {}", name));
    if let Some(path) = context.manager.current_path() {
        io::print_info(format!("Path: {}", path.display()));
    }
    io::print_info(format!(
        "Shareholders: {} ({} active)",
        summary.shareholders_total, summary.shareholders_active
    ));
    io::print_info(format!("Share balance: {:.2}", summary.share_balance_total));
    io::print_info(format!("Deposits collected: {:.2}", summary.deposits_total));
    io::print_info(format!("Penalties levied: {:.2}", summary.penalties_total));
    io::print_info(format!(
        "Borrowings open: {} (outstanding {:.2})",
        summary.borrowings_open, summary.outstanding_total
    ));
    io::print_info(format!(
        "Repayments pending approval: {}",
        summary.repayments_pending
    ));
    io::print_info(format!(
        "Investments open: {} (invested {:.2})",
        summary.investments_open, summary.invested_total
    ));
    io::print_info(format!("Action items open: {}", summary.action_items_open));
    Ok(())
}
