use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::core::ChangeScope;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "actions",
        "Review the approval inbox",
        "actions [list|resolve <subject-id>]",
        cmd_actions,
    )]
}

fn cmd_actions(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None => handle_list(context),
        Some((subcommand, rest)) => match subcommand.to_ascii_lowercase().as_str() {
            "list" => handle_list(context),
            "resolve" => handle_resolve(context, rest),
            other => Err(CommandError::InvalidArguments(format!(
                "unknown actions subcommand `{}`",
                other
            ))),
        },
    }
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    context.with_fund(|fund| {
        let open: Vec<_> = fund.open_action_items().collect();
        if open.is_empty() {
            io::print_info("Approval inbox is empty.");
            return Ok(());
        }
        io::print_info(format!("{} open action item(s):", open.len()));
        for item in open {
            io::print_info(format!(
                "  [{}] {} - {} (for {})",
                item.kind, item.subject_id, item.message, item.for_role
            ));
        }
        Ok(())
    })
}

fn handle_resolve(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let subject = args
        .first()
        .ok_or_else(|| {
            CommandError::InvalidArguments("usage: actions resolve <subject-id>".into())
        })?
        .to_string();
    context.mutate(ChangeScope::Actions, |fund| {
        fund.resolve_action_items(&subject);
        Ok(())
    })?;
    io::print_success(format!("Action items for {} resolved.", subject));
    Ok(())
}
