use growfund_core::{ShareholderService, SummaryService};
use growfund_domain::ShareholderRole;

use crate::cli::core::{parse_date, CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::ui::{Table, TableRenderer, UiStyle};
use crate::core::ChangeScope;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "shareholder",
        "Register and manage fund members",
        "shareholder <register|list|show|edit|retire>",
        cmd_shareholder,
    )]
}

fn cmd_shareholder(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: shareholder <register|list|show|edit|retire>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "register" => handle_register(context, rest),
        "list" => handle_list(context),
        "show" => handle_show(context, rest),
        "edit" => handle_edit(context, rest),
        "retire" => handle_retire(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown shareholder subcommand `{}`",
            other
        ))),
    }
}

fn handle_register(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: shareholder register <name> <phone> <joined YYYY-MM-DD> [role] [email]".into(),
        ));
    }
    let name = args[0];
    let phone = args[1];
    let joined_on = parse_date(args[2])?;
    let role = match args.get(3) {
        Some(raw) => ShareholderRole::from_label(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "`{}` is not a role (member|treasurer|admin)",
                raw
            ))
        })?,
        None => ShareholderRole::Member,
    };
    let email = args.get(4).copied();

    let id = context.mutate(ChangeScope::Shareholders, |fund| {
        ShareholderService::register(fund, name, phone, email, joined_on, role)
    })?;
    io::print_success(format!("Shareholder `{}` registered as {}.", name, id));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    context.with_fund(|fund| {
        let report = SummaryService::shareholders_report(fund);
        if report.rows.is_empty() {
            io::print_warning("No shareholders registered yet.");
            return Ok(());
        }
        TableRenderer::render(&Table::from_report(&report), &UiStyle::detect());
        Ok(())
    })
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: shareholder show <id>".into()))?;
    context.with_fund(|fund| {
        let shareholder = fund
            .shareholder(id)
            .ok_or_else(|| CommandError::Command(format!("shareholder `{}` not found", id)))?;
        io::print_info(format!("{} {}", shareholder.id, shareholder.name));
        io::print_info(format!("Phone: {}", shareholder.phone));
        if let Some(email) = &shareholder.email {
            io::print_info(format!("Email: {}", email));
        }
        io::print_info(format!("Joined: {}", shareholder.joined_on));
        if let Some(exited) = shareholder.exited_on {
            io::print_info(format!("Exited: {}", exited));
        }
        io::print_info(format!("Shares: {:.2}", shareholder.share_balance));
        io::print_info(format!("Role: {}", shareholder.role));
        io::print_info(format!("Status: {}", shareholder.status));
        Ok(())
    })
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "usage: shareholder edit <id> <name|phone|email|role> <value>";
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(usage.into()));
    }
    let id = args[0];
    let field = args[1].to_ascii_lowercase();
    let value = args[2..].join(" ");

    let (mut name, mut phone, mut email, mut role) = (None, None, None, None);
    match field.as_str() {
        "name" => name = Some(value.as_str()),
        "phone" => phone = Some(value.as_str()),
        "email" => email = Some(value.as_str()),
        "role" => {
            role = Some(ShareholderRole::from_label(&value).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "`{}` is not a role (member|treasurer|admin)",
                    value
                ))
            })?)
        }
        _ => return Err(CommandError::InvalidArguments(usage.into())),
    }

    context.mutate(ChangeScope::Shareholders, |fund| {
        ShareholderService::edit(fund, id, name, phone, email, role)
    })?;
    io::print_success(format!("Shareholder `{}` updated.", id));
    Ok(())
}

fn handle_retire(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: shareholder retire <id> <exited YYYY-MM-DD>".into(),
        ));
    }
    let id = args[0].to_string();
    let exited_on = parse_date(args[1])?;
    context.mutate(ChangeScope::Shareholders, |fund| {
        ShareholderService::retire(fund, &id, exited_on)
    })?;
    io::print_success(format!("Shareholder `{}` retired.", id));
    Ok(())
}
