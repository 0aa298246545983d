use growfund_core::{BorrowingService, SummaryService};

use crate::cli::core::{parse_amount, parse_date, CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::ui::{Table, TableRenderer, UiStyle};
use crate::core::ChangeScope;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "borrowing",
        "File, approve, and track borrowings",
        "borrowing <request|consent|approve|reject|disburse|list|show>",
        cmd_borrowing,
    )]
}

fn cmd_borrowing(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: borrowing <request|consent|approve|reject|disburse|list|show>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "request" => handle_request(context, rest),
        "consent" => handle_consent(context, rest),
        "approve" => handle_approve(context, rest),
        "reject" => handle_reject(context, rest),
        "disburse" => handle_disburse(context, rest),
        "list" => handle_list(context),
        "show" => handle_show(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown borrowing subcommand `{}`",
            other
        ))),
    }
}

fn handle_request(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: borrowing request <shareholder> <amount> [notes...]".into(),
        ));
    }
    let shareholder = args[0].to_string();
    let amount = parse_amount(args[1])?;
    let notes = if args.len() > 2 {
        Some(args[2..].join(" "))
    } else {
        None
    };
    let id = context.mutate(ChangeScope::Borrowings, |fund| {
        BorrowingService::request(fund, &shareholder, amount, notes.as_deref())
    })?;
    io::print_success(format!(
        "Borrowing {} requested by {} for {:.2}.",
        id, shareholder, amount
    ));
    Ok(())
}

fn handle_consent(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: borrowing consent <borrowing-id> <shareholder>".into(),
        ));
    }
    let borrowing = args[0].to_string();
    let shareholder = args[1].to_string();
    context.mutate(ChangeScope::Borrowings, |fund| {
        BorrowingService::consent(fund, &borrowing, &shareholder)
    })?;
    io::print_success(format!("{} consented to {}.", shareholder, borrowing));
    Ok(())
}

fn handle_approve(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: borrowing approve <borrowing-id> <approver> [amount]".into(),
        ));
    }
    let borrowing = args[0].to_string();
    let approver = args[1].to_string();
    let amount = match args.get(2) {
        Some(raw) => Some(parse_amount(raw)?),
        None => None,
    };
    let approved = context.mutate(ChangeScope::Borrowings, |fund| {
        BorrowingService::approve(fund, &borrowing, &approver, amount, None)
    })?;
    io::print_success(format!("Borrowing {} approved for {:.2}.", borrowing, approved));
    Ok(())
}

fn handle_reject(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: borrowing reject <borrowing-id> <actor>".into(),
        ));
    }
    let borrowing = args[0].to_string();
    let actor = args[1].to_string();
    context.mutate(ChangeScope::Borrowings, |fund| {
        BorrowingService::reject(fund, &borrowing, &actor)
    })?;
    io::print_success(format!("Borrowing {} rejected.", borrowing));
    Ok(())
}

fn handle_disburse(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: borrowing disburse <borrowing-id> <start YYYY-MM-DD> <due YYYY-MM-DD>".into(),
        ));
    }
    let borrowing = args[0].to_string();
    let started_on = parse_date(args[1])?;
    let due_on = parse_date(args[2])?;
    context.mutate(ChangeScope::Borrowings, |fund| {
        BorrowingService::disburse(fund, &borrowing, started_on, due_on)
    })?;
    io::print_success(format!(
        "Borrowing {} disbursed; repayment due {}.",
        borrowing, due_on
    ));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    context.with_fund(|fund| {
        let report = SummaryService::borrowings_report(fund);
        if report.rows.is_empty() {
            io::print_warning("No borrowings on record.");
            return Ok(());
        }
        TableRenderer::render(&Table::from_report(&report), &UiStyle::detect());
        Ok(())
    })
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: borrowing show <id>".into()))?;
    context.with_fund(|fund| {
        let borrowing = fund
            .borrowing(id)
            .ok_or_else(|| CommandError::Command(format!("borrowing `{}` not found", id)))?;
        io::print_info(format!("{} for {}", borrowing.id, borrowing.shareholder_id));
        io::print_info(format!("Requested: {:.2}", borrowing.requested_amount));
        match borrowing.approved_amount {
            Some(amount) => io::print_info(format!("Approved: {:.2}", amount)),
            None => io::print_info("Approved: (pending)"),
        }
        if let Some(started) = borrowing.started_on {
            io::print_info(format!("Started: {}", started));
        }
        if let Some(due) = borrowing.due_on {
            io::print_info(format!("Due: {}", due));
        }
        io::print_info(format!("Status: {}", borrowing.status));
        if !borrowing.consenting_ids.is_empty() {
            io::print_info(format!("Consents: {}", borrowing.consenting_ids.join(", ")));
        }
        if borrowing.status == growfund_domain::BorrowingStatus::Active {
            let outstanding = BorrowingService::outstanding(fund, &borrowing.id)
                .map_err(CommandError::from_core)?;
            io::print_info(format!("Outstanding: {:.2}", outstanding));
        }
        if let Some(notes) = &borrowing.notes {
            if !notes.trim().is_empty() {
                io::print_info(format!("Notes: {}", notes));
            }
        }
        Ok(())
    })
}
