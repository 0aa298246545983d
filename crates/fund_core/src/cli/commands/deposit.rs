use growfund_core::{DepositService, SummaryService};

use crate::cli::core::{parse_amount, parse_due_month, parse_mode, CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::ui::{Table, TableRenderer, UiStyle};
use crate::core::ChangeScope;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "deposit",
        "Record monthly deposits and manage late penalties",
        "deposit <record|list|waive>",
        cmd_deposit,
    )]
}

fn cmd_deposit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: deposit <record|list|waive>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "record" => handle_record(context, rest),
        "list" => handle_list(context, rest),
        "waive" => handle_waive(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown deposit subcommand `{}`",
            other
        ))),
    }
}

fn handle_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 5 {
        return Err(CommandError::InvalidArguments(
            "usage: deposit record <shareholder> <MMM-yyyy> <amount> <paid YYYY-MM-DD|today> <recorded-by> [mode]"
                .into(),
        ));
    }
    let shareholder = args[0].to_string();
    let due_month = parse_due_month(args[1])?;
    let amount = parse_amount(args[2])?;
    let paid_on = context.parse_date_arg(args[3])?;
    let recorded_by = args[4].to_string();
    let mode = parse_mode(args.get(5).copied())?;
    let rate = context.penalty_rate();

    let id = context.mutate(ChangeScope::Deposits, |fund| {
        DepositService::record(
            fund,
            &shareholder,
            due_month,
            amount,
            paid_on,
            mode,
            rate,
            &recorded_by,
        )
    })?;

    let (status, penalty) = context.with_fund(|fund| {
        let deposit = fund
            .deposits
            .iter()
            .find(|d| d.id == id)
            .expect("deposit just recorded should exist");
        Ok((deposit.status, deposit.penalty_due))
    })?;
    if penalty > 0.0 {
        io::print_success(format!(
            "Deposit {} recorded ({}, penalty due {:.2}).",
            id, status, penalty
        ));
    } else {
        io::print_success(format!("Deposit {} recorded ({}).", id, status));
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = args.first().map(|raw| raw.to_ascii_uppercase());
    context.with_fund(|fund| {
        let mut report = SummaryService::deposits_report(fund);
        if let Some(needle) = &filter {
            report.rows.retain(|row| row[1].eq_ignore_ascii_case(needle));
        }
        if report.rows.is_empty() {
            io::print_warning("No deposits recorded.");
            return Ok(());
        }
        TableRenderer::render(&Table::from_report(&report), &UiStyle::detect());
        Ok(())
    })
}

fn handle_waive(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: deposit waive <deposit-id>".into()))?
        .to_string();
    context.mutate(ChangeScope::Deposits, |fund| {
        DepositService::waive(fund, &id)
    })?;
    io::print_success(format!("Penalty waived on deposit {}.", id));
    Ok(())
}
