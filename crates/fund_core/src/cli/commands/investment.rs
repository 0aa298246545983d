use growfund_core::{InvestmentService, SummaryService};

use crate::cli::core::{parse_amount, parse_date, CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::ui::{Table, TableRenderer, UiStyle};
use crate::core::ChangeScope;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "investment",
        "Record fund investments and their realized returns",
        "investment <record|close|list>",
        cmd_investment,
    )]
}

fn cmd_investment(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: investment <record|close|list>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "record" => handle_record(context, rest),
        "close" => handle_close(context, rest),
        "list" => handle_list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown investment subcommand `{}`",
            other
        ))),
    }
}

fn handle_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 6 {
        return Err(CommandError::InvalidArguments(
            "usage: investment record <title> <amount> <invested YYYY-MM-DD> <expected-return YYYY-MM-DD> <expected-%> <recorded-by> [notes...]"
                .into(),
        ));
    }
    let title = args[0].to_string();
    let amount = parse_amount(args[1])?;
    let invested_on = parse_date(args[2])?;
    let expected_return_on = parse_date(args[3])?;
    let expected_percent = parse_amount(args[4])?;
    let recorded_by = args[5].to_string();
    let notes = if args.len() > 6 {
        Some(args[6..].join(" "))
    } else {
        None
    };

    let id = context.mutate(ChangeScope::Investments, |fund| {
        InvestmentService::record(
            fund,
            &title,
            amount,
            invested_on,
            expected_return_on,
            expected_percent,
            &recorded_by,
            notes.as_deref(),
        )
    })?;
    io::print_success(format!("Investment {} recorded.", id));
    Ok(())
}

fn handle_close(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: investment close <id> <returned YYYY-MM-DD> <amount-returned>".into(),
        ));
    }
    let id = args[0].to_string();
    let returned_on = parse_date(args[1])?;
    let amount_returned = parse_amount(args[2])?;

    context.mutate(ChangeScope::Investments, |fund| {
        InvestmentService::close(fund, &id, returned_on, amount_returned)
    })?;

    context.with_fund(|fund| {
        let investment = fund
            .investments
            .iter()
            .find(|i| i.id.eq_ignore_ascii_case(&id))
            .expect("investment just closed should exist");
        if let Some(ret) = &investment.returns {
            io::print_success(format!(
                "Investment {} closed: actual {:.2}% (variance {:+.2}%).",
                investment.id, ret.actual_return_percent, ret.variance_percent
            ));
        }
        Ok(())
    })
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    context.with_fund(|fund| {
        let report = SummaryService::investments_report(fund);
        if report.rows.is_empty() {
            io::print_warning("No investments on record.");
            return Ok(());
        }
        TableRenderer::render(&Table::from_report(&report), &UiStyle::detect());
        Ok(())
    })
}
