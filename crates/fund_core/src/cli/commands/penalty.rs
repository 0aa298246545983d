use growfund_core::{PenaltyService, SummaryService};
use growfund_domain::PenaltyKind;

use crate::cli::core::{parse_amount, parse_date, CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::ui::{Table, TableRenderer, UiStyle};
use crate::core::ChangeScope;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "penalty",
        "Levy and inspect shareholder penalties",
        "penalty <record|list>",
        cmd_penalty,
    )]
}

fn cmd_penalty(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: penalty <record|list>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "record" => handle_record(context, rest),
        "list" => handle_list(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown penalty subcommand `{}`",
            other
        ))),
    }
}

fn handle_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 6 {
        return Err(CommandError::InvalidArguments(
            "usage: penalty record <shareholder> <amount> <kind> <recorded-by> <levied YYYY-MM-DD> <reason...>"
                .into(),
        ));
    }
    let shareholder = args[0].to_string();
    let amount = parse_amount(args[1])?;
    let kind = PenaltyKind::from_label(args[2]).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "`{}` is not a penalty kind (late-deposit|late-repayment|other)",
            args[2]
        ))
    })?;
    let recorded_by = args[3].to_string();
    let levied_on = parse_date(args[4])?;
    let reason = args[5..].join(" ");

    let id = context.mutate(ChangeScope::Penalties, |fund| {
        PenaltyService::record(fund, &shareholder, amount, kind, &reason, &recorded_by, levied_on)
    })?;
    io::print_success(format!("Penalty {} levied on {}.", id, shareholder));
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = args.first().map(|raw| raw.to_string());
    context.with_fund(|fund| {
        let mut report = SummaryService::penalties_report(fund);
        if let Some(needle) = &filter {
            report.rows.retain(|row| row[1].eq_ignore_ascii_case(needle));
        }
        if report.rows.is_empty() {
            io::print_warning("No penalties recorded.");
            return Ok(());
        }
        TableRenderer::render(&Table::from_report(&report), &UiStyle::detect());
        if let Some(shareholder) = &filter {
            io::print_info(format!(
                "Total for {}: {:.2}",
                shareholder,
                PenaltyService::total_for(fund, shareholder)
            ));
        }
        Ok(())
    })
}
