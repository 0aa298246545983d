use growfund_core::{RepaymentService, SummaryService};
use growfund_domain::FundBook;
use uuid::Uuid;

use crate::cli::core::{parse_amount, parse_mode, CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::ui::{Table, TableRenderer, UiStyle};
use crate::core::ChangeScope;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "repayment",
        "Record repayments and drive their approval workflow",
        "repayment <record|endorse|finalize|reject|list>",
        cmd_repayment,
    )]
}

fn cmd_repayment(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: repayment <record|endorse|finalize|reject|list>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "record" => handle_record(context, rest),
        "endorse" => handle_endorse(context, rest),
        "finalize" => handle_finalize(context, rest),
        "reject" => handle_reject(context, rest),
        "list" => handle_list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown repayment subcommand `{}`",
            other
        ))),
    }
}

/// Resolves an entry reference: a 1-based index from `repayment list`,
/// a final `R000N` id, or the provisional uuid.
fn resolve_entry(fund: &FundBook, reference: &str) -> Result<Uuid, CommandError> {
    if let Ok(uuid) = Uuid::parse_str(reference) {
        return Ok(uuid);
    }
    if let Ok(index) = reference.parse::<usize>() {
        return fund
            .repayments
            .get(index.saturating_sub(1))
            .map(|r| r.entry_id)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!("repayment index {} out of range", index))
            });
    }
    fund.repayments
        .iter()
        .find(|r| r.id.as_deref().is_some_and(|id| id.eq_ignore_ascii_case(reference)))
        .map(|r| r.entry_id)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("no repayment matches `{}`", reference))
        })
}

fn handle_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: repayment record <borrowing-id> <principal> <paid YYYY-MM-DD|today> [penalty-paid] [mode]"
                .into(),
        ));
    }
    let borrowing = args[0].to_string();
    let principal = parse_amount(args[1])?;
    let paid_on = context.parse_date_arg(args[2])?;
    let penalty_paid = match args.get(3) {
        Some(raw) => parse_amount(raw)?,
        None => 0.0,
    };
    let mode = parse_mode(args.get(4).copied())?;
    let rate = context.penalty_rate();

    let entry_id = context.mutate(ChangeScope::Repayments, |fund| {
        RepaymentService::record(fund, &borrowing, principal, penalty_paid, paid_on, mode, rate)
    })?;

    let (days_late, penalty_due, outstanding_after) = context.with_fund(|fund| {
        let entry = fund
            .repayment(entry_id)
            .expect("entry just recorded should exist");
        Ok((entry.days_late, entry.penalty_due, entry.outstanding_after))
    })?;
    io::print_success(format!(
        "Repayment recorded on {} (entry {}).",
        borrowing, entry_id
    ));
    if days_late > 0 {
        io::print_warning(format!(
            "{} days late; penalty due {:.2}.",
            days_late, penalty_due
        ));
    }
    io::print_info(format!(
        "Outstanding after approval will be {:.2}.",
        outstanding_after
    ));
    Ok(())
}

fn handle_endorse(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (entry_id, actor, notes) = workflow_args(context, args, "endorse")?;
    context.mutate(ChangeScope::Repayments, |fund| {
        RepaymentService::endorse(fund, entry_id, &actor, notes)
    })?;
    io::print_success("Repayment endorsed; awaiting admin approval.");
    Ok(())
}

fn handle_finalize(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (entry_id, actor, notes) = workflow_args(context, args, "finalize")?;
    let final_id = context.mutate(ChangeScope::Repayments, |fund| {
        RepaymentService::finalize(fund, entry_id, &actor, notes)
    })?;
    io::print_success(format!("Repayment finalized as {}.", final_id));
    Ok(())
}

fn handle_reject(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (entry_id, actor, notes) = workflow_args(context, args, "reject")?;
    context.mutate(ChangeScope::Repayments, |fund| {
        RepaymentService::reject(fund, entry_id, &actor, notes)
    })?;
    io::print_success("Repayment rejected.");
    Ok(())
}

fn workflow_args(
    context: &ShellContext,
    args: &[&str],
    verb: &str,
) -> Result<(Uuid, String, Option<String>), CommandError> {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(format!(
            "usage: repayment {} <entry-ref> <actor> [notes...]",
            verb
        )));
    }
    let entry_id = context.with_fund(|fund| resolve_entry(fund, args[0]))?;
    let actor = args[1].to_string();
    let notes = if args.len() > 2 {
        Some(args[2..].join(" "))
    } else {
        None
    };
    Ok((entry_id, actor, notes))
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    context.with_fund(|fund| {
        let report = SummaryService::repayments_report(fund);
        if report.rows.is_empty() {
            io::print_warning("No repayments on record.");
            return Ok(());
        }
        TableRenderer::render(&Table::from_report(&report), &UiStyle::detect());
        Ok(())
    })
}
