use std::path::Path;

use growfund_core::{ReportTable, SummaryService};
use growfund_domain::FundBook;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::export::write_report_csv;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::ui::{Table, TableRenderer, UiStyle};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Render fund reports or export them as CSV",
        "report <summary|shareholders|deposits|borrowings|repayments|penalties|investments> | report export <kind> <path>",
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: report <kind> | report export <kind> <path>".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "summary" => handle_summary(context),
        "export" => handle_export(context, rest),
        kind => handle_table(context, kind),
    }
}

fn report_for(fund: &FundBook, kind: &str) -> Result<ReportTable, CommandError> {
    match kind {
        "shareholders" => Ok(SummaryService::shareholders_report(fund)),
        "deposits" => Ok(SummaryService::deposits_report(fund)),
        "borrowings" => Ok(SummaryService::borrowings_report(fund)),
        "repayments" => Ok(SummaryService::repayments_report(fund)),
        "penalties" => Ok(SummaryService::penalties_report(fund)),
        "investments" => Ok(SummaryService::investments_report(fund)),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown report kind `{}`",
            other
        ))),
    }
}

fn handle_summary(context: &mut ShellContext) -> CommandResult {
    context.with_fund(|fund| {
        let summary = SummaryService::summarize(fund);
        io::print_info(format!(
            "Shareholders: {} ({} active), shares {:.2}",
            summary.shareholders_total, summary.shareholders_active, summary.share_balance_total
        ));
        io::print_info(format!(
            "Deposits: {:.2}, penalties: {:.2}",
            summary.deposits_total, summary.penalties_total
        ));
        io::print_info(format!(
            "Borrowings open: {}, outstanding: {:.2}",
            summary.borrowings_open, summary.outstanding_total
        ));
        io::print_info(format!(
            "Investments: {:.2} across {} open",
            summary.invested_total, summary.investments_open
        ));
        Ok(())
    })
}

fn handle_table(context: &mut ShellContext, kind: &str) -> CommandResult {
    context.with_fund(|fund| {
        let report = report_for(fund, kind)?;
        if report.rows.is_empty() {
            io::print_warning(format!("Report `{}` is empty.", kind));
            return Ok(());
        }
        TableRenderer::render(&Table::from_report(&report), &UiStyle::detect());
        Ok(())
    })
}

fn handle_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: report export <kind> <path>".into(),
        ));
    }
    let kind = args[0].to_ascii_lowercase();
    let path = Path::new(args[1]);
    let report = context.with_fund(|fund| report_for(fund, &kind))?;
    write_report_csv(&report, path)?;
    io::print_success(format!(
        "Report `{}` exported to {} ({} rows).",
        kind,
        path.display(),
        report.rows.len()
    ));
    Ok(())
}
