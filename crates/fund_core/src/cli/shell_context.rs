//! Shared runtime state for CLI interactions and command execution.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use growfund_core::{calc, Clock, CoreError, Outcome, SystemClock};
use growfund_domain::FundBook;
use growfund_storage_json::{DirMirror, JsonFundStorage, StoragePaths};
use strsim::levenshtein;

use crate::cli::commands;
use crate::cli::core::{parse_date, CliError, CommandError, CommandResult, LoopControl};
use crate::cli::io as cli_io;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::config::{self, Config, ConfigManager};
use crate::core::utils::app_data_dir;
use crate::core::{ChangeScope, FundManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: FundManager,
    pub theme: ColorfulTheme,
    pub clock: Arc<dyn Clock>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = config::default_manager()?;
        let config = config_manager.load()?;
        cli_io::apply_config(&config);

        let base = app_data_dir();
        let storage = JsonFundStorage::new(StoragePaths {
            fund_root: config.resolve_fund_root(&base),
            backup_root: config.resolve_backup_root(&base),
        })?;
        let manager = match &config.mirror_root {
            Some(dir) => FundManager::with_mirror(
                Box::new(storage),
                Box::new(DirMirror::new(dir.clone())),
            ),
            None => FundManager::new(Box::new(storage)),
        };

        let mut context = ShellContext {
            mode,
            registry,
            manager,
            theme: ColorfulTheme::default(),
            clock: Arc::new(SystemClock),
            config_manager,
            config,
            last_command: None,
            running: true,
        };
        context.auto_load_last();
        Ok(context)
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn prompt(&self) -> String {
        match self.manager.current_name() {
            Some(name) => format!("{}> ", name),
            None => "fund> ".into(),
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Penalty rate per late day; the configuration may override the
    /// built-in default.
    pub(crate) fn penalty_rate(&self) -> f64 {
        self.config
            .penalty_daily_rate
            .unwrap_or(calc::DAILY_PENALTY_RATE)
    }

    /// Date argument parser that also accepts the literal `today`,
    /// resolved through the shell clock.
    pub(crate) fn parse_date_arg(&self, value: &str) -> Result<NaiveDate, CommandError> {
        if value.eq_ignore_ascii_case("today") {
            return Ok(self.clock.today());
        }
        parse_date(value)
    }

    fn auto_load_last(&mut self) {
        if self.mode != CliMode::Interactive {
            return;
        }
        let Some(name) = self.config.last_opened_fund.clone() else {
            return;
        };
        if let Ok(report) = self.manager.load(&name) {
            self.report_load(&report.warnings, &report.migrations);
            cli_io::print_success(format!("Automatically loaded last fund `{}`.", name));
        }
    }

    // -- fund access -------------------------------------------------------

    pub(crate) fn with_fund<T>(
        &self,
        f: impl FnOnce(&FundBook) -> Result<T, CommandError>,
    ) -> Result<T, CommandError> {
        match self.manager.current() {
            Some(fund) => f(fund),
            None => Err(CommandError::FundNotLoaded),
        }
    }

    /// Runs a mutation through the repository facade and folds the
    /// tri-state outcome back into the command flow.
    pub(crate) fn mutate<T>(
        &mut self,
        scope: ChangeScope,
        f: impl FnOnce(&mut FundBook) -> Result<T, CoreError>,
    ) -> Result<T, CommandError> {
        if self.manager.current().is_none() {
            return Err(CommandError::FundNotLoaded);
        }
        match self.manager.execute(scope, f) {
            Outcome::Success(value) => Ok(value),
            Outcome::Error(message) => Err(CommandError::Command(message)),
            Outcome::Loading => Err(CommandError::Command("operation still in flight".into())),
        }
    }

    // -- configuration -----------------------------------------------------

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager
            .save(&self.config)
            .map_err(|err| CommandError::Command(err.to_string()))
    }

    fn update_last_opened(&mut self, name: Option<&str>) -> CommandResult {
        self.config.last_opened_fund = name.map(|value| value.to_string());
        self.persist_config()
    }

    pub(crate) fn show_config(&self) -> CommandResult {
        cli_io::print_info(format!("Locale: {}", self.config.locale));
        cli_io::print_info(format!("Currency: {}", self.config.currency));
        cli_io::print_info(format!(
            "Color output: {}",
            if self.config.ui_color_enabled { "on" } else { "off" }
        ));
        cli_io::print_info(format!(
            "Last opened fund: {}",
            self.config.last_opened_fund.as_deref().unwrap_or("(none)")
        ));
        cli_io::print_info(format!(
            "Penalty rate per late day: {:.2}%",
            self.penalty_rate() * 100.0
        ));
        cli_io::print_info(format!(
            "Mirror root: {}",
            self.config
                .mirror_root
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(mirroring disabled)".into())
        ));
        Ok(())
    }

    pub(crate) fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        match key.to_lowercase().as_str() {
            "locale" => self.config.locale = value.to_string(),
            "currency" => self.config.currency = value.to_string(),
            "ui_color_enabled" => {
                self.config.ui_color_enabled = matches!(value, "true" | "on" | "1");
            }
            "penalty_daily_rate" => {
                if value.eq_ignore_ascii_case("default") || value.is_empty() {
                    self.config.penalty_daily_rate = None;
                } else {
                    let rate: f64 = value.parse().map_err(|_| {
                        CommandError::InvalidArguments(
                            "penalty_daily_rate must be a fraction such as 0.01".into(),
                        )
                    })?;
                    if !(0.0..=1.0).contains(&rate) {
                        return Err(CommandError::InvalidArguments(
                            "penalty_daily_rate must be between 0 and 1".into(),
                        ));
                    }
                    self.config.penalty_daily_rate = Some(rate);
                }
            }
            "mirror_root" => {
                if value.eq_ignore_ascii_case("none") || value.is_empty() {
                    self.config.mirror_root = None;
                } else {
                    self.config.mirror_root = Some(PathBuf::from(value));
                }
                cli_io::print_info("Mirror changes take effect on the next start.");
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown config key `{}`",
                    other
                )))
            }
        }
        self.persist_config()?;
        cli_io::apply_config(&self.config);
        cli_io::print_success("Configuration updated.");
        Ok(())
    }

    // -- fund lifecycle ----------------------------------------------------

    pub(crate) fn new_fund(&mut self, name: &str) -> CommandResult {
        let fund = FundBook::new(name);
        self.manager.set_current(fund, None, Some(name.to_string()));
        cli_io::print_success("New fund created.");
        Ok(())
    }

    pub(crate) fn load_named_fund(&mut self, name: &str) -> CommandResult {
        let report = self.manager.load(name).map_err(CommandError::from_core)?;
        let path = self.manager.fund_path(name);
        cli_io::print_success(format!("Fund `{}` loaded from {}.", name, path.display()));
        self.report_load(&report.warnings, &report.migrations);
        self.update_last_opened(Some(name))?;
        Ok(())
    }

    pub(crate) fn load_fund_path(&mut self, path: &Path) -> CommandResult {
        let report = self
            .manager
            .load_from_path(path)
            .map_err(CommandError::from_core)?;
        cli_io::print_success(format!("Fund loaded from {}.", path.display()));
        self.report_load(&report.warnings, &report.migrations);
        self.update_last_opened(None)?;
        Ok(())
    }

    pub(crate) fn save_named_fund(&mut self, name: &str) -> CommandResult {
        let path = self
            .manager
            .save_as(name)
            .map_err(CommandError::from_core)?;
        cli_io::print_success(format!("Fund `{}` saved to {}.", name, path.display()));
        self.update_last_opened(Some(name))?;
        Ok(())
    }

    pub(crate) fn save_current_fund(&mut self) -> CommandResult {
        let path = self.manager.save().map_err(CommandError::from_core)?;
        cli_io::print_success(format!("Fund saved to {}.", path.display()));
        Ok(())
    }

    pub(crate) fn require_named_fund(&self) -> Result<String, CommandError> {
        self.manager
            .current_name()
            .map(|name| name.to_string())
            .ok_or_else(|| {
                CommandError::InvalidArguments(
                    "No named fund associated. Use `fund save-as <name>` once to bind it.".into(),
                )
            })
    }

    pub(crate) fn create_backup(&mut self, note: Option<&str>) -> CommandResult {
        self.require_named_fund()?;
        let info = self
            .manager
            .backup(note)
            .map_err(CommandError::from_core)?;
        cli_io::print_success(format!("Backup created: {}", info.id));
        Ok(())
    }

    pub(crate) fn list_backups(&self, name: &str) -> CommandResult {
        let backups = self
            .manager
            .list_backups(name)
            .map_err(CommandError::from_core)?;
        if backups.is_empty() {
            cli_io::print_warning("No backups available.");
            return Ok(());
        }
        cli_io::print_info("Available backups:");
        for (idx, backup) in backups.iter().enumerate() {
            cli_io::print_info(format!("  {:>2}. {}", idx + 1, backup.id));
        }
        Ok(())
    }

    pub(crate) fn restore_backup(&mut self, name: &str, reference: &str) -> CommandResult {
        let backups = self
            .manager
            .list_backups(name)
            .map_err(CommandError::from_core)?;
        if backups.is_empty() {
            return Err(CommandError::InvalidArguments(
                "no backups available to restore".into(),
            ));
        }
        let target = if let Ok(index_raw) = reference.parse::<usize>() {
            let index = index_raw.saturating_sub(1);
            backups
                .get(index)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "backup index {} out of range",
                        reference
                    ))
                })?
                .clone()
        } else {
            backups
                .iter()
                .find(|candidate| candidate.id.contains(reference))
                .cloned()
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "no backup matches reference `{}`",
                        reference
                    ))
                })?
        };

        let confirm = if self.mode == CliMode::Interactive {
            cli_io::confirm_action(
                &self.theme,
                &format!("Restore fund `{}` from backup `{}`?", name, target.id),
                false,
            )?
        } else {
            true
        };
        if !confirm {
            cli_io::print_info("Operation cancelled.");
            return Ok(());
        }

        let report = self
            .manager
            .restore_backup(&target)
            .map_err(CommandError::from_core)?;
        self.report_load(&report.warnings, &report.migrations);
        cli_io::print_success(format!(
            "Fund `{}` loaded from backup `{}`.",
            name, target.id
        ));
        self.update_last_opened(Some(name))?;
        Ok(())
    }

    fn report_load(&self, warnings: &[String], migrations: &[String]) {
        for note in migrations {
            cli_io::print_info(format!("Migration: {}", note));
        }
        for warning in warnings {
            cli_io::print_warning(warning);
        }
    }

    // -- dispatch ----------------------------------------------------------

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::FundNotLoaded => {
                cli_io::print_error("Fund not loaded. Use `fund new` or `fund load` first.");
                cli_io::print_hint("Try `fund new Demo` to get started.");
            }
            other => {
                cli_io::print_error(other.to_string());
            }
        }
    }
}
