use std::io::IsTerminal;

use colored::{Color, Colorize};

use crate::cli::output::current_preferences;

#[derive(Clone)]
pub struct UiStyle {
    pub header_prefix: String,
    pub horizontal: char,
    pub use_color: bool,
    pub color_header: Option<Color>,
}

impl UiStyle {
    pub fn detect() -> Self {
        let prefs = current_preferences();
        let stdout_tty = std::io::stdout().is_terminal();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let use_color = stdout_tty && prefs.color_enabled && !no_color;

        Self {
            header_prefix: "> ".into(),
            horizontal: '-',
            use_color,
            color_header: if use_color {
                Some(Color::BrightBlue)
            } else {
                None
            },
        }
    }

    pub fn horizontal_line(&self, width: usize) -> String {
        self.horizontal.to_string().repeat(width.max(40))
    }

    pub fn apply_header_style(&self, text: &str) -> String {
        if self.use_color {
            match self.color_header {
                Some(color) => text.color(color).bold().to_string(),
                None => text.bold().to_string(),
            }
        } else {
            text.to_string()
        }
    }
}

pub fn format_header(title: &str) -> String {
    let style = UiStyle::detect();
    let prefixed = format!("{}{}", style.header_prefix, title);
    style.apply_header_style(&prefixed)
}
