//! Command-line surface definitions.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use izin_core::{Day, EntryId, Layout, Theme};
use std::path::PathBuf;

/// Generate and keep surat izin (leave request letters) offline.
#[derive(Debug, Parser)]
#[command(name = "izin", version = izin_core::core_version(), about)]
pub struct Cli {
    /// Directory holding the state database and logs
    #[arg(long, global = true, env = "IZIN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "IZIN_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or edit the employee profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Manage the weekly teaching schedule
    #[command(subcommand)]
    Schedule(ScheduleCommand),

    /// Manage letter templates
    #[command(subcommand)]
    Template(TemplateCommand),

    /// Manage letter categories (jenis izin)
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Render a letter draft for a date
    Render(RenderArgs),

    /// Browse saved letters
    #[command(subcommand)]
    History(HistoryCommand),

    /// Write the full state to a backup JSON file
    Export {
        /// Output path (defaults to backup_izin_<date>.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace the full state with a backup JSON file
    Import {
        file: PathBuf,
    },

    /// Print a WhatsApp share link for a saved letter
    Share {
        id: EntryId,
    },

    /// Count teaching periods (JP) between two HH:MM times
    Jp {
        start: String,
        end: String,
    },

    /// Set the color theme
    Theme {
        theme: ThemeArg,
    },

    /// Set the editor display width
    Layout {
        layout: LayoutArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Print the stored profile
    Show,
    /// Update profile fields; omitted fields keep their value
    Set(ProfileArgs),
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// Employee number (NIP/NIY)
    #[arg(long)]
    pub identifier: Option<String>,
    #[arg(long)]
    pub unit: Option<String>,
    #[arg(long)]
    pub employment_status: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub additional_position: Option<String>,
    #[arg(long)]
    pub workload: Option<String>,
    /// HH:MM
    #[arg(long)]
    pub start_time: Option<String>,
    /// HH:MM
    #[arg(long)]
    pub end_time: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// List entries, optionally for one day
    List {
        #[arg(long)]
        day: Option<Day>,
    },
    /// Add one teaching slot
    Add {
        #[arg(long)]
        day: Day,
        #[arg(long)]
        subject: String,
        #[arg(long = "class")]
        class_name: String,
        #[arg(long)]
        level: String,
        /// HH:MM
        #[arg(long)]
        start: String,
        /// HH:MM
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Remove an entry by ID
    Remove { id: EntryId },
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// List templates
    List,
    /// Print one template body
    Show { id: EntryId },
    /// Add a template from a text file
    Add {
        #[arg(long)]
        name: String,
        /// File containing the template body
        #[arg(long)]
        file: PathBuf,
        /// Category tag used for auto-selection
        #[arg(long)]
        category: Option<String>,
    },
    /// Remove a template by ID
    Remove { id: EntryId },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    List,
    Add { name: String },
    /// Remove a custom category (defaults are kept)
    Remove { name: String },
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Letter date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Category used to pick the template
    #[arg(long, default_value = izin_core::CATEGORY_KBM)]
    pub category: String,
    #[arg(long, default_value = "")]
    pub reason: String,
    #[arg(long, default_value = "")]
    pub halaqah_group: String,
    #[arg(long, default_value = "")]
    pub halaqah_substitute: String,
    /// Store the draft in history
    #[arg(long)]
    pub save: bool,
    /// Also print a WhatsApp share link
    #[arg(long)]
    pub share: bool,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    List,
    Show { id: EntryId },
    Remove { id: EntryId },
    /// Delete every saved letter
    Clear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    Compact,
    Wide,
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Compact => Layout::Compact,
            LayoutArg::Wide => Layout::Wide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, ScheduleCommand};
    use clap::{CommandFactory, Parser};
    use izin_core::Day;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_reports_core_version() {
        assert_eq!(
            Cli::command().get_version(),
            Some(izin_core::core_version())
        );
    }

    #[test]
    fn schedule_add_parses_day_names() {
        let cli = Cli::parse_from([
            "izin", "schedule", "add", "--day", "senin", "--subject", "Aqidah", "--class",
            "X A", "--level", "MA", "--start", "07:00", "--end", "07:40",
        ]);
        match cli.command {
            Command::Schedule(ScheduleCommand::Add { day, note, .. }) => {
                assert_eq!(day, Day::Senin);
                assert_eq!(note, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
