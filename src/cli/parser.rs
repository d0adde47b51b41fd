use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for teamcal
/// Team calendar: who works where, and when
#[derive(Parser)]
#[command(
    name = "teamcal",
    version = env!("CARGO_PKG_VERSION"),
    about = "Team scheduling calendar: office/home/leave days, weekly rules and public holidays in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Act as this user (default: `current_user` from the config file)
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage team members
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Record where someone works on a day (or every day of a range)
    Add {
        /// Day (YYYY-MM-DD)
        date: String,

        /// Last day of a range, inclusive (YYYY-MM-DD)
        #[arg(long = "to")]
        to: Option<String>,

        /// home | office | annual_leave | personal_leave | public_holiday | other (or h/o/al/pl/ph/x)
        #[arg(long = "loc")]
        loc: String,

        #[arg(long = "notes")]
        notes: Option<String>,

        /// Owner of the entry (admins only, when not yourself)
        #[arg(long = "for")]
        for_user: Option<String>,
    },

    /// Edit a stored entry by id
    Edit {
        id: i64,

        #[arg(long = "date")]
        date: Option<String>,

        #[arg(long = "loc")]
        loc: Option<String>,

        /// New notes; an empty string clears them
        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Delete a stored entry by id
    Del {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// List stored entries, newest first
    List {
        /// YYYY, YYYY-MM, YYYY-MM-DD or A:B (default: all)
        #[arg(long = "period")]
        period: Option<String>,

        #[arg(long = "for")]
        for_user: Option<String>,
    },

    /// Manage recurring weekly rules
    Rule {
        #[command(subcommand)]
        action: RuleAction,
    },

    /// Show the resolved calendar
    Show {
        /// YYYY, YYYY-MM, YYYY-MM-DD or A:B (default: current month)
        #[arg(long = "period")]
        period: Option<String>,

        /// Whole team instead of one person
        #[arg(long = "team")]
        team: bool,

        /// Only days resolved to this location
        #[arg(long = "loc")]
        loc: Option<String>,

        #[arg(long = "for", conflicts_with = "team")]
        for_user: Option<String>,
    },

    /// List public holidays
    Holidays {
        #[arg(long = "period")]
        period: Option<String>,
    },

    /// Re-store public holidays as explicit entries
    RefreshHolidays {
        /// Default: the next twelve months from today
        #[arg(long = "period")]
        period: Option<String>,

        #[arg(long = "for")]
        for_user: Option<String>,
    },

    /// Export the resolved calendar
    Export {
        #[arg(long = "format", value_enum)]
        format: ExportFormat,

        /// Output file
        #[arg(long = "file")]
        file: String,

        #[arg(long = "period")]
        period: Option<String>,

        #[arg(long = "team")]
        team: bool,

        #[arg(long = "loc")]
        loc: Option<String>,

        /// Overwrite an existing file without asking
        #[arg(long = "force")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a team member (the first one becomes admin)
    Add {
        username: String,

        /// Display name (default: the username)
        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "admin")]
        admin: bool,
    },

    /// Change a member's display name (yourself, or anyone as admin)
    Edit {
        username: String,

        #[arg(long = "name")]
        name: String,
    },

    /// List team members
    List,
}

#[derive(Subcommand)]
pub enum RuleAction {
    /// Create a weekly rule
    Add {
        #[arg(long = "loc")]
        loc: String,

        /// Weekdays, e.g. `mon,wed` or `mon-fri`
        #[arg(long = "days")]
        days: String,

        #[arg(long = "notes")]
        notes: Option<String>,

        #[arg(long = "for")]
        for_user: Option<String>,
    },

    /// Change a rule; omitted fields keep their value
    Edit {
        id: i64,

        #[arg(long = "loc")]
        loc: Option<String>,

        #[arg(long = "days")]
        days: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Delete a rule
    Del { id: i64 },

    /// List weekly rules
    List {
        #[arg(long = "for")]
        for_user: Option<String>,
    },
}
