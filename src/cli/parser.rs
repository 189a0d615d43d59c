use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for pontolog
/// Time-and-attendance CLI: punches, approvals and worked-hours reports on SQLite
#[derive(Parser)]
#[command(
    name = "pontolog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small time-and-attendance CLI: clock in/out with lunch breaks, approve punches and aggregate worked hours using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Acting employee id (defaults to `current_user` from the configuration)
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print diagnostic traces on stderr
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init {
        #[arg(long = "admin", value_name = "ID", help = "Create the first administrator")]
        admin: Option<String>,

        #[arg(long, requires = "admin", help = "Administrator e-mail")]
        email: Option<String>,

        #[arg(long, requires = "admin", help = "Administrator first name")]
        name: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
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

    /// Record a punch for the acting employee
    Clock {
        /// entrada | saida_almoco | volta_almoco | saida
        kind: String,

        #[arg(long = "at", value_name = "TIMESTAMP", help = "Punch time (YYYY-MM-DD HH:MM[:SS]), default now")]
        at: Option<String>,

        #[arg(long = "lat", requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long = "lon", requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        #[arg(long = "photo", value_name = "URL", help = "Photo taken at the punch")]
        photo: Option<String>,
    },

    /// Show the clock status of the acting employee
    Status {
        #[arg(long, help = "Day to inspect (YYYY-MM-DD), default today")]
        date: Option<String>,
    },

    /// List punches
    List {
        #[arg(long, short, help = "Filter by year/month/day, a custom range or 'all'")]
        period: Option<String>,

        #[arg(long, short, help = "Employee id (administrators only for others)")]
        employee: Option<String>,

        #[arg(long, short, help = "pendente | aprovado | rejeitado")]
        status: Option<String>,
    },

    /// List punches waiting for a decision
    Pending,

    /// Approve a pending punch
    Approve { id: i64 },

    /// Reject a pending punch
    Reject { id: i64 },

    /// Worked hours per day
    Report {
        #[arg(long, short, help = "Filter by year/month/day, a custom range or 'all'")]
        period: Option<String>,

        #[arg(long, short, help = "Employee id (administrators only for others)")]
        employee: Option<String>,

        #[arg(long, help = "One table per employee (administrators only)")]
        all: bool,

        #[arg(long, help = "all | approved | not-rejected")]
        statuses: Option<String>,

        #[arg(long, help = "explicit | flat")]
        lunch: Option<String>,

        #[arg(long = "day-boundary", help = "strict | entrada-day")]
        day_boundary: Option<String>,
    },

    /// Manage employee profiles (administrators)
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Show or set the weekly schedule of an employee
    Schedule {
        #[arg(long, short, help = "Employee id, default the acting user")]
        employee: Option<String>,

        #[arg(long, help = "Print the schedule")]
        show: bool,

        #[arg(long, value_name = "HH:MM-HH:MM", help = "Monday to Friday hours")]
        weekday: Option<String>,

        #[arg(long, value_name = "HH:MM-HH:MM", requires = "weekday")]
        saturday: Option<String>,

        #[arg(long, value_name = "HH:MM-HH:MM", requires = "weekday")]
        sunday: Option<String>,
    },

    /// Delete the whole punch history of an employee
    Del {
        #[arg(long, short, help = "Employee id, default the acting user")]
        employee: Option<String>,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// Export punches or the aggregated report
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short)]
        employee: Option<String>,

        #[arg(long, short = 'r', help = "Export per-day totals instead of punches")]
        report: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// List all profiles
    List,

    /// Create a profile
    Add {
        id: String,

        #[arg(long)]
        email: String,

        #[arg(long = "first-name")]
        first_name: String,

        #[arg(long = "last-name")]
        last_name: Option<String>,

        #[arg(long, help = "Grant administrator rights")]
        admin: bool,
    },

    /// Change the role of a profile
    SetRole {
        id: String,

        /// employee | admin
        role: String,
    },

    /// Change the name of a profile
    Rename {
        id: String,

        #[arg(long = "first-name")]
        first_name: String,

        #[arg(long = "last-name")]
        last_name: Option<String>,
    },

    /// Delete a profile and its schedule
    Del { id: String },
}
