use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use shared_budget::cli::{
    handle_budget_command, handle_expense_command, handle_export_command, handle_history_command,
    handle_member_command, handle_report_command, handle_user_command, BudgetCommands,
    ExpenseCommands, ExportFormat, MemberCommands, ReportCommands, Session, UserCommands,
};
use shared_budget::config::{BudgetPaths, Settings};
use shared_budget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Shared household budgeting with savings insights",
    long_about = "Keep a monthly budget together with the people you live with. \
                  Members record expenses in six categories and get a savings \
                  summary with alerts when spending drifts past common benchmarks."
)]
struct Cli {
    /// Act as this user instead of the logged-in one
    #[arg(long = "user", value_name = "USER_ID", global = true, env = "SHARED_BUDGET_USER")]
    acting_user: Option<String>,

    /// Budget name or ID to use instead of the active one
    #[arg(long = "budget", value_name = "BUDGET", global = true)]
    budget_override: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in / out and show the current user
    #[command(subcommand)]
    User(UserCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Member and role management
    #[command(subcommand)]
    Member(MemberCommands),

    /// Summary and savings insights
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export the active budget
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    shared_budget::logging::init(cli.verbose);

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let mut session = Session::new(&storage, settings, cli.acting_user, cli.budget_override);

    match cli.command {
        Some(Commands::User(cmd)) => handle_user_command(&mut session, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&mut session, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&session, cmd)?,
        Some(Commands::Member(cmd)) => handle_member_command(&session, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&session, cmd)?,
        Some(Commands::Export { format, output }) => {
            handle_export_command(&session, format, output)?
        }
        Some(Commands::History { limit }) => handle_history_command(&session, limit)?,
        Some(Commands::Config) => {
            let settings = &session.settings;
            let t = &settings.thresholds;
            println!("SharedBudget Configuration");
            println!("==========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            match &settings.current_user {
                Some(user) => println!("  Current user:    {}", user),
                None => println!("  Current user:    (not logged in)"),
            }
            match settings.active_budget {
                Some(id) => println!("  Active budget:   {}", id),
                None => println!("  Active budget:   (none)"),
            }
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!();
            println!("Advisor thresholds (% of income):");
            println!("  High savings:       {}", t.savings_high);
            println!("  Adequate savings:   {}", t.savings_adequate);
            println!("  Spending ceiling:   {}", t.spending_ceiling);
            println!("  Housing:            {}", t.housing);
            println!("  Transportation:     {}", t.transportation);
            println!("  Entertainment:      {}", t.entertainment);
        }
        None => {
            println!("SharedBudget - shared household budgeting");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Start with 'budget user login <user-id>'.");
        }
    }

    Ok(())
}
