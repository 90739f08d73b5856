use anyhow::Result;
use clap::{Parser, Subcommand};

use finboard::cli::{
    handle_add, handle_config, handle_delete, handle_edit, handle_list, handle_login,
    handle_logout, handle_signup, handle_summary, handle_theme, AddArgs, AppContext, DeleteArgs,
    EditArgs, ListArgs, SummaryArgs,
};

#[derive(Parser)]
#[command(
    name = "finboard",
    version,
    about = "Personal finance dashboard for the terminal",
    long_about = "finboard lists, filters and sorts your income and expense \
                  transactions and summarizes them by category and over time. \
                  Records come from the finboard backend, or from a local JSON \
                  file with --file."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        /// Username or email
        login: String,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account on the backend
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the session token
    Logout,

    /// Show or set the theme: dark, light, toggle
    Theme { mode: Option<String> },

    /// Show the transaction table
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show balance, category shares and the time series
    Summary(SummaryArgs),

    /// Record a transaction
    Add(AddArgs),

    /// Change fields of a transaction
    Edit(EditArgs),

    /// Remove a transaction
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut ctx = AppContext::load()?;

    match cli.command {
        Some(Commands::Login { login, password }) => handle_login(&mut ctx, &login, password)?,
        Some(Commands::Signup {
            name,
            username,
            email,
            password,
        }) => handle_signup(&ctx, name, username, email, password)?,
        Some(Commands::Logout) => handle_logout(&mut ctx)?,
        Some(Commands::Theme { mode }) => handle_theme(&mut ctx, mode)?,
        Some(Commands::List(args)) => handle_list(&ctx, args)?,
        Some(Commands::Summary(args)) => handle_summary(&ctx, args)?,
        Some(Commands::Add(args)) => handle_add(&ctx, args)?,
        Some(Commands::Edit(args)) => handle_edit(&ctx, args)?,
        Some(Commands::Delete(args)) => handle_delete(&ctx, args)?,
        Some(Commands::Config) => handle_config(&ctx)?,
        None => {
            println!("finboard - personal finance dashboard");
            println!();
            println!("Run 'finboard --help' for usage information.");
            println!("Run 'finboard login <user>' to connect to the backend.");
        }
    }

    Ok(())
}
