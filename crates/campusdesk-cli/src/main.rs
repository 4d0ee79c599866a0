use std::path::PathBuf;

use anyhow::{Context, Result};
use campusdesk_core::catalog::AttendancePeriod;
use campusdesk_core::chat::ChatPanel;
use campusdesk_core::issue::{IssueCategory, IssuePriority, IssueStatus};
use campusdesk_core::session::Role;
use campusdesk_infrastructure::CampusPaths;
use campusdesk_infrastructure::storage::ConfigStorage;
use clap::{Parser, Subcommand};

mod app;
mod commands;
mod logging;

use app::App;
use commands::Output;

#[derive(Parser)]
#[command(name = "campusdesk")]
#[command(about = "CampusDesk - campus helpdesk dashboard in the terminal", long_about = None)]
struct Cli {
    /// Directory holding config.toml and secret.json
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Directory holding state.json and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep session, issues and chat history in memory; no state or log files are written
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default config.toml and a secret.json template
    Init {
        /// Overwrite an existing config.toml
        #[arg(long)]
        force: bool,
    },
    /// Sign in as a role (student, admin/teacher/staff)
    Login { role: Role },
    /// Sign out
    Logout,
    /// Show the session and the views it can reach
    Status,
    /// Role-specific landing page
    Dashboard,
    /// Show the full text of a notice
    Notice { id: String },
    /// Attendance for a period (monthly, semester, yearly)
    Attendance {
        #[arg(long, default_value_t = AttendancePeriod::Semester)]
        period: AttendancePeriod,
        /// Show the lecture history of one subject
        #[arg(long)]
        subject: Option<String>,
    },
    /// Fee records and totals
    Fees,
    /// Courses taught by the signed-in staff member
    Courses,
    /// Students of a course with their marks
    Roster {
        /// Course id or code (e.g. C1 or CS501)
        course: String,
        /// Filter by name or roll number
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Ticket statistics broken down by category, status and sentiment
    Analytics,
    /// Report, browse and triage issues
    Issue {
        #[command(subcommand)]
        action: IssueAction,
    },
    /// Talk to an AI panel (helpdesk or pro)
    Chat {
        #[arg(default_value_t = ChatPanel::Helpdesk)]
        panel: ChatPanel,
        /// Send one message and exit instead of opening the REPL
        #[arg(short, long)]
        message: Option<String>,
        /// Send a canned helpdesk question by id
        #[arg(short, long, conflicts_with = "message")]
        quick: Option<String>,
        /// Attach a JPEG, PNG or PDF file (pro panel only)
        #[arg(short, long)]
        attach: Option<PathBuf>,
        /// Clear the transcript before anything else
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum IssueAction {
    /// Report a new issue
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: Option<IssueCategory>,
        #[arg(long)]
        priority: Option<IssuePriority>,
    },
    /// List issues, most recent first
    List {
        #[arg(long)]
        status: Option<IssueStatus>,
        /// Match against title or id
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one issue and the statuses it may move to
    Show { id: String },
    /// Change the status of an issue (staff only)
    Status { id: String, status: IssueStatus },
    /// AI executive summary of all issues (staff only)
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = CampusPaths::resolve(cli.config_dir.as_deref(), cli.data_dir.as_deref())
        .context("Failed to resolve CampusDesk directories")?;
    let config_storage = ConfigStorage::new(paths.config_file());
    let config = config_storage.load()?;

    let mut log_settings = config.logging.clone();
    if cli.ephemeral {
        log_settings.file = false;
    }
    let _log_guard = logging::init(&log_settings, &paths.log_dir(), cli.verbose)?;

    match cli.command {
        Commands::Init { force } => commands::init::run(&paths, &config_storage, force),
        command => {
            let app = App::bootstrap(paths, config, cli.ephemeral).await?;
            dispatch(&app, &Output::new(cli.json), command).await
        }
    }
}

async fn dispatch(app: &App, out: &Output, command: Commands) -> Result<()> {
    match command {
        // Runs before bootstrap in main.
        Commands::Init { .. } => {}
        Commands::Login { role } => commands::session::login(app, out, role).await?,
        Commands::Logout => commands::session::logout(app, out).await?,
        Commands::Status => commands::session::status(app, out).await?,
        Commands::Dashboard => commands::dashboard::overview(app, out).await?,
        Commands::Notice { id } => commands::dashboard::notice(app, out, &id).await?,
        Commands::Attendance { period, subject } => {
            commands::dashboard::attendance(app, out, period, subject.as_deref()).await?
        }
        Commands::Fees => commands::dashboard::fees(app, out).await?,
        Commands::Courses => commands::dashboard::courses(app, out).await?,
        Commands::Roster { course, search } => {
            commands::dashboard::roster(app, out, &course, &search).await?
        }
        Commands::Analytics => commands::dashboard::analytics(app, out).await?,
        Commands::Issue { action } => match action {
            IssueAction::Create {
                title,
                description,
                category,
                priority,
            } => commands::issue::create(app, out, title, description, category, priority).await?,
            IssueAction::List { status, search } => {
                commands::issue::list(app, out, status, &search).await?
            }
            IssueAction::Show { id } => commands::issue::show(app, out, &id).await?,
            IssueAction::Status { id, status } => {
                commands::issue::set_status(app, out, &id, status).await?
            }
            IssueAction::Summary => commands::issue::summary(app, out).await?,
        },
        Commands::Chat {
            panel,
            message,
            quick,
            attach,
            clear,
        } => {
            let request = commands::chat::ChatArgs {
                message,
                quick,
                attach,
                clear,
            };
            commands::chat::run(app, out, panel, request).await?
        }
    }

    Ok(())
}
