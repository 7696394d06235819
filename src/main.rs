use calcboard::app::App;
use calcboard::client::ApiError;
use calcboard::config::{ClientConfig, ConfigError};
use calcboard::router::View;
use calcboard::types::{ComputingServer, Expression, OperationTimes};
use calcboard::validate::ProfileForm;
use calcboard::views::computing_powers::ComputingPowersView;
use calcboard::views::expressions::{InputExpressionView, ViewExpressionsView};
use calcboard::views::login::LoginView;
use calcboard::views::logout::{self, LOGGED_OUT};
use calcboard::views::operations::OperationsView;
use calcboard::views::profile::ProfileView;
use calcboard::views::register::RegisterView;
use calcboard::views::{Notice, ViewError, ViewResult, home};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("session expired; run `calcboard login` again")]
    SessionExpired,
    #[error("{0}")]
    Rejected(String),
    #[error("invalid operation time `{0}`; expected OP=MS, e.g. +=1000")]
    InvalidAssignment(String),
}

#[derive(Parser, Debug)]
#[command(name = "calcboard", about = "Client for the distributed calculation service")]
struct Cli {
    #[arg(long, env = "CALCBOARD_API_URL")]
    base_url: Option<String>,

    #[arg(long, env = "CALCBOARD_SESSION_FILE")]
    session_file: Option<String>,

    #[arg(long, env = "CALCBOARD_TIMEOUT_MS")]
    timeout_ms: Option<String>,

    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service is reachable.
    Ping,
    /// Describe the service and list the available screens.
    Home,
    Login(CredentialArgs),
    Register(CredentialArgs),
    Logout,
    Profile(ProfileCommand),
    Expression(ExpressionCommand),
    Operations(OperationsCommand),
    /// Show worker nodes and the expressions each one calculated.
    Servers,
}

#[derive(Args, Debug)]
struct CredentialArgs {
    login: String,
    #[arg(long, env = "CALCBOARD_PASSWORD")]
    password: String,
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        old_password: String,
        #[arg(long, default_value = "")]
        login: String,
        #[arg(long, default_value = "")]
        new_password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
    },
}

#[derive(Args, Debug)]
struct ExpressionCommand {
    #[command(subcommand)]
    command: ExpressionSubcommand,
}

#[derive(Subcommand, Debug)]
enum ExpressionSubcommand {
    Submit { expression: String },
    List,
}

#[derive(Args, Debug)]
struct OperationsCommand {
    #[command(subcommand)]
    command: OperationsSubcommand,
}

#[derive(Subcommand, Debug)]
enum OperationsSubcommand {
    Show,
    /// Change execution times, e.g. `set +=1000 '*=3000'`.
    Set {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
}

impl Command {
    /// Screen the command acts on; the router starts there.
    fn view(&self) -> View {
        match self {
            Self::Ping | Self::Home => View::Home,
            Self::Login(_) => View::Login,
            Self::Register(_) => View::Register,
            Self::Logout => View::Logout,
            Self::Profile(_) => View::Profile,
            Self::Expression(ExpressionCommand { command: ExpressionSubcommand::Submit { .. } }) => {
                View::InputExpression
            }
            Self::Expression(_) => View::ViewExpressions,
            Self::Operations(_) => View::Operations,
            Self::Servers => View::ComputingPowers,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let config =
        ClientConfig::from_values(cli.base_url.as_deref(), cli.timeout_ms.as_deref(), cli.session_file.as_deref())?;
    tracing::debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "config loaded");

    let app = App::from_config(&config, cli.command.view())?;
    match cli.command {
        Command::Ping => run_ping(&app).await,
        Command::Home => {
            run_home();
            Ok(())
        }
        Command::Login(args) => run_login(&app, args).await,
        Command::Register(args) => run_register(&app, args).await,
        Command::Logout => {
            settle(&app, logout::logout(app.store().as_ref()))?;
            println!("{LOGGED_OUT}");
            Ok(())
        }
        Command::Profile(profile) => run_profile(&app, profile).await,
        Command::Expression(expression) => run_expression(&app, expression).await,
        Command::Operations(operations) => run_operations(&app, operations).await,
        Command::Servers => run_servers(&app).await,
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn run_ping(app: &App) -> Result<(), CliError> {
    let pong = app.api().ping().await?;
    let message = if pong.message.is_empty() { "ok" } else { pong.message.as_str() };
    println!("{}: {message}", app.api().client().base_url());
    Ok(())
}

fn run_home() {
    println!("{}\n", home::DESCRIPTION);
    for view in home::LINKS {
        println!("  {:<20} {}", view.title(), view.path());
    }
}

async fn run_login(app: &App, args: CredentialArgs) -> Result<(), CliError> {
    let mut view = LoginView::new(args.login, args.password);
    let result = view.submit(app.api()).await;
    settle(app, result)?;
    report(view.notice.as_ref())
}

async fn run_register(app: &App, args: CredentialArgs) -> Result<(), CliError> {
    let mut view = RegisterView::new(args.login, args.password);
    let result = view.submit(app.api()).await;
    settle(app, result)?;
    report(view.notice.as_ref())
}

async fn run_profile(app: &App, profile: ProfileCommand) -> Result<(), CliError> {
    let mut view = ProfileView::new();
    match profile.command {
        ProfileSubcommand::Show => {
            let result = view.load(app.api()).await;
            settle(app, result)?;
            report(view.notice.as_ref())?;
            println!("login: {}", view.form.login);
            Ok(())
        }
        ProfileSubcommand::Update { old_password, login, new_password, confirm_password } => {
            view.form = ProfileForm { old_password, login, new_password, confirm_password };
            let result = view.submit(app.api()).await;
            settle(app, result)?;
            report(view.notice.as_ref())
        }
    }
}

async fn run_expression(app: &App, expression: ExpressionCommand) -> Result<(), CliError> {
    match expression.command {
        ExpressionSubcommand::Submit { expression } => {
            let mut view = InputExpressionView::new();
            view.on_change(&expression);
            let result = view.submit(app.api()).await;
            settle(app, result)?;
            report(view.notice.as_ref())?;
            if let Some(id) = view.accepted_id {
                println!("id: {id}");
            }
            Ok(())
        }
        ExpressionSubcommand::List => {
            let mut view = ViewExpressionsView::new();
            let result = view.load(app.api()).await;
            settle(app, result)?;
            report(view.notice.as_ref())?;
            print_expressions(&view.expressions);
            Ok(())
        }
    }
}

async fn run_operations(app: &App, operations: OperationsCommand) -> Result<(), CliError> {
    let mut view = OperationsView::new();
    let result = view.load(app.api()).await;
    settle(app, result)?;
    report(view.notice.as_ref())?;

    match operations.command {
        OperationsSubcommand::Show => {
            print_operation_times(&view.times);
            Ok(())
        }
        OperationsSubcommand::Set { assignments } => {
            for assignment in &assignments {
                let (operation, raw) =
                    assignment.split_once('=').ok_or_else(|| CliError::InvalidAssignment(assignment.clone()))?;
                view.edit(operation.trim(), raw.trim());
            }
            if !view.field_errors.is_empty() {
                let message = view
                    .field_errors
                    .iter()
                    .map(|(operation, message)| format!("{operation}: {message}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                return Err(CliError::Rejected(message));
            }
            let result = view.save(app.api()).await;
            settle(app, result)?;
            report(view.notice.as_ref())?;
            print_operation_times(&view.times);
            Ok(())
        }
    }
}

async fn run_servers(app: &App) -> Result<(), CliError> {
    let mut view = ComputingPowersView::new();
    let result = view.load(app.api()).await;
    settle(app, result)?;
    report(view.notice.as_ref())?;
    print_servers(&view.servers);
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

/// Route the outcome through the app; an expired session ends the command.
fn settle(app: &App, result: ViewResult) -> Result<(), CliError> {
    let expired = matches!(&result, Err(e) if e.is_unauthorized());
    app.settle(result)?;
    if expired {
        return Err(CliError::SessionExpired);
    }
    Ok(())
}

/// Print a success notice, or fail the command with an error notice.
fn report(notice: Option<&Notice>) -> Result<(), CliError> {
    match notice {
        Some(notice) if notice.is_error => Err(CliError::Rejected(notice.message.clone())),
        Some(notice) => {
            println!("{notice}");
            Ok(())
        }
        None => Ok(()),
    }
}

fn print_expressions(expressions: &[Expression]) {
    if expressions.is_empty() {
        println!("no expressions");
        return;
    }
    println!("{:>6}  {:<10}  {:<24}  {:>12}  SERVER", "ID", "STATUS", "EXPRESSION", "ANSWER");
    for e in expressions {
        println!("{:>6}  {:<10}  {:<24}  {:>12}  {}", e.id, e.ready.to_string(), e.value, e.answer, e.server_name);
    }
}

fn print_operation_times(times: &OperationTimes) {
    for (operation, ms) in times {
        println!("{operation:>3}  {ms} ms");
    }
}

fn print_servers(servers: &[ComputingServer]) {
    if servers.is_empty() {
        println!("no computing servers");
        return;
    }
    for server in servers {
        let ids = server.calculated_expressions.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        println!("{} [{}]: {}", server.server_name, server.server_status, ids);
    }
}
