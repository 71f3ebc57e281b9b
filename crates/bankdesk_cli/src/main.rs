//! `bankdesk` command-line front desk.
//!
//! # Responsibility
//! - Parse operator commands and route them to the use-case handlers.
//! - Own process setup: logging, connection settings, database lifetime.
//!
//! # Invariants
//! - The database is closed on every exit path after a successful open.
//! - A handler failure exits non-zero with the handler's message.

mod forms;
mod handlers;
mod render;

use anyhow::{bail, Context, Result};
use bankdesk_core::{
    default_log_level, init_logging, ConnectionSettings, Database, LogConfig, RecordId,
    SchemaVariant,
};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use forms::{BranchForm, ContactForm, CustomerForm, EmployeeForm};
use handlers::{ActionResponse, DetailResponse, ListResponse};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bankdesk",
    version,
    about = "Manage bank branches, employees, customers and contacts"
)]
struct Cli {
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files (defaults to ./logs).
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Schema variant override: bank|contacts (defaults to DB_Variant).
    #[arg(long, global = true)]
    variant: Option<SchemaVariant>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bank branches.
    #[command(subcommand)]
    Branch(BranchCommand),
    /// Branch employees.
    #[command(subcommand)]
    Employee(EmployeeCommand),
    /// Branch customers.
    #[command(subcommand)]
    Customer(CustomerCommand),
    /// Address-book contacts (contacts schema only).
    #[command(subcommand)]
    Contact(ContactCommand),
}

#[derive(Subcommand, Debug)]
enum BranchCommand {
    List,
    Search { term: String },
    Show { id: RecordId },
    Add(BranchForm),
    Update {
        id: RecordId,
        #[command(flatten)]
        form: BranchForm,
    },
    Delete { id: RecordId },
}

#[derive(Subcommand, Debug)]
enum EmployeeCommand {
    List,
    Search { term: String },
    Show { id: RecordId },
    Add(EmployeeForm),
    Update {
        id: RecordId,
        #[command(flatten)]
        form: EmployeeForm,
    },
    Delete { id: RecordId },
}

#[derive(Subcommand, Debug)]
enum CustomerCommand {
    List,
    Search { term: String },
    Show { id: RecordId },
    Add(CustomerForm),
    Update {
        id: RecordId,
        #[command(flatten)]
        form: CustomerForm,
    },
    Delete { id: RecordId },
}

#[derive(Subcommand, Debug)]
enum ContactCommand {
    List,
    Search { term: String },
    Show { id: RecordId },
    Add(ContactForm),
    Update {
        id: RecordId,
        #[command(flatten)]
        form: ContactForm,
    },
    Delete { id: RecordId },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logging(&cli)?;

    let mut settings = ConnectionSettings::from_env().context("invalid DB settings")?;
    if let Some(variant) = cli.variant {
        settings.variant = variant;
    }

    let mut db = Database::open(&settings)
        .with_context(|| format!("failed to open database `{}`", settings.database))?;
    let outcome = run(&db, cli.command);
    db.close().context("failed to close database")?;
    outcome
}

fn init_cli_logging(cli: &Cli) -> Result<()> {
    // The logger only accepts absolute directories.
    let cwd = std::env::current_dir().context("cannot resolve working directory")?;
    let log_dir = match &cli.log_dir {
        Some(dir) => cwd.join(dir),
        None => cwd.join("logs"),
    };
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());

    let mut config = LogConfig::new(level, log_dir);
    config.echo_to_stderr = true;
    init_logging(&config).context("failed to initialize logging")?;
    info!("event=cli_start module=cli status=ok");
    Ok(())
}

fn run(db: &Database, command: Commands) -> Result<()> {
    match command {
        Commands::Branch(command) => match command {
            BranchCommand::List => print_list(handlers::load_branches(db), render::branch_table),
            BranchCommand::Search { term } => print_list(
                handlers::search_branches(db, &term),
                render::branch_table,
            ),
            BranchCommand::Show { id } => {
                print_detail(handlers::select_branch(db, id), render::branch_table)
            }
            BranchCommand::Add(form) => print_action(handlers::save_branch(db, None, &form)),
            BranchCommand::Update { id, form } => {
                print_action(handlers::update_branch(db, id, &form))
            }
            BranchCommand::Delete { id } => print_action(handlers::delete_branch(db, id)),
        },
        Commands::Employee(command) => match command {
            EmployeeCommand::List => {
                print_list(handlers::load_employees(db), render::employee_table)
            }
            EmployeeCommand::Search { term } => print_list(
                handlers::search_employees(db, &term),
                render::employee_table,
            ),
            EmployeeCommand::Show { id } => {
                print_detail(handlers::select_employee(db, id), render::employee_table)
            }
            EmployeeCommand::Add(form) => print_action(handlers::save_employee(db, None, &form)),
            EmployeeCommand::Update { id, form } => {
                print_action(handlers::update_employee(db, id, &form))
            }
            EmployeeCommand::Delete { id } => print_action(handlers::delete_employee(db, id)),
        },
        Commands::Customer(command) => match command {
            CustomerCommand::List => {
                print_list(handlers::load_customers(db), render::customer_table)
            }
            CustomerCommand::Search { term } => print_list(
                handlers::search_customers(db, &term),
                render::customer_table,
            ),
            CustomerCommand::Show { id } => {
                print_detail(handlers::select_customer(db, id), render::customer_table)
            }
            CustomerCommand::Add(form) => print_action(handlers::save_customer(db, None, &form)),
            CustomerCommand::Update { id, form } => {
                print_action(handlers::update_customer(db, id, &form))
            }
            CustomerCommand::Delete { id } => print_action(handlers::delete_customer(db, id)),
        },
        Commands::Contact(command) => match command {
            ContactCommand::List => print_list(handlers::load_contacts(db), render::contact_table),
            ContactCommand::Search { term } => print_list(
                handlers::search_contacts(db, &term),
                render::contact_table,
            ),
            ContactCommand::Show { id } => {
                print_detail(handlers::select_contact(db, id), render::contact_table)
            }
            ContactCommand::Add(form) => print_action(handlers::save_contact(db, None, &form)),
            ContactCommand::Update { id, form } => {
                print_action(handlers::update_contact(db, id, &form))
            }
            ContactCommand::Delete { id } => print_action(handlers::delete_contact(db, id)),
        },
    }
}

fn print_list<T>(response: ListResponse<T>, table: fn(&[T]) -> Table) -> Result<()> {
    if !response.ok {
        bail!("{}", response.message);
    }
    if !response.items.is_empty() {
        println!("{}", table(&response.items));
    }
    println!("{}", response.message);
    Ok(())
}

fn print_detail<T>(response: DetailResponse<T>, table: fn(&[T]) -> Table) -> Result<()> {
    match response.item {
        Some(item) if response.ok => {
            println!("{}", table(std::slice::from_ref(&item)));
            Ok(())
        }
        _ => bail!("{}", response.message),
    }
}

fn print_action(response: ActionResponse) -> Result<()> {
    if !response.ok {
        bail!("{}", response.message);
    }
    match response.record_id {
        Some(id) => println!("{} (id {id})", response.message),
        None => println!("{}", response.message),
    }
    Ok(())
}
