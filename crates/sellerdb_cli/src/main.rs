//! Command line entry point.
//!
//! # Responsibility
//! - Open the database and inject the connection into repositories.
//! - Print sellers and departments in a stable, line-oriented format.

use clap::{Parser, Subcommand};
use log::error;
use sellerdb_core::{
    default_log_level, init_logging, open_db, open_db_in_memory, seed_demo_data, Department,
    DepartmentRepository, SellerRepository, SqliteDepartmentRepository, SqliteSellerRepository,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_SELLER_ID: i64 = 3;

#[derive(Debug, Parser)]
#[command(name = "sellerdb", version, about = "Query sellers and departments")]
struct Cli {
    /// SQLite database file; an in-memory database loaded with demo data is
    /// used when omitted.
    #[arg(long, env = "SELLERDB_PATH")]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "SELLERDB_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotated log files. Logging is off when omitted.
    #[arg(long, env = "SELLERDB_LOG_DIR")]
    log_dir: Option<String>,

    /// Load the demo departments and sellers into an empty database file.
    #[arg(long)]
    seed: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one seller with its department.
    Seller { id: i64 },
    /// List sellers by name, optionally for one department.
    Sellers {
        #[arg(long)]
        department: Option<i64>,
    },
    /// List departments by name.
    Departments,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the requested seller does not exist.
fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let mut conn = match cli.db.as_ref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    if should_seed(&cli) {
        seed_demo_data(&mut conn)?;
    }

    let sellers = SqliteSellerRepository::try_new(&conn)?;
    let departments = SqliteDepartmentRepository::try_new(&conn)?;

    match cli.command.unwrap_or(Command::Seller {
        id: DEFAULT_SELLER_ID,
    }) {
        Command::Seller { id } => match sellers.find_by_id(id)? {
            Some(seller) => println!("{seller}"),
            None => {
                println!("seller {id} not found");
                return Ok(false);
            }
        },
        Command::Sellers { department } => {
            let list = match department {
                Some(id) => sellers.find_by_department(&Department::reference(id))?,
                None => sellers.find_all()?,
            };
            for seller in list {
                println!("{seller}");
            }
        }
        Command::Departments => {
            for department in departments.find_all()? {
                println!("{department}");
            }
        }
    }

    Ok(true)
}

/// In-memory databases start empty, so they always get the demo data.
fn should_seed(cli: &Cli) -> bool {
    cli.seed || cli.db.is_none()
}

#[cfg(test)]
mod tests {
    use super::{should_seed, Cli, Command};
    use clap::Parser;

    #[test]
    fn in_memory_database_is_seeded() {
        let cli = Cli::try_parse_from(["sellerdb"]).unwrap();
        assert!(cli.db.is_none());
        assert!(cli.command.is_none());
        assert!(should_seed(&cli));
    }

    #[test]
    fn database_file_is_seeded_only_on_request() {
        let cli = Cli::try_parse_from(["sellerdb", "--db", "/tmp/sellers.sqlite3"]).unwrap();
        assert!(!should_seed(&cli));

        let cli = Cli::try_parse_from(["sellerdb", "--db", "/tmp/sellers.sqlite3", "--seed"])
            .unwrap();
        assert!(should_seed(&cli));
    }

    #[test]
    fn default_run_prints_demo_seller_three() {
        let cli = Cli::try_parse_from(["sellerdb"]).unwrap();
        assert!(super::run(cli).unwrap());
    }

    #[test]
    fn seller_subcommand_parses_id() {
        let cli = Cli::try_parse_from(["sellerdb", "seller", "5"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Seller { id: 5 })));
    }
}
