//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_ADMIN_PASSWORD, DEFAULT_SERVER_HOST};

/// Employee Management System - HTTP API and admin tooling
#[derive(Parser, Debug)]
#[command(name = "ems")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Create the admin account, or reset its password if it exists
    SeedAdmin(SeedAdminArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = DEFAULT_SERVER_HOST, env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "SERVER_PORT")]
    pub port: u16,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the seed-admin command
#[derive(Parser, Debug)]
pub struct SeedAdminArgs {
    #[arg(long, default_value = domain::DEFAULT_ADMIN_EMAIL, env = "ADMIN_EMAIL")]
    pub email: String,

    #[arg(long, default_value = DEFAULT_ADMIN_PASSWORD, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long, default_value = domain::DEFAULT_ADMIN_NAME)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn migrate_up_parses() {
        let cli = Cli::try_parse_from(["ems", "migrate", "up"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Up
            })
        ));
    }

    #[test]
    fn seed_admin_takes_overrides() {
        let cli = Cli::try_parse_from([
            "ems",
            "seed-admin",
            "--email",
            "root@example.com",
            "--name",
            "Root",
        ])
        .unwrap();

        match cli.command {
            Commands::SeedAdmin(args) => {
                assert_eq!(args.email, "root@example.com");
                assert_eq!(args.name, "Root");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
