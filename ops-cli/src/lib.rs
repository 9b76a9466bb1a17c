//! `plantguard` command-line client
//!
//! Drives the session engine against a real authority:
//!
//! ```bash
//! plantguard login --email admin@x.com
//! plantguard status
//! plantguard users list
//! plantguard users set-role 12 staff
//! plantguard recover --email ana@x.com
//! plantguard logout
//! ```
//!
//! Passwords are prompted without echo unless passed with `--password`.

pub mod app;
pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plantguard")]
#[command(about = "Sign in to PlantGuard and manage users from the terminal", version)]
pub struct Cli {
    /// Configuration file (YAML, TOML or JSON)
    #[arg(long, short, global = true, env = "PLANTGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Authority base URL, overriding the configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Create a new account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Reset a forgotten password
    Recover {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the current session
    Status,

    /// Administer accounts (admin sessions only)
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List every account
    List,

    /// Change the role of an account
    SetRole {
        user_id: String,
        /// admin, staff or usuario
        role: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn set_role_takes_positional_arguments() {
        let cli = Cli::try_parse_from(["plantguard", "users", "set-role", "12", "staff"]).unwrap();
        match cli.command {
            Command::Users {
                command: UsersCommand::SetRole { user_id, role },
            } => {
                assert_eq!(user_id, "12");
                assert_eq!(role, "staff");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "plantguard",
            "login",
            "--email",
            "admin@x.com",
            "--base-url",
            "http://10.0.0.2:8000/api/",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.2:8000/api/"));
        assert!(matches!(cli.command, Command::Login { email: Some(_), password: None }));
    }

    #[test]
    fn register_requires_profile_fields() {
        assert!(Cli::try_parse_from(["plantguard", "register", "--username", "ana"]).is_err());
    }
}
