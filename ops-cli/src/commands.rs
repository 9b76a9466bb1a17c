use crate::app::{user_error, with_spinner, App};
use crate::{Command, UsersCommand};
use anyhow::Result;
use auth_identity::RegistrationProfile;
use colored::Colorize;
use credential_store::Role;
use dialoguer::{Input, Password};
use error_common::PlantGuardError;
use session_manager::{Route, SessionState};

pub async fn execute(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => login(app, email, password).await,
        Command::Register {
            username,
            first_name,
            last_name,
            email,
            password,
        } => {
            let (password, confirm_password) = match password {
                Some(password) => (password.clone(), password),
                None => (prompt_secret("Password")?, prompt_secret("Confirm password")?),
            };
            let profile = RegistrationProfile {
                username,
                first_name,
                last_name,
                email,
                password,
                confirm_password,
            };
            with_spinner("Creating account...", app.session.register(&profile))
                .await
                .map_err(user_error)?;
            println!("{} account created; sign in with `plantguard login`", "✓".green());
            Ok(())
        }
        Command::Recover { email, password } => recover(app, &email, password).await,
        Command::Logout => {
            app.session.logout().await.map_err(user_error)?;
            println!("{} signed out", "✓".green());
            Ok(())
        }
        Command::Status => {
            status(app);
            Ok(())
        }
        Command::Users { command } => users(app, command).await,
    }
}

async fn login(app: &App, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => prompt_secret("Password")?,
    };

    let home = with_spinner("Signing in...", app.session.login(&email, &password))
        .await
        .map_err(user_error)?;

    if let SessionState::Authenticated { role, .. } = app.session.state() {
        println!("{} signed in as {} → {}", "✓".green(), role.to_string().bold(), home);
    }
    Ok(())
}

async fn recover(app: &App, email: &str, password: Option<String>) -> Result<()> {
    let exists = with_spinner("Checking email...", app.session.verify_recovery_email(email))
        .await
        .map_err(user_error)?;
    if !exists {
        return Err(user_error(PlantGuardError::Validation(
            "No account is registered with that email.".to_string(),
        )));
    }

    let (new_secret, confirm_secret) = match password {
        Some(password) => (password.clone(), password),
        None => (prompt_secret("New password")?, prompt_secret("Confirm new password")?),
    };
    with_spinner(
        "Updating password...",
        app.session.reset_password(email, &new_secret, &confirm_secret),
    )
    .await
    .map_err(user_error)?;

    println!("{} password changed", "✓".green());
    Ok(())
}

fn status(app: &App) {
    match app.session.state() {
        SessionState::Authenticated { role, user_id } => {
            println!("{} {}", "session:".bold(), "signed in".green());
            println!("  role:    {role}");
            println!("  user id: {user_id}");
            println!("  screen:  {}", app.navigation.current());
        }
        _ => println!("{} {}", "session:".bold(), "signed out".yellow()),
    }
}

async fn users(app: &App, command: UsersCommand) -> Result<()> {
    app.session
        .authorize_route(Route::AdminResearcher)
        .map_err(user_error)?;

    match command {
        UsersCommand::List => {
            let users = with_spinner("Loading users...", app.directory.list_users())
                .await
                .map_err(user_error)?;
            println!("{:<8} {:<20} {:<32} {}", "ID".bold(), "USERNAME".bold(), "EMAIL".bold(), "ROLE".bold());
            for user in users {
                println!("{:<8} {:<20} {:<32} {}", user.id.to_string(), user.username, user.email, user.role);
            }
        }
        UsersCommand::SetRole { user_id, role } => {
            let role = Role::parse(&role);
            with_spinner("Updating role...", app.directory.update_role(&user_id, role))
                .await
                .map_err(user_error)?;
            println!("{} user {} is now {}", "✓".green(), user_id, role.to_string().bold());
        }
    }
    Ok(())
}

fn prompt_secret(prompt: &str) -> Result<String> {
    Ok(Password::new().with_prompt(prompt).interact()?)
}
