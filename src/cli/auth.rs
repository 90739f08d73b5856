//! Session commands: login, signup, logout, theme, config

use crate::api::SignupRequest;
use crate::error::{FinboardError, FinboardResult};

use super::context::AppContext;

/// Use the given password or ask for it without echo
fn password_or_prompt(password: Option<String>) -> FinboardResult<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

fn require_non_empty(value: &str, what: &str) -> FinboardResult<()> {
    if value.trim().is_empty() {
        return Err(FinboardError::Validation(format!("{} must not be empty", what)));
    }
    Ok(())
}

pub fn handle_login(ctx: &mut AppContext, login: &str, password: Option<String>) -> FinboardResult<()> {
    require_non_empty(login, "Login")?;
    let password = password_or_prompt(password)?;

    let user = ctx.api_client()?.login(login, &password)?;
    ctx.session.sign_in(user.auth_token, user.id.clone())?;

    println!("Logged in as user {}", user.id);
    Ok(())
}

pub fn handle_signup(
    ctx: &AppContext,
    name: String,
    username: String,
    email: String,
    password: Option<String>,
) -> FinboardResult<()> {
    require_non_empty(&name, "Name")?;
    require_non_empty(&username, "Username")?;
    if !email.contains('@') {
        return Err(FinboardError::Validation(format!(
            "Invalid email address: '{}'",
            email
        )));
    }
    let password = password_or_prompt(password)?;

    let request = SignupRequest {
        nome: name,
        email,
        senha: password,
        username,
    };
    let message = ctx.api_client()?.signup(&request)?;

    println!("{}", message.unwrap_or_else(|| "Account created.".to_string()));
    println!("Run 'finboard login {}' to sign in.", request.username);
    Ok(())
}

pub fn handle_logout(ctx: &mut AppContext) -> FinboardResult<()> {
    if !ctx.session.is_signed_in() {
        println!("Not logged in.");
        return Ok(());
    }
    ctx.session.sign_out()?;
    println!("Logged out.");
    Ok(())
}

/// `theme [dark|light|toggle]`; without a value, print the current theme
pub fn handle_theme(ctx: &mut AppContext, mode: Option<String>) -> FinboardResult<()> {
    let current = ctx.session.dark_mode();
    let dark = match mode.as_deref().map(|m| m.trim().to_lowercase()) {
        None => current,
        Some(m) if m == "dark" => true,
        Some(m) if m == "light" => false,
        Some(m) if m == "toggle" => !current,
        Some(m) => {
            return Err(FinboardError::Validation(format!(
                "Invalid theme: '{}'. Valid values: dark, light, toggle",
                m
            )))
        }
    };
    if mode.is_some() {
        ctx.session.set_dark_mode(dark)?;
    }
    println!("Theme: {}", if dark { "dark" } else { "light" });
    Ok(())
}

pub fn handle_config(ctx: &AppContext) -> FinboardResult<()> {
    println!("finboard configuration");
    println!("======================");
    println!("Data directory: {}", ctx.paths.base_dir().display());
    println!("Settings file:  {}", ctx.paths.settings_file().display());
    println!("Session file:   {}", ctx.paths.session_file().display());
    println!();
    println!("Settings:");
    println!("  API URL:        {}", ctx.settings.api_base());
    println!("  Currency:       {}", ctx.settings.currency_symbol);
    println!("  Date format:    {}", ctx.settings.date_format);
    println!("  UTC offset:     {} min", ctx.settings.utc_offset_minutes);
    println!();
    println!("Session:");
    match ctx.session.user_id() {
        Some(id) if ctx.session.is_signed_in() => println!("  Logged in as user {}", id),
        _ => println!("  Not logged in"),
    }
    println!(
        "  Theme:          {}",
        if ctx.session.dark_mode() { "dark" } else { "light" }
    );
    Ok(())
}
