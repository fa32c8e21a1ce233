use anyhow::{bail, Context, Result};
use tracing::info;

use super::AppContext;
use crate::api::types::{AuthResponse, LoginRequest, RegisterRequest};
use crate::cli::{LoginArgs, RegisterArgs};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// Client-side checks run before the register request is sent. Returns the
/// first problem found.
pub fn validate_registration(args: &RegisterArgs) -> Result<(), String> {
    if args.username.trim().chars().count() < MIN_USERNAME_LEN {
        return Err(format!(
            "username must be at least {MIN_USERNAME_LEN} characters"
        ));
    }
    if args.full_name.trim().is_empty() {
        return Err("full name is required".to_string());
    }
    let email = args.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("a valid email address is required".to_string());
    }
    if args.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

pub async fn register(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
    if let Err(problem) = validate_registration(&args) {
        bail!(problem);
    }
    let request = RegisterRequest {
        username: args.username.trim().to_string(),
        full_name: args.full_name.trim().to_string(),
        email: args.email.trim().to_string(),
        password: args.password,
    };
    let auth = ctx
        .api()?
        .register(&request)
        .await
        .context("registration failed")?;
    remember(ctx, &auth)?;
    println!("Welcome, {}! You are logged in.", auth.user.full_name);
    Ok(())
}

pub async fn login(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    let request = LoginRequest {
        email: args.email.trim().to_string(),
        password: args.password,
    };
    let auth = ctx.api()?.login(&request).await.context("login failed")?;
    remember(ctx, &auth)?;
    println!("Logged in as {}.", auth.user.username);
    Ok(())
}

/// Store the new login. A different account must not inherit the previous
/// user's team id or draft.
fn remember(ctx: &AppContext, auth: &AuthResponse) -> Result<()> {
    let previous = ctx.session.user()?;
    if previous.is_some_and(|u| u.id != auth.user.id) {
        ctx.session.clear_auth()?;
    }
    ctx.session.save_auth(&auth.token, &auth.user)?;
    info!(username = %auth.user.username, "logged in");
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.session.clear_auth()?;
    info!("logged out");
    println!("Logged out.");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.session.user()? {
        Some(user) => {
            println!("{} ({})", user.username, user.email);
            if !user.full_name.is_empty() {
                println!("{}", user.full_name);
            }
            if let Some(team_id) = ctx.session.team_id()? {
                println!("Team: {team_id}");
            }
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
