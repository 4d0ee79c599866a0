use anyhow::Result;
use campusdesk_core::session::{NavItem, Role};
use colored::Colorize;
use serde::Serialize;

use super::{Output, heading};
use crate::app::App;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView<'a> {
    authenticated: bool,
    role: Role,
    email: &'static str,
    nav: &'a [NavItem],
    ai_configured: bool,
}

pub async fn login(app: &App, out: &Output, role: Role) -> Result<()> {
    if !out.is_json() {
        println!("{}", format!("Signing in as {}...", role.display_label()).bright_black());
    }
    app.session.login(role).await;
    status(app, out).await
}

pub async fn logout(app: &App, out: &Output) -> Result<()> {
    app.session.logout().await;
    if !out.json(&serde_json::json!({ "authenticated": false }))? {
        println!("{}", "Signed out.".bright_green());
    }
    Ok(())
}

pub async fn status(app: &App, out: &Output) -> Result<()> {
    let state = app.session.state().await;
    let nav = app.session.nav_items().await;
    let view = StatusView {
        authenticated: state.authenticated,
        role: state.role,
        email: state.role.email(),
        nav,
        ai_configured: app.gateway_configured(),
    };
    if out.json(&view)? {
        return Ok(());
    }

    if !state.authenticated {
        println!("Not signed in. Run `campusdesk login <student|admin>`.");
        return Ok(());
    }

    heading("CampusDesk");
    println!("Signed in as {} <{}>", state.role.display_label().bold(), view.email);
    if !view.ai_configured {
        println!("{}", "AI features are offline: no Gemini API key configured.".yellow());
    }
    println!();
    for item in nav {
        println!("  {:<18} {}", item.label, item.view.to_string().bright_black());
    }
    Ok(())
}
