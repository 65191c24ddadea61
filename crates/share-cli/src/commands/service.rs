//! Service commands

use colored::Colorize;
use share_core::AdminContext;

use super::print_json;
use crate::error::Result;

pub fn run_service_status(ctx: &AdminContext, json: bool) -> Result<()> {
    let status = ctx.service_status()?;
    if json {
        return print_json(&status);
    }

    let state = if status.active {
        status.status.green().bold()
    } else {
        status.status.red().bold()
    };
    println!("{}: {}", status.service.bold(), state);
    if status.active && !status.since.is_empty() {
        println!("  {} {}", "Up:".dimmed(), status.uptime);
        println!("  {} {}", "Since:".dimmed(), status.since);
    }
    Ok(())
}

pub fn run_service_restart(ctx: &AdminContext) -> Result<()> {
    ctx.restart_service()?;
    println!(
        "{} Refreshed share ACLs and reloaded {}",
        "OK".green().bold(),
        ctx.service.name()
    );
    Ok(())
}
