//! Share commands

use colored::Colorize;
use share_conf::Section;
use share_core::{AdminContext, Error, ProvisionReport};

use super::diff::print_preview;
use super::{SectionEdit, print_json};
use crate::error::{CliError, Result};

pub fn run_shares_list(ctx: &AdminContext, json: bool) -> Result<()> {
    let shares = ctx.list_shares()?;
    if json {
        return print_json(&shares);
    }

    if shares.is_empty() {
        println!("{}", "No shares defined.".dimmed());
        return Ok(());
    }
    for (name, share) in &shares {
        println!("  {:<20} {}", name.green(), share.path().unwrap_or("-").dimmed());
    }
    println!();
    println!("{} {} shares", "Total:".dimmed(), shares.len());
    Ok(())
}

pub fn run_shares_show(ctx: &AdminContext, name: &str, json: bool) -> Result<()> {
    let share = ctx.get_share(name)?;
    if json {
        return print_json(&share);
    }
    print_section(name, &share);
    Ok(())
}

pub fn run_shares_set(ctx: &AdminContext, name: &str, edit: &SectionEdit, dry_run: bool) -> Result<()> {
    if edit.is_empty() {
        return Err(CliError::user("Nothing to change: give KEY=VALUE parameters or --unset"));
    }

    let current = match ctx.get_share(name) {
        Ok(share) => share,
        Err(Error::NotFound { .. }) => Section::new(),
        Err(e) => return Err(e.into()),
    };
    let share = edit.apply(current);

    if dry_run {
        let preview = ctx.preview_upsert(name, &share)?;
        print_preview(&preview, &ctx.store.path().to_string_lossy());
        return Ok(());
    }

    let report = ctx.upsert_share(name, &share)?;
    print_report(&report);
    Ok(())
}

pub fn run_shares_delete(ctx: &AdminContext, name: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        let preview = ctx.preview_delete(name)?;
        print_preview(&preview, &ctx.store.path().to_string_lossy());
        return Ok(());
    }

    ctx.delete_share(name)?;
    println!("{} Removed share {}", "OK".green().bold(), name.cyan());
    println!("   {}", "Directory and ACL were left in place.".dimmed());
    Ok(())
}

pub fn run_shares_acl(ctx: &AdminContext, name: &str, json: bool) -> Result<()> {
    let acl = ctx.share_acl(name)?;
    if json {
        return print_json(&acl);
    }

    println!("{} {}", "Path:".bold(), acl.path);
    println!("{} {}:{}", "Owner:".bold(), acl.owner, acl.group);
    if let Some(mask) = &acl.mask {
        println!("{} {}", "Mask:".bold(), mask);
    }
    if let Some(mask) = &acl.default_mask {
        println!("{} {}", "Default mask:".bold(), mask);
    }
    if acl.entries.is_empty() {
        println!("{}", "No named entries.".dimmed());
        return Ok(());
    }

    println!();
    for entry in &acl.entries {
        let scope = if entry.is_default { "default" } else { "access" };
        println!(
            "  {:<8} {:<6} {:<20} {}",
            scope.dimmed(),
            entry.kind.to_string(),
            entry.principal.green(),
            entry.permission
        );
    }
    Ok(())
}

pub fn run_shares_refresh_acls(ctx: &AdminContext) -> Result<()> {
    let refreshed = ctx.refresh_acls()?;
    println!("{} Refreshed ACLs of {} shares", "OK".green().bold(), refreshed);
    Ok(())
}

pub(crate) fn print_section(name: &str, section: &Section) {
    println!("{}", format!("[{}]", name).cyan().bold());
    for (key, value) in section.iter() {
        println!("    {} = {}", key, value);
    }
}

fn print_report(report: &ProvisionReport) {
    for action in &report.actions {
        println!("  {} {}", "+".green(), action);
    }
    println!(
        "{} Share {} provisioned ({} stages)",
        "OK".green().bold(),
        report.share.cyan(),
        report.completed.len()
    );
}
