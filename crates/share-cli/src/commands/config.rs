//! Configuration section commands

use std::path::Path;

use colored::Colorize;
use share_core::{AdminContext, ConfigPreview};

use super::diff::print_preview;
use super::shares::print_section;
use super::{SectionEdit, print_json};
use crate::error::{CliError, Result};

pub fn run_config_show(ctx: &AdminContext, section: Option<&str>, raw: bool, json: bool) -> Result<()> {
    if raw {
        print!("{}", ctx.raw_config()?);
        return Ok(());
    }

    match section {
        Some(name) => {
            let params = ctx.get_section(name)?;
            if json {
                return print_json(&params);
            }
            print_section(name, &params);
        }
        None => {
            let sections = ctx.sections()?;
            if json {
                return print_json(&sections);
            }
            for (i, (name, params)) in sections.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_section(name, params);
            }
        }
    }
    Ok(())
}

pub fn run_config_set(ctx: &AdminContext, section: &str, edit: &SectionEdit, dry_run: bool) -> Result<()> {
    if edit.is_empty() {
        return Err(CliError::user("Nothing to change: give KEY=VALUE parameters or --unset"));
    }
    let params = edit.apply(ctx.get_section(section)?);

    if dry_run {
        let preview = ctx.preview_update_section(section, &params)?;
        print_preview(&preview, &ctx.store.path().to_string_lossy());
        return Ok(());
    }

    ctx.update_section(section, &params)?;
    println!("{} Updated section {}", "OK".green().bold(), section.cyan());
    Ok(())
}

pub fn run_config_replace(ctx: &AdminContext, file: &Path, dry_run: bool) -> Result<()> {
    let text = std::fs::read_to_string(file).map_err(|e| {
        CliError::user(format!("Cannot read {}: {}", file.display(), e))
    })?;

    if dry_run {
        let preview = ConfigPreview {
            before: ctx.raw_config()?,
            after: text,
        };
        print_preview(&preview, &ctx.store.path().to_string_lossy());
        return Ok(());
    }

    ctx.save_raw_config(&text)?;
    println!(
        "{} Replaced {} and refreshed share ACLs",
        "OK".green().bold(),
        ctx.store.path().display()
    );
    Ok(())
}
