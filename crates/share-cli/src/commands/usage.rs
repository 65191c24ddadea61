//! Usage commands

use colored::Colorize;
use share_core::AdminContext;

use super::print_json;
use crate::error::Result;

pub fn run_usage_disks(ctx: &AdminContext, all: bool, json: bool) -> Result<()> {
    let filesystems: Vec<_> = ctx
        .filesystem_usage()?
        .into_iter()
        .filter(|fs| all || !fs.is_virtual)
        .collect();
    if json {
        return print_json(&filesystems);
    }

    println!(
        "{}",
        format!(
            "{:<20} {:>6} {:>6} {:>6} {:>5}  {}",
            "Filesystem", "Size", "Used", "Avail", "Use%", "Mounted on"
        )
        .bold()
    );
    for fs in &filesystems {
        let percent = format!("{:>4.0}%", fs.use_percent);
        let percent = if fs.use_percent >= 90.0 {
            percent.red().to_string()
        } else {
            percent
        };
        println!(
            "{:<20} {:>6} {:>6} {:>6} {}  {}",
            fs.display_name, fs.size, fs.used, fs.available, percent, fs.mounted_on
        );
    }
    Ok(())
}

pub fn run_usage_shares(ctx: &AdminContext, json: bool) -> Result<()> {
    let shares = ctx.share_usage()?;
    if json {
        return print_json(&shares);
    }

    if shares.is_empty() {
        println!("{}", "No measurable shares.".dimmed());
        return Ok(());
    }
    println!(
        "{}",
        format!("{:<20} {:>8} {:>8} {:>7}  {}", "Share", "Used", "Of", "Use%", "Path").bold()
    );
    for share in &shares {
        println!(
            "{:<20} {:>8} {:>8} {:>6.1}%  {}",
            share.name.green(),
            share.used,
            share.size,
            share.use_percent,
            share.path.dimmed()
        );
    }
    Ok(())
}
