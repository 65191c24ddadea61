//! Share Manager CLI
//!
//! Command-line administration of file shares: their configuration
//! sections, directory ACLs, disk usage and the sharing service.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use share_core::{AdminContext, Settings};

use cli::{Cli, Commands, ConfigAction, ServiceAction, SharesAction, UsageAction};
use commands::SectionEdit;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load();
    if let Some(conf) = &cli.conf {
        settings.samba_conf_path = conf.clone();
    }
    logging::init(cli.verbose || settings.debug);
    tracing::debug!(conf = %settings.samba_conf_path.display(), "Settings resolved");

    let Some(command) = cli.command else {
        println!("{} Share Manager CLI", "shareadm".green().bold());
        println!();
        println!("Run {} for available commands.", "shareadm --help".cyan());
        return Ok(());
    };

    let ctx = AdminContext::from_settings(&settings);
    execute_command(&ctx, command)
}

fn execute_command(ctx: &AdminContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Shares { action } => cmd_shares(ctx, action),
        Commands::Usage { action } => match action {
            UsageAction::Disks { all, json } => commands::run_usage_disks(ctx, all, json),
            UsageAction::Shares { json } => commands::run_usage_shares(ctx, json),
        },
        Commands::Config { action } => cmd_config(ctx, action),
        Commands::Service { action } => match action {
            ServiceAction::Status { json } => commands::run_service_status(ctx, json),
            ServiceAction::Restart => commands::run_service_restart(ctx),
        },
    }
}

fn cmd_shares(ctx: &AdminContext, action: SharesAction) -> Result<()> {
    match action {
        SharesAction::List { json } => commands::run_shares_list(ctx, json),
        SharesAction::Show { name, json } => commands::run_shares_show(ctx, &name, json),
        SharesAction::Set {
            name,
            params,
            unset,
            replace,
            dry_run,
        } => {
            let edit = SectionEdit {
                params,
                unset,
                replace,
            };
            commands::run_shares_set(ctx, &name, &edit, dry_run)
        }
        SharesAction::Delete { name, dry_run } => commands::run_shares_delete(ctx, &name, dry_run),
        SharesAction::Acl { name, json } => commands::run_shares_acl(ctx, &name, json),
        SharesAction::RefreshAcls => commands::run_shares_refresh_acls(ctx),
    }
}

fn cmd_config(ctx: &AdminContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show { section, raw, json } => {
            commands::run_config_show(ctx, section.as_deref(), raw, json)
        }
        ConfigAction::Set {
            section,
            params,
            unset,
            replace,
            dry_run,
        } => {
            let edit = SectionEdit {
                params,
                unset,
                replace,
            };
            commands::run_config_set(ctx, &section, &edit, dry_run)
        }
        ConfigAction::Replace { file, dry_run } => commands::run_config_replace(ctx, &file, dry_run),
    }
}
