//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, STORAGE_DIR_ENV};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Path => show_path(ctx),
        ConfigCommand::Init { force, format } => init_config(force, &format, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());
    ctx.output.kv("key", &ctx.config.storage.key);
    if std::env::var_os(STORAGE_DIR_ENV).is_some() {
        ctx.output.debug(&format!("dir overridden by {STORAGE_DIR_ENV}"));
    }

    ctx.output.info("[output]");
    ctx.output.kv("color", &ctx.config.output.color.to_string());
    ctx.output.kv(
        "show_cart_on_change",
        &ctx.config.output.show_cart_on_change.to_string(),
    );

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    let path = ctx.config_path.as_ref().map(|p| ctx.resolve_path(p));

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "path": path }));
        return Ok(());
    }

    match path {
        Some(path) => println!("{}", path.display()),
        None => ctx
            .output
            .info("No config file found. Run `vortex config init` to create one."),
    }
    Ok(())
}

fn init_config(force: bool, format: &str, ctx: &Context) -> Result<()> {
    let config_path = match format {
        "toml" => ctx.cwd.join("vortex.toml"),
        "json" => ctx.cwd.join("vortex.json"),
        other => bail!("Unknown config format '{}' (expected toml or json)", other),
    };

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if format == "json" {
        CliConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
