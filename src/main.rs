use anyhow::{Context, Result};
use clap::Parser;

use levelbind::cli::{
    render_actions, render_check, render_list, render_list_json, render_paths, CliArgs, CliCommand,
};
use levelbind::keybind::KeybindRegistry;
use levelbind::EngineConfig;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    levelbind::tracing::init(levelbind::tracing::console_level(args.verbose));

    let config = EngineConfig::load();

    if args.command() == CliCommand::Actions {
        print!("{}", render_actions());
        return Ok(());
    }
    if args.command() == CliCommand::Paths {
        print!("{}", render_paths(&config, args.keybinds_path(&config).as_deref()));
        return Ok(());
    }

    let path = args
        .keybinds_path(&config)
        .context("No config directory available; pass --file")?;

    match args.command() {
        CliCommand::List { json } => {
            let mut registry = KeybindRegistry::load_or_bootstrap(&path);
            registry.apply_config(&config);
            if json {
                println!("{}", render_list_json(&registry)?);
            } else {
                print!("{}", render_list(&registry));
            }
        }
        CliCommand::Reset => {
            let mut registry = KeybindRegistry::new();
            registry.bootstrap_defaults();
            registry
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} default keybinds to {}", registry.len(), path.display());
        }
        CliCommand::Check => {
            let mut registry = KeybindRegistry::try_load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            registry.apply_config(&config);
            print!("{}", render_check(&registry));
        }
        CliCommand::Actions | CliCommand::Paths => {}
    }

    Ok(())
}
