#![warn(clippy::pedantic)]
//! Command line front end for mapforge.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::info;

use mapforge::config::CONFIG_FILE;
use mapforge::{ForgeConfig, MAPFORGE_VERSION, TemplateRunner, catalog, samples};

#[derive(Parser)]
#[command(author, version, about = "Compile trigger templates into RTS map INI sections.")]
struct Cli {
    /// Settings file; missing files fall back to defaults.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a template's records into a fresh INI file.
    Build {
        template: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Merge a template's records into an existing map.
    Append {
        template: String,
        #[arg(long)]
        map: Option<PathBuf>,
    },
    /// Write an HTML graph of a template's triggers.
    Preview {
        template: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate Rust constants from the game's rules, eva and sound lists.
    Catalog {
        #[arg(long)]
        ini_dir: Option<PathBuf>,
        #[arg(long)]
        dest: Option<PathBuf>,
        #[arg(long)]
        suffix: Option<String>,
    },
    /// List the bundled templates.
    Templates,
}

fn runner(name: &str, config: &ForgeConfig) -> Result<TemplateRunner> {
    let template = samples::find(name).ok_or_else(|| {
        let known: Vec<String> = samples::bundled().iter().map(|t| t.name().to_string()).collect();
        anyhow!("unknown template '{name}' (available: {})", known.join(", "))
    })?;
    Ok(TemplateRunner::from_boxed(template).with_team_defaults(config.team_defaults.clone()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    info!("mapforge {MAPFORGE_VERSION}");
    let config = ForgeConfig::load(&cli.config);

    match cli.command {
        Commands::Build { template, out } => {
            let out = out.unwrap_or_else(|| config.output.clone());
            runner(&template, &config)?
                .build(&out)
                .with_context(|| format!("while building '{template}' into '{}'", out.display()))?;
            println!("wrote {}", out.display());
        },
        Commands::Append { template, map } => {
            let map = map
                .or_else(|| config.map.clone())
                .context("no map given: pass --map or set `map` in the config file")?;
            runner(&template, &config)?
                .append(&map)
                .with_context(|| format!("while appending '{template}' to '{}'", map.display()))?;
            println!("updated {}", map.display());
        },
        Commands::Preview { template, out } => {
            let out = out.unwrap_or_else(|| config.preview.clone());
            runner(&template, &config)?
                .preview(&out)
                .with_context(|| format!("while writing preview of '{template}'"))?;
            println!("wrote {}", out.display());
        },
        Commands::Catalog { ini_dir, dest, suffix } => {
            let ini_dir = ini_dir.unwrap_or_else(|| config.ini_dir.clone());
            let dest = dest.unwrap_or_else(|| config.catalog_dest.clone());
            let suffix = suffix.unwrap_or_else(|| config.suffix.clone());
            let generated = catalog::generate_catalog(&ini_dir, &dest, &suffix)
                .with_context(|| format!("while reading lists from '{}'", ini_dir.display()))?;
            for list in &generated.lists {
                println!("{:>20}: {}", list.section, list.names.len());
            }
            println!("wrote {}", dest.display());
        },
        Commands::Templates => {
            for template in samples::bundled() {
                println!("{:<16} {}", template.name(), template.description());
            }
        },
    }
    Ok(())
}
