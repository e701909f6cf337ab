//! xtc: resolve GCC cross-toolchains and print the flags to drive them.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{Format, Invocation, Overrides};
use config::XtcConfig;

#[derive(Parser)]
#[command(name = "xtc", version, about = "Cross-toolchain resolver")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Toolchain catalog file (TOML or JSON)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Host platform the toolchain runs on (default: Linux-x86_64)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Directory toolchain archives are extracted into
    #[arg(long, global = true)]
    install_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Target settings accepted by every resolving command.
#[derive(Args, Default)]
struct TargetArgs {
    /// Settings profile (a TOML file with a [settings] table)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Setting override, e.g. -s compiler.libcxx=libstdc++11
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    settings: Vec<String>,

    /// Output format (text, json, toml)
    #[arg(long)]
    format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter xtc.toml in the current directory
    Init,
    /// Resolve the target settings to a concrete toolchain
    Resolve {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Print compiler flags and build-system variables for the toolchain
    Flags {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// List default and published target triplets
    Triplets,
    /// List GCC releases in the catalog
    Versions,
    /// Print the settings that identify the toolchain package
    PackageId {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Check a downloaded toolchain archive against the catalog checksum
    Verify {
        /// Archive file
        archive: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Show configuration and toolchain status
    Doctor {
        #[command(flatten)]
        target: TargetArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so that stdout stays machine-readable.
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install logger: {e}");
    }

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = XtcConfig::find_and_load(&cwd)?;

    let invocation = |target: &TargetArgs| -> anyhow::Result<Invocation> {
        let overrides = Overrides {
            catalog: cli.catalog.as_deref(),
            host: cli.host.as_deref(),
            install_root: cli.install_root.as_deref(),
            profile: target.profile.as_deref(),
            settings: &target.settings,
        };
        Invocation::build(&cwd, config.as_ref(), &overrides)
    };

    match &cli.command {
        Commands::Init => commands::init::run(&cwd),
        Commands::Resolve { target } => {
            commands::resolve::run(&invocation(target)?, Format::parse(target.format.as_deref())?)
        }
        Commands::Flags { target } => {
            commands::resolve::flags(&invocation(target)?, Format::parse(target.format.as_deref())?)
        }
        Commands::Triplets => commands::triplets::run(),
        Commands::Versions => commands::versions::run(&invocation(&TargetArgs::default())?),
        Commands::PackageId { target } => commands::package_id::run(
            &invocation(target)?,
            Format::parse(target.format.as_deref())?,
        ),
        Commands::Verify { archive, target } => {
            commands::verify::run(&invocation(target)?, archive)
        }
        Commands::Doctor { target } => {
            let config_dir = config.as_ref().map(|(_, dir)| dir.as_path());
            commands::doctor::run(&invocation(target)?, config_dir)
        }
    }
}
