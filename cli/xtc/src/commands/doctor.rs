//! `xtc doctor`: configuration and toolchain diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;
use xtc_resolve::{derive_flags, CompilerKind};

use super::Invocation;

/// Print what the resolver sees and whether the toolchain is installed.
pub fn run(inv: &Invocation, config_dir: Option<&Path>) -> Result<()> {
    println!("=== xtc doctor ===");
    println!();
    println!("xtc version: {}", env!("CARGO_PKG_VERSION"));
    match config_dir {
        Some(dir) => println!("xtc.toml:    found in {}", dir.display()),
        None => println!("xtc.toml:    not found"),
    }
    println!("Host:        {}", inv.host_platform);
    println!("Install:     {}", inv.install_root.display());
    println!();

    println!("--- Catalog ---");
    let catalog = match inv.catalog() {
        Ok(c) => c,
        Err(e) => {
            println!("  error: {e:#}");
            return Ok(());
        }
    };
    println!("  Releases: {}", catalog.releases().len());
    if let Some(latest) = catalog.max_version() {
        println!("  Latest:   {latest}");
    }
    println!("  Hosts:    {}", catalog.hosts().join(", "));
    println!();

    println!("--- Target ---");
    let request = match inv.request() {
        Ok(r) => r,
        Err(e) => {
            println!("  {e:#}");
            return Ok(());
        }
    };
    let resolved = match inv.resolver(&catalog).resolve(&request) {
        Ok(r) => r,
        Err(e) => {
            println!("  resolution failed: {e}");
            return Ok(());
        }
    };
    println!("  Triplet:     {}", resolved.triplet);
    println!("  GCC version: {}", resolved.gcc_version);
    let toolchain_dir = resolved.toolchain_dir();
    if !toolchain_dir.is_dir() {
        println!("  Installed:   no ({} missing)", toolchain_dir.display());
        return Ok(());
    }
    println!("  Installed:   {}", toolchain_dir.display());

    match resolved.compiler {
        CompilerKind::Gcc => {
            let gxx = resolved.bin_dir().join(format!("{}-g++", resolved.triplet));
            print_tool_status(&gxx, &["--version"]);
        }
        CompilerKind::Clang | CompilerKind::IntelCc => match derive_flags(&resolved) {
            Ok(flags) => println!("  Flags:       {}", flags.cflags.join(" ")),
            Err(e) => println!("  Flags:       {e}"),
        },
    }
    Ok(())
}

fn print_tool_status(exe: &Path, args: &[&str]) {
    println!("  Compiler:    {}", tool_status(exe, args));
}

/// First line of the tool's version output, or why it could not be run.
fn tool_status(exe: &Path, args: &[&str]) -> String {
    match Command::new(exe).args(args).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            version
                .lines()
                .next()
                .unwrap_or("(unknown version)")
                .to_string()
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            match stderr.lines().next() {
                Some(line) => format!("{} failed ({}): {line}", exe.display(), output.status),
                None => format!("{} failed ({})", exe.display(), output.status),
            }
        }
        Err(_) => format!("{} not runnable", exe.display()),
    }
}
