//! Build automation tasks for Street Brawler
//!
//! Usage:
//!   cargo xtask build-web          # Build WASM into dist/web
//!   cargo xtask package-itch       # Zip dist/web for itch.io upload
//!   cargo xtask package-native     # Release binary plus assets in dist/native

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const BINARY: &str = "street-brawler";
const MQ_JS_BUNDLE: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Street Brawler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM and a page that hosts it
    BuildWeb {
        /// Mark as dev build (adds DEV to the page title)
        #[arg(long)]
        dev: bool,
    },
    /// Create zip file ready for itch.io upload
    PackageItch,
    /// Build a native release next to a copy of the assets
    PackageNative,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::PackageItch => package_itch(),
        Commands::PackageNative => package_native(),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src).with_context(|| format!("reading {}", src.display()))? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Empty a dist folder, creating it if needed
fn fresh_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Host page for the WASM build, sized to the default canvas
fn index_html(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  html, body {{ margin: 0; height: 100%; background: #14161c; }}
  canvas {{ display: block; margin: auto; width: 800px; height: 600px; }}
</style>
</head>
<body>
<canvas id="glcanvas" tabindex="1"></canvas>
<script src="mq_js_bundle.js"></script>
<script>load("{wasm}.wasm");</script>
</body>
</html>
"#,
        title = title,
        wasm = BINARY,
    )
}

/// Build WASM for web deployment
fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--target", "wasm32-unknown-unknown"]),
    )?;

    fresh_dir(&dist)?;

    println!("Copying files to dist/web...");
    let wasm = format!("{}.wasm", BINARY);
    std::fs::copy(root.join("target/wasm32-unknown-unknown/release").join(&wasm), dist.join(&wasm))?;

    let title = if dev { "[DEV] Street Brawler" } else { "Street Brawler" };
    std::fs::write(dist.join("index.html"), index_html(title))?;

    println!("Downloading {}...", MQ_JS_BUNDLE);
    run_cmd(
        Command::new("curl")
            .args(["-L", "-o"])
            .arg(dist.join("mq_js_bundle.js"))
            .arg(MQ_JS_BUNDLE),
    )?;

    copy_dir_recursive(&root.join("assets"), &dist.join("assets"))?;

    println!("Web build complete: dist/web/");
    Ok(())
}

/// Create zip for itch.io
fn package_itch() -> Result<()> {
    build_web(false)?;

    let dist = project_root()?.join("dist");
    let zip_name = format!("{}-itch.zip", BINARY);
    let zip_path = dist.join(&zip_name);

    if zip_path.exists() {
        std::fs::remove_file(&zip_path)?;
    }

    println!("Creating itch.io zip...");
    run_cmd(
        Command::new("zip")
            .current_dir(dist.join("web"))
            .arg("-r")
            .arg(format!("../{}", zip_name))
            .arg("."),
    )?;

    println!("itch.io package ready: dist/{}", zip_name);
    Ok(())
}

/// Native release build for the host platform
fn package_native() -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/native");

    println!("Building native release...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", BINARY]),
    )?;

    fresh_dir(&dist)?;

    let binary = if cfg!(target_os = "windows") {
        format!("{}.exe", BINARY)
    } else {
        BINARY.to_string()
    };
    std::fs::copy(root.join("target/release").join(&binary), dist.join(&binary))?;

    copy_dir_recursive(&root.join("assets"), &dist.join("assets"))?;

    println!("Native build complete: dist/native/");
    Ok(())
}
