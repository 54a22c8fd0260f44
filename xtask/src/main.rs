use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const RELAY_PACKAGE: &str = "upload_relay_lambda";
const RELAY_BINARY: &str = "relay_lambda";
const DIST_DIR: &str = "dist";

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the upload relay workspace",
    long_about = "Runs CI checks and packages the relay Lambda binary into the\n\
                  zip artifact consumed by the deployment stack."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Formatting, clippy, and workspace tests
    Ci,
    /// Build the relay binary and write dist/relay_lambda.zip
    ServerlessPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn run_cargo(args: &[&str]) {
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo");
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn ci() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);

    step("Test upload_relay_core");
    run_cargo(&["test", "-p", "upload_relay_core"]);

    step("Test upload_relay_lambda");
    run_cargo(&["test", "-p", RELAY_PACKAGE]);
}

fn package_relay_lambda(target: &str, profile: BuildProfile) -> PathBuf {
    ensure_rust_target_installed(target);

    step("Build relay lambda binary");
    let mut args = vec![
        "build",
        "-p",
        RELAY_PACKAGE,
        "--bin",
        RELAY_BINARY,
        "--target",
        target,
    ];
    if matches!(profile, BuildProfile::Release) {
        args.push("--release");
    }
    run_cargo(&args);

    step("Package lambda zip artifact");
    let binary_path = Path::new("target")
        .join(target)
        .join(profile.dir_name())
        .join(RELAY_BINARY);
    let dist_dir = Path::new(DIST_DIR);
    fs::create_dir_all(dist_dir).expect("failed to create dist directory");

    let zip_path = dist_dir.join(format!("{RELAY_BINARY}.zip"));
    write_bootstrap_zip(&binary_path, &zip_path);
    zip_path
}

fn ensure_rust_target_installed(target: &str) {
    let output = match Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    {
        Ok(value) => value,
        Err(error) => {
            eprintln!("warning: could not query rustup targets ({error}); skipping preflight");
            return;
        }
    };

    let installed = String::from_utf8_lossy(&output.stdout);
    if output.status.success() && !installed.lines().any(|line| line.trim() == target) {
        panic!(
            "rust target `{target}` is not installed. run `rustup target add {target}` and retry `cargo run -p xtask -- serverless-package`"
        );
    }
}

/// The provided.al2023 runtime executes an entry named `bootstrap`.
fn write_bootstrap_zip(binary_path: &Path, zip_path: &Path) {
    let binary = fs::read(binary_path).unwrap_or_else(|error| {
        panic!(
            "failed to read lambda binary at '{}': {error}",
            binary_path.display()
        )
    });

    let file = fs::File::create(zip_path).expect("failed to create lambda zip");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to start bootstrap entry");
    zip.write_all(&binary)
        .expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finish lambda zip");
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => {
            ci();
            eprintln!("\nCI checks passed.");
        }
        Commands::ServerlessPackage { target, profile } => {
            let artifact = package_relay_lambda(&target, profile);
            eprintln!("\nPackaged artifact:\n- {}", artifact.display());
        }
    }
}
