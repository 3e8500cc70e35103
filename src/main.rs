use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use zvm::install::ManualInstaller;
use zvm::paths::resolve_base_dir;
use zvm::runtime::RealRuntime;

/// zvm - toolchain version manager
///
/// Select which installed version is active by repointing `<root>/bin`.
///
/// The root defaults to ~/.zvm and can be overridden with ZVM_PATH.
///
/// Examples:
///   zvm use 0.11.0      # Activate an installed version
///   zvm use mach        # Switch to the mach version map
///   zvm vmu default     # Restore the built-in version map
#[derive(Parser, Debug)]
#[command(author, version = env!("ZVM_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base directory holding installed versions (overrides ZVM_PATH)
    #[arg(long = "root", short = 'r', value_name = "PATH", global = true)]
    pub root: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Make a version active, offering to install it if missing
    Use(UseArgs),

    /// Set the version map URL ("default" restores the built-in one)
    Vmu(VmuArgs),

    /// List installed versions
    #[command(alias = "list")]
    Ls,
}

#[derive(clap::Args, Debug)]
pub struct UseArgs {
    /// Version to activate, or one of the aliases "default" and "mach"
    #[arg(value_name = "VERSION")]
    pub version: String,
}

#[derive(clap::Args, Debug)]
pub struct VmuArgs {
    /// Version map URL, or "default"
    #[arg(value_name = "URL")]
    pub url: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    match cli.command {
        Commands::Use(args) => {
            let installer = ManualInstaller::new(resolve_base_dir(&runtime, cli.root.clone())?);
            zvm::commands::use_version(runtime, &installer, &args.version, cli.root)?
        }
        Commands::Vmu(args) => zvm::commands::set_version_map(runtime, &args.url, cli.root)?,
        Commands::Ls => zvm::commands::list(runtime, cli.root)?,
    }
    Ok(())
}
