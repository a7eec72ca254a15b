use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wirecut::{commands, init_logging, BUILD_DATE, VERSION};

#[derive(Parser)]
#[command(name = "wirecut")]
#[command(about = "Toolpath optimizer and G-code generator for hot-wire foam cutters", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a job file into a 2-axis program
    Optimize {
        /// Job file (.json) with contours and optional overrides
        job: PathBuf,
        /// Configuration file (.json or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Program output (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the optimized path as JSON
        #[arg(long)]
        path_json: Option<PathBuf>,
    },
    /// Synchronize root and tip profiles into a 4-axis program
    Taper {
        /// Root profile (.json)
        root: PathBuf,
        /// Tip profile (.json)
        tip: PathBuf,
        /// Configuration file (.json or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Program output (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the default configuration
    Config {
        /// Target file (.json or .toml; default: TOML on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json)?;
    tracing::debug!("wirecut {} (built {})", VERSION, BUILD_DATE);

    match cli.command {
        Commands::Optimize {
            job,
            config,
            output,
            path_json,
        } => commands::optimize(
            &job,
            config.as_deref(),
            output.as_deref(),
            path_json.as_deref(),
        )?,
        Commands::Taper {
            root,
            tip,
            config,
            output,
        } => commands::taper(&root, &tip, config.as_deref(), output.as_deref())?,
        Commands::Config { output } => commands::write_default_config(output.as_deref())?,
    }

    Ok(())
}
