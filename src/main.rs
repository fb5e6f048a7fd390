use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use signal_glue::data::loader::load_signal;
use signal_glue::data::polar::load_circular;
use signal_glue::{GlueConfig, Startup};

/// Desktop viewer that splices two signals across an interpolated gap.
#[derive(Parser, Debug)]
#[command(name = "signal-glue", version, about)]
struct Args {
    /// YAML or JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// First signal (.txt, .csv or .edf)
    signal1: Option<PathBuf>,

    /// Second signal
    signal2: Option<PathBuf>,

    /// Open the glue window on start (needs both signals)
    #[arg(long)]
    glue: bool,

    /// Comma-separated radii to show on the circular page
    #[arg(long, value_name = "CSV")]
    circular: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("loading config {:?}", path);
            GlueConfig::load(path)?
        }
        None => GlueConfig::default(),
    };

    let mut signals = Vec::new();
    for path in [&args.signal1, &args.signal2].into_iter().flatten() {
        match load_signal(path) {
            Ok(s) => signals.push(s),
            Err(e) => {
                error!("could not load {:?}: {e}", path);
                return Err(e.into());
            }
        }
    }

    let circular = match args.circular {
        Some(path) => Some((load_circular(&path)?, path)),
        None => None,
    };

    signal_glue::run_glue(
        config,
        Startup {
            signals,
            open_glue: args.glue,
            circular,
        },
    )?;
    Ok(())
}
