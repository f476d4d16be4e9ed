//! C4Forge command-line wizard.
//!
//! The binary wires configuration discovery, logging, and error reporting
//! around the interactive [`Wizard`]. A session normally reads commands from
//! stdin; `--script` replays them from a file instead, which is how the
//! end-to-end tests drive the program.

pub mod error_adapter;

mod args;
mod config;
mod wizard;

pub use args::Args;
pub use wizard::{Step, Wizard};

use std::{
    fs::File,
    io::{self, BufReader},
};

use log::info;

use c4forge::{C4ForgeError, DiagramBuilder};
use c4forge_core::model::ArchitectureModel;

/// Run one wizard session described by the parsed arguments.
///
/// # Errors
///
/// Returns `C4ForgeError::Io` when the configuration or script file cannot be
/// read, or when the terminal streams fail. Validation refusals inside the
/// session are reported to the user and do not end the run.
pub fn run(args: &Args) -> Result<(), C4ForgeError> {
    let app_config = config::load_config(args.config.as_deref())?;
    let builder = DiagramBuilder::new(app_config);
    let mut wizard = Wizard::new(builder, ArchitectureModel::new(), args.output.clone());

    let mut out = io::stdout().lock();
    match &args.script {
        Some(path) => {
            info!(path = path.as_str(); "Replaying script");
            let mut input = BufReader::new(File::open(path)?);
            wizard.run(&mut input, &mut out)
        }
        None => {
            let mut input = io::stdin().lock();
            wizard.run(&mut input, &mut out)
        }
    }
}
