use crate::core::race::RacePars;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "fuelrace",
    about = "A stepwise race simulator for fuel-consuming cars and motorcycles"
)]
pub struct SimOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug printing of every race step
    #[clap(short, long)]
    pub debug: bool,

    /// Activate right-hand-drive mode for all cars (overrides the parameter file)
    #[clap(short, long)]
    pub right_hand_drive: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set number of simulation runs, a win tally is printed for more than one run
    #[clap(short, long, default_value = "1")]
    pub no_sim_runs: u32,

    /// Set path to the race parameter file (OPTIONAL: if not set, uses the built-in 6-vehicle race)
    #[clap(short, long)]
    pub parfile_path: Option<PathBuf>,

    /// Set seed of the random number generator for reproducible races
    #[clap(short, long)]
    pub seed: Option<u64>,
}

impl SimOpts {
    /// The method applies the command line settings that override the parameter file.
    pub fn apply_overrides(&self, race_pars: &mut RacePars) {
        if self.right_hand_drive {
            race_pars.right_hand_drive = true;
        }
    }
}
