use clap::Parser;
use fuelrace::core::handle_race::{handle_race, handle_race_series};
use fuelrace::post::race_result::print_results;
use fuelrace::pre::read_race_pars::{default_race_pars, read_race_pars};
use fuelrace::pre::sim_opts::SimOpts;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get simulation options from the command line arguments
    let sim_opts: SimOpts = SimOpts::parse();

    // get race parameters
    let mut race_pars = if let Some(parfile_path) = &sim_opts.parfile_path {
        println!("INFO: Reading race parameters from {:?}", parfile_path);
        read_race_pars(parfile_path)?
    } else {
        println!("INFO: No parameter file provided, using the built-in race");
        default_race_pars()
    };

    sim_opts.apply_overrides(&mut race_pars);

    anyhow::ensure!(
        sim_opts.no_sim_runs > 0,
        "Number of simulation runs must be at least 1!"
    );

    // EXECUTION -----------------------------------------------------------------------------------
    let t_start = Instant::now();

    if sim_opts.no_sim_runs == 1 {
        let race = handle_race(&race_pars, sim_opts.seed, sim_opts.debug)?;

        println!("INFO: Execution time: {}ms", t_start.elapsed().as_millis());

        // POST-PROCESSING -------------------------------------------------------------------------
        print_results(race.winner(), &race.collect_results());
    } else {
        println!(
            "INFO: Simulating {} runs of race {}",
            sim_opts.no_sim_runs, race_pars.name
        );
        let tally = handle_race_series(&race_pars, sim_opts.no_sim_runs, sim_opts.seed)?;

        println!("INFO: Execution time: {}ms", t_start.elapsed().as_millis());

        // POST-PROCESSING -------------------------------------------------------------------------
        println!("RESULT: Wins after {} races", tally.no_races);
        print!("{}", tally);
    }

    Ok(())
}
