use crate::core::race::{Race, RacePars};
use crate::core::step_source::seeded_rng;
use crate::post::race_result::WinTally;

/// handle_race creates and simulates a race on the basis of the inserted parameters, and returns
/// the finished race for post-processing. Without a seed the thread-local random number generator
/// is used.
pub fn handle_race(
    race_pars: &RacePars,
    seed: Option<u64>,
    print_debug: bool,
) -> anyhow::Result<Race> {
    let mut race = Race::from_pars(race_pars)?;
    race.print_events = print_debug;

    println!(
        "INFO: Race {} has started with {} participants over {} km!",
        race.name,
        race.participants().len(),
        race.target_distance
    );

    if print_debug {
        for vehicle in race.participants() {
            println!("DEBUG: {}. {}", vehicle, vehicle.describe_range());
        }
    }

    let no_steps = match seed {
        Some(seed) => race.run(&mut seeded_rng(seed)),
        None => race.run(&mut rand::thread_rng()),
    };

    println!(
        "INFO: Race {} has finished after {} steps.",
        race.name, no_steps
    );

    Ok(race)
}

/// handle_race_series simulates the inserted number of independent races with the same
/// parameters and counts the winners. With a seed, run i uses seed + i.
pub fn handle_race_series(
    race_pars: &RacePars,
    no_sim_runs: u32,
    seed: Option<u64>,
) -> anyhow::Result<WinTally> {
    let names: Vec<String> = race_pars
        .participants
        .iter()
        .map(|vehicle_pars| vehicle_pars.name().to_owned())
        .collect();
    let mut tally = WinTally::new(&names);

    for i in 0..no_sim_runs {
        let mut race = Race::from_pars(race_pars)?;
        match seed {
            Some(seed) => race.run(&mut seeded_rng(seed.wrapping_add(i as u64))),
            None => race.run(&mut rand::thread_rng()),
        };

        if let Some(winner) = race.winner() {
            tally.add_win(winner.name());
        }
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pre::read_race_pars::default_race_pars;

    #[test]
    fn seeded_races_are_reproducible() {
        let race_pars = default_race_pars();
        let race_a = handle_race(&race_pars, Some(11), false).unwrap();
        let race_b = handle_race(&race_pars, Some(11), false).unwrap();

        assert!(race_a.is_finished());
        assert_eq!(race_a.no_steps, race_b.no_steps);
        assert_eq!(
            race_a.winner().map(|v| v.name().to_owned()),
            race_b.winner().map(|v| v.name().to_owned())
        );
    }

    #[test]
    fn invalid_pars_are_reported() {
        let mut race_pars = default_race_pars();
        race_pars.target_distance = -1.0;
        assert!(handle_race(&race_pars, Some(1), false).is_err());
        assert!(handle_race_series(&race_pars, 3, Some(1)).is_err());
    }

    #[test]
    fn series_counts_one_winner_per_run() {
        let tally = handle_race_series(&default_race_pars(), 25, Some(5)).unwrap();
        assert_eq!(tally.no_races, 25);
        let total: u32 = tally.get_ranking().iter().map(|(_, wins)| wins).sum();
        assert_eq!(total, 25);
    }
}
