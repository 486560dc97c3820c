use crate::core::vehicle::Vehicle;
use helpers::general::{argsort, SortOrder};
use std::fmt;

/// RaceResult contains the final state of one participant that is required for post-processing
/// the results. It is created once the race is over and borrows the vehicle from the race.
#[derive(Debug, Clone)]
pub struct RaceResult<'a> {
    pub vehicle: &'a dyn Vehicle,
    pub distance: f64,
    pub refuel_stops: u32,
    pub actions: Vec<String>,
}

/// winner_line returns the announcement of the race winner.
pub fn winner_line(winner: &dyn Vehicle) -> String {
    format!(
        "{} won with {} km traveled.",
        winner.name(),
        winner.distance()
    )
}

/// ResultTable formats a list of results (expected in ranking order) as a human-readable table,
/// one block per vehicle.
#[derive(Debug)]
pub struct ResultTable<'r, 'a>(pub &'r [RaceResult<'a>]);

impl fmt::Display for ResultTable<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, result) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{:2}. Vehicle: {}", i + 1, result.vehicle.name())?;
            writeln!(f, "    {}", result.vehicle)?;
            writeln!(f, "    Distance: {} km", result.distance)?;
            writeln!(f, "    Refuel stops: {}", result.refuel_stops)?;
            writeln!(f, "    Actions: {}", result.actions.join(", "))?;
        }
        Ok(())
    }
}

/// print_results prints the winner and the ranked results to the console output.
pub fn print_results(winner: Option<&dyn Vehicle>, results: &[RaceResult]) {
    if let Some(winner) = winner {
        println!("RESULT: {}", winner_line(winner));
    }
    println!("RESULT: Final standings");
    print!("{}", ResultTable(results));
}

/// WinTally counts the wins per vehicle over a series of races.
#[derive(Debug, Clone, Default)]
pub struct WinTally {
    pub no_races: u32,
    names: Vec<String>,
    wins: Vec<u32>,
}

impl WinTally {
    pub fn new(names: &[String]) -> WinTally {
        WinTally {
            no_races: 0,
            names: names.to_vec(),
            wins: vec![0; names.len()],
        }
    }

    /// The method counts a win for the named vehicle. Unknown names are appended.
    pub fn add_win(&mut self, name: &str) {
        self.no_races += 1;
        match self.names.iter().position(|x| x == name) {
            Some(idx) => self.wins[idx] += 1,
            None => {
                self.names.push(name.to_owned());
                self.wins.push(1);
            }
        }
    }

    pub fn get_wins(&self, name: &str) -> u32 {
        self.names
            .iter()
            .position(|x| x == name)
            .map_or(0, |idx| self.wins[idx])
    }

    /// The method returns (name, wins) pairs sorted by the number of wins in descending order.
    pub fn get_ranking(&self) -> Vec<(&str, u32)> {
        argsort(&self.wins, SortOrder::Descending)
            .into_iter()
            .map(|idx| (self.names[idx].as_str(), self.wins[idx]))
            .collect()
    }
}

impl fmt::Display for WinTally {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (name, wins) in self.get_ranking() {
            let share = if self.no_races > 0 {
                wins as f64 / self.no_races as f64 * 100.0
            } else {
                0.0
            };
            writeln!(f, "{:>12}: {:4} wins ({:5.1}%)", name, wins, share)?;
        }
        Ok(())
    }
}
