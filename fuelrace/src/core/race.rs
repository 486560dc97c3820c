use crate::core::car::CarSettings;
use crate::core::step_source::{RandomSteps, StepSource};
use crate::core::vehicle::{Vehicle, VehiclePars};
use crate::post::race_result::RaceResult;
use helpers::general::{argmax, argsort, InputValueError, SortOrder};
use rand::Rng;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Marker every action log starts with.
pub const RACE_START: &str = "Race start";

/// * `name` - Name of the race, e.g. Supreme Challenge
/// * `target_distance` - (km) Distance at which the race ends
/// * `right_hand_drive` - Initial right-hand-drive setting shared by all cars
/// * `participants` - Participating vehicles, the order is kept during the race
#[derive(Debug, Deserialize, Clone)]
pub struct RacePars {
    pub name: String,
    pub target_distance: f64,
    #[serde(default)]
    pub right_hand_drive: bool,
    pub participants: Vec<VehiclePars>,
}

#[derive(Debug)]
pub struct Race {
    pub name: String,
    pub target_distance: f64,
    pub print_events: bool,
    pub no_steps: u32,
    participants: Vec<Box<dyn Vehicle>>,
    action_logs: HashMap<String, Vec<String>>,
    refuel_stops: HashMap<String, u32>,
    car_settings: Rc<CarSettings>,
}

impl Race {
    /// The method creates the race and all participating vehicles on the basis of the inserted
    /// parameters.
    pub fn from_pars(race_pars: &RacePars) -> anyhow::Result<Race> {
        let car_settings = Rc::new(CarSettings::new(race_pars.right_hand_drive));

        let participants = race_pars
            .participants
            .iter()
            .map(|vehicle_pars| vehicle_pars.build(&car_settings))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Race::new(
            &race_pars.name,
            participants,
            race_pars.target_distance,
            car_settings,
        )
    }

    /// The method creates a race from already built vehicles. `car_settings` must be the settings
    /// the participating cars were built with, so changes made through the race reach every car.
    pub fn new(
        name: &str,
        participants: Vec<Box<dyn Vehicle>>,
        target_distance: f64,
        car_settings: Rc<CarSettings>,
    ) -> anyhow::Result<Race> {
        anyhow::ensure!(
            !participants.is_empty(),
            InputValueError::new("a race needs at least one participant")
        );
        anyhow::ensure!(
            target_distance.is_finite() && target_distance > 0.0,
            InputValueError::new(format!(
                "target distance must be a positive number, got {}",
                target_distance
            ))
        );

        {
            let mut names = HashSet::with_capacity(participants.len());
            for vehicle in participants.iter() {
                if !names.insert(vehicle.name()) {
                    anyhow::bail!(InputValueError::new(format!(
                        "vehicle name {} is used more than once",
                        vehicle.name()
                    )));
                }
            }
        }

        // initialize action log and refuel counter for each vehicle
        let mut action_logs = HashMap::with_capacity(participants.len());
        let mut refuel_stops = HashMap::with_capacity(participants.len());

        for vehicle in participants.iter() {
            action_logs.insert(vehicle.name().to_owned(), vec![RACE_START.to_owned()]);
            refuel_stops.insert(vehicle.name().to_owned(), 0);
        }

        Ok(Race {
            name: name.to_owned(),
            target_distance,
            print_events: false,
            no_steps: 0,
            participants,
            action_logs,
            refuel_stops,
            car_settings,
        })
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHODS --------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// The method runs the race until a participant reaches the target distance, drawing the
    /// steps from the inserted random number generator. Returns the number of simulated steps.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> u32 {
        self.run_with(&mut RandomSteps::new(rng))
    }

    /// The method runs the race until a participant reaches the target distance. The termination
    /// condition is only checked between two steps. Returns the number of simulated steps.
    pub fn run_with<S: StepSource + ?Sized>(&mut self, steps: &mut S) -> u32 {
        let no_steps_start = self.no_steps;

        while self.simulate_step(steps) {}

        self.no_steps - no_steps_start
    }

    /// The method advances one participant chosen by the step source. The distance is added
    /// directly, i.e. without fuel accounting. Returns false if the race was already finished and
    /// nothing happened.
    pub fn simulate_step<S: StepSource + ?Sized>(&mut self, steps: &mut S) -> bool {
        if self.is_finished() {
            return false;
        }

        let idx = steps.pick_participant(self.participants.len()) % self.participants.len();
        let distance = steps.step_distance();

        let vehicle = &mut self.participants[idx];
        vehicle.base_mut().add_distance(distance);
        self.no_steps += 1;

        if self.print_events {
            println!(
                "DEBUG: Step {}: {} advanced {} km, now at {} km",
                self.no_steps,
                vehicle.name(),
                distance,
                vehicle.distance()
            );
        }

        let name = vehicle.name().to_owned();
        self.log_action(&name, format!("Advanced {} km", distance));

        true
    }

    /// The method refuels the named vehicle (a full tank if amount is not positive) and counts
    /// the stop. Returns the amount of fuel added.
    pub fn refuel_vehicle(&mut self, name: &str, amount: f64) -> anyhow::Result<f64> {
        anyhow::ensure!(
            !self.is_finished(),
            "Race {} is finished, {} cannot refuel anymore!",
            self.name,
            name
        );

        let idx = self
            .participants
            .iter()
            .position(|vehicle| vehicle.name() == name)
            .ok_or_else(|| {
                anyhow::anyhow!("Vehicle {} does not take part in race {}!", name, self.name)
            })?;

        let added = self.participants[idx].refuel(amount);

        *self.refuel_stops.entry(name.to_owned()).or_insert(0) += 1;
        self.log_action(name, format!("Refueled {:.2} l", added));

        Ok(added)
    }

    // ---------------------------------------------------------------------------------------------
    // METHODS (HELPERS) ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    fn log_action(&mut self, name: &str, action: String) {
        self.action_logs
            .entry(name.to_owned())
            .or_insert_with(Vec::new)
            .push(action);
    }

    pub fn is_finished(&self) -> bool {
        self.participants
            .iter()
            .any(|vehicle| vehicle.distance() >= self.target_distance)
    }

    pub fn participants(&self) -> &[Box<dyn Vehicle>] {
        &self.participants
    }

    pub fn car_settings(&self) -> &Rc<CarSettings> {
        &self.car_settings
    }

    pub fn action_log(&self, name: &str) -> Option<&[String]> {
        self.action_logs.get(name).map(|log| log.as_slice())
    }

    pub fn refuel_stops(&self, name: &str) -> Option<u32> {
        self.refuel_stops.get(name).copied()
    }

    fn get_distances(&self) -> Vec<f64> {
        self.participants
            .iter()
            .map(|vehicle| vehicle.distance())
            .collect()
    }

    /// The method returns the participant with the largest distance. If several participants
    /// share it, the first one in participant order wins.
    pub fn winner(&self) -> Option<&dyn Vehicle> {
        argmax(&self.get_distances()).map(|idx| &*self.participants[idx])
    }

    /// The method returns the results of all participants sorted by distance in descending order.
    /// Participants with equal distance keep their participant order.
    pub fn collect_results(&self) -> Vec<RaceResult<'_>> {
        argsort(&self.get_distances(), SortOrder::Descending)
            .into_iter()
            .map(|idx| {
                let vehicle = &*self.participants[idx];
                RaceResult {
                    vehicle,
                    distance: vehicle.distance(),
                    refuel_stops: self.refuel_stops(vehicle.name()).unwrap_or(0),
                    actions: self
                        .action_log(vehicle.name())
                        .map(|log| log.to_vec())
                        .unwrap_or_default(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::car::Car;
    use crate::core::motorcycle::Motorcycle;
    use crate::core::step_source::seeded_rng;
    use crate::core::vehicle::VehicleBase;
    use approx::assert_relative_eq;
    use std::collections::VecDeque;

    struct ScriptedSteps {
        picks: VecDeque<usize>,
        distances: VecDeque<f64>,
    }

    impl ScriptedSteps {
        fn new(picks: &[usize], distances: &[f64]) -> ScriptedSteps {
            ScriptedSteps {
                picks: picks.iter().copied().collect(),
                distances: distances.iter().copied().collect(),
            }
        }
    }

    impl StepSource for ScriptedSteps {
        fn pick_participant(&mut self, _no_participants: usize) -> usize {
            self.picks.pop_front().expect("script ran out of picks")
        }

        fn step_distance(&mut self) -> f64 {
            self.distances.pop_front().expect("script ran out of distances")
        }
    }

    fn car(name: &str, distance: f64) -> Box<dyn Vehicle> {
        Box::new(Car::new(
            VehicleBase::new(name, "Mazda", "RX-7", 50.0, 50.0, distance).unwrap(),
            false,
            Rc::new(CarSettings::default()),
        ))
    }

    fn moto(name: &str, distance: f64) -> Box<dyn Vehicle> {
        Box::new(
            Motorcycle::new(
                VehicleBase::new(name, "Yamaha", "R1", 18.0, 18.0, distance).unwrap(),
                998,
            )
            .unwrap(),
        )
    }

    fn new_race(
        participants: Vec<Box<dyn Vehicle>>,
        target_distance: f64,
    ) -> anyhow::Result<Race> {
        Race::new(
            "Test",
            participants,
            target_distance,
            Rc::new(CarSettings::default()),
        )
    }

    fn assert_invalid(result: anyhow::Result<Race>) {
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<InputValueError>().is_some(), "{}", err);
    }

    #[test]
    fn new_race_seeds_logs_and_counters() {
        let race = new_race(vec![car("A", 0.0), moto("B", 0.0)], 100.0).unwrap();
        assert_eq!(race.action_log("A"), Some(&[RACE_START.to_owned()][..]));
        assert_eq!(race.action_log("B"), Some(&[RACE_START.to_owned()][..]));
        assert_eq!(race.refuel_stops("A"), Some(0));
        assert_eq!(race.refuel_stops("C"), None);
        assert!(!race.is_finished());
    }

    #[test]
    fn invalid_races_are_rejected() {
        assert_invalid(new_race(vec![], 100.0));
        assert_invalid(new_race(vec![car("A", 0.0)], 0.0));
        assert_invalid(new_race(vec![car("A", 0.0)], -5.0));
        assert_invalid(new_race(vec![car("A", 0.0)], f64::NAN));
        assert_invalid(new_race(vec![car("A", 0.0), moto("A", 0.0)], 100.0));
    }

    #[test]
    fn scripted_race_stops_once_target_is_reached() {
        let mut race = new_race(vec![car("A", 0.0), car("B", 0.0)], 100.0).unwrap();
        let mut steps = ScriptedSteps::new(&[0, 0], &[60.0, 50.0]);

        assert_eq!(race.run_with(&mut steps), 2);
        assert!(steps.picks.is_empty() && steps.distances.is_empty());
        assert_eq!(race.winner().map(|v| v.name()), Some("A"));

        let results = race.collect_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].vehicle.name(), "A");
        assert_relative_eq!(results[0].distance, 110.0);
        assert_eq!(
            results[0].actions,
            vec![RACE_START, "Advanced 60 km", "Advanced 50 km"]
        );
        assert_eq!(results[1].vehicle.name(), "B");
        assert_eq!(results[1].distance, 0.0);
        assert_eq!(results[1].actions, vec![RACE_START]);
    }

    #[test]
    fn advancing_bypasses_fuel_accounting() {
        let mut race = new_race(vec![car("A", 0.0)], 1000.0).unwrap();
        let mut steps = ScriptedSteps::new(&[0], &[150.0]);

        assert!(race.simulate_step(&mut steps));
        let a = &race.participants()[0];
        assert_relative_eq!(a.distance(), 150.0);
        assert_relative_eq!(a.fuel(), 50.0);
    }

    #[test]
    fn finished_race_no_longer_changes() {
        let mut race = new_race(vec![car("A", 120.0), car("B", 0.0)], 100.0).unwrap();
        assert!(race.is_finished());

        let mut steps = ScriptedSteps::new(&[1], &[50.0]);
        assert_eq!(race.run_with(&mut steps), 0);
        assert!(!race.simulate_step(&mut steps));
        assert_eq!(race.participants()[1].distance(), 0.0);
        assert!(race.refuel_vehicle("B", 0.0).is_err());
        assert_eq!(race.refuel_stops("B"), Some(0));
    }

    #[test]
    fn results_are_sorted_and_ties_keep_participant_order() {
        let race = new_race(
            vec![car("A", 30.0), car("B", 80.0), moto("C", 30.0), moto("D", 80.0)],
            500.0,
        )
        .unwrap();

        let names: Vec<&str> = race
            .collect_results()
            .iter()
            .map(|result| result.vehicle.name())
            .collect();
        assert_eq!(names, vec!["B", "D", "A", "C"]);
        assert_eq!(race.winner().map(|v| v.name()), Some("B"));
    }

    #[test]
    fn refuelling_is_counted_and_logged() {
        let mut race = new_race(vec![car("A", 0.0), moto("B", 0.0)], 100.0).unwrap();
        race.participants[0].base_mut().burn_fuel(20.0);

        assert_relative_eq!(race.refuel_vehicle("A", 5.0).unwrap(), 5.0);
        assert_relative_eq!(race.refuel_vehicle("A", 0.0).unwrap(), 15.0);
        assert!(race.refuel_vehicle("Z", 0.0).is_err());

        let results = race.collect_results();
        let a = results.iter().find(|r| r.vehicle.name() == "A").unwrap();
        assert_eq!(a.refuel_stops, 2);
        assert_eq!(
            a.actions,
            vec![RACE_START, "Refueled 5.00 l", "Refueled 15.00 l"]
        );
        assert_relative_eq!(a.vehicle.fuel(), 50.0);
    }

    #[test]
    fn random_race_ends_with_one_vehicle_at_target() {
        for seed in 0..20 {
            let mut race = new_race(
                vec![car("A", 0.0), moto("B", 0.0), car("C", 0.0)],
                1000.0,
            )
            .unwrap();
            let no_steps = race.run(&mut seeded_rng(seed));

            assert!(no_steps >= 5);
            assert!(race.is_finished());

            let results = race.collect_results();
            assert!(results[0].distance >= 1000.0);
            assert!(results[0].distance < 1000.0 + 200.0);
            assert!(results[1..].iter().all(|r| r.distance < 1000.0));
            assert!(results.windows(2).all(|w| w[0].distance >= w[1].distance));
            assert_eq!(race.winner().map(|v| v.name()), Some(results[0].vehicle.name()));

            let no_logged: usize = results.iter().map(|r| r.actions.len() - 1).sum();
            assert_eq!(no_logged, no_steps as usize);
        }
    }

    #[test]
    fn equal_seeds_give_equal_races() {
        let run = |seed| {
            let mut race = new_race(vec![car("A", 0.0), moto("B", 0.0)], 500.0).unwrap();
            race.run(&mut seeded_rng(seed));
            race.participants()
                .iter()
                .map(|v| v.distance())
                .collect::<Vec<f64>>()
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn race_settings_reach_every_car() {
        let settings = Rc::new(CarSettings::new(false));
        let participants: Vec<Box<dyn Vehicle>> = ["A", "B"]
            .iter()
            .map(|name| {
                Box::new(Car::new(
                    VehicleBase::new(name, "Toyota", "AE86", 40.0, 40.0, 0.0).unwrap(),
                    true,
                    Rc::clone(&settings),
                )) as Box<dyn Vehicle>
            })
            .chain(std::iter::once(moto("M", 0.0)))
            .collect();

        let race = Race::new("Test", participants, 100.0, Rc::clone(&settings)).unwrap();
        let cars: Vec<&Car> = race
            .participants()
            .iter()
            .filter_map(|vehicle| vehicle.as_car())
            .collect();
        assert_eq!(cars.len(), 2);
        assert!(cars.iter().all(|car| !car.right_hand_drive()));

        race.car_settings().set_right_hand_drive(true);
        assert!(race.car_settings().right_hand_drive());
        assert!(cars.iter().all(|car| car.right_hand_drive()));
    }

    #[test]
    fn race_from_pars_shares_car_settings() {
        let race_pars: RacePars = serde_json::from_str(
            r#"{
                "name": "Test",
                "target_distance": 300,
                "right_hand_drive": true,
                "participants": [
                    {"kind": "Car", "name": "A", "brand": "Ford", "model": "Mustang",
                     "fuel_capacity": 60, "fuel": 60, "is_hybrid": false}
                ]
            }"#,
        )
        .unwrap();

        let race = Race::from_pars(&race_pars).unwrap();
        assert!(race.car_settings().right_hand_drive());
        assert_eq!(race.participants().len(), 1);
        assert_relative_eq!(race.target_distance, 300.0);
    }
}
