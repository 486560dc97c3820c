pub mod car;
pub mod handle_race;
pub mod motorcycle;
pub mod race;
pub mod step_source;
pub mod vehicle;
