use crate::core::race::RacePars;
use crate::core::vehicle::VehiclePars;
use anyhow::Context;
use std::fs::OpenOptions;
use std::path::Path;

/// read_race_pars reads the JSON file and decodes the JSON string into the race parameters
/// struct.
pub fn read_race_pars(filepath: &Path) -> anyhow::Result<RacePars> {
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open parameter file {}!",
            filepath.display()
        ))?;
    let pars = serde_json::from_reader(&fh).context(format!(
        "Failed to parse parameter file {}!",
        filepath.display()
    ))?;
    Ok(pars)
}

fn car(name: &str, brand: &str, model: &str, fuel_capacity: f64, is_hybrid: bool) -> VehiclePars {
    VehiclePars::Car {
        name: name.to_owned(),
        brand: brand.to_owned(),
        model: model.to_owned(),
        fuel_capacity,
        fuel: fuel_capacity,
        distance: 0.0,
        is_hybrid,
    }
}

fn motorcycle(
    name: &str,
    brand: &str,
    model: &str,
    fuel_capacity: f64,
    displacement: u32,
) -> VehiclePars {
    VehiclePars::Motorcycle {
        name: name.to_owned(),
        brand: brand.to_owned(),
        model: model.to_owned(),
        fuel_capacity,
        fuel: fuel_capacity,
        distance: 0.0,
        displacement,
    }
}

/// default_race_pars returns the built-in race that is used if no parameter file is inserted: six
/// vehicles with full tanks racing over 1000 km.
pub fn default_race_pars() -> RacePars {
    RacePars {
        name: "Supreme Challenge".to_owned(),
        target_distance: 1000.0,
        right_hand_drive: false,
        participants: vec![
            car("Lightning", "Mazda", "RX-7", 50.0, false),
            car("Thunder", "Toyota", "AE86", 40.0, true),
            motorcycle("Flash", "Yamaha", "R1", 18.0, 998),
            car("Typhoon", "Ford", "Mustang", 60.0, false),
            motorcycle("Cyclone", "Ducati", "Panigale V4", 17.0, 1103),
            car("Hurricane", "Lamborghini", "Huracan", 85.0, true),
        ],
    }
}
