use crate::core::vehicle::{write_summary, Vehicle, VehicleBase};
use helpers::general::InputValueError;
use std::fmt;

/// (km/l) Base fuel efficiency of motorcycles.
pub const MOTO_KM_PER_LITER: f64 = 20.0;
/// (km) Fuel equivalent burnt by a wheelie.
const WHEELIE_COST: f64 = 6.5;

/// Motorcycle range depends on the engine displacement: the smaller the engine, the larger the
/// efficiency gain on top of the base rate. Engines above 1000 cc fall below the base rate.
#[derive(Debug)]
pub struct Motorcycle {
    base: VehicleBase,
    displacement: u32,
}

impl Motorcycle {
    pub fn new(base: VehicleBase, displacement: u32) -> anyhow::Result<Motorcycle> {
        anyhow::ensure!(
            displacement > 0,
            InputValueError::new(format!(
                "displacement of {} must be positive",
                base.name
            ))
        );
        Ok(Motorcycle { base, displacement })
    }

    /// (cc)
    pub fn displacement(&self) -> u32 {
        self.displacement
    }

    /// The method performs a wheelie which burns some extra fuel. Returns the remaining fuel, the
    /// tank does not drop below empty.
    pub fn perform_wheelie(&mut self) -> f64 {
        self.base.burn_fuel(WHEELIE_COST / MOTO_KM_PER_LITER)
    }
}

impl Vehicle for Motorcycle {
    fn base(&self) -> &VehicleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut VehicleBase {
        &mut self.base
    }

    fn as_motorcycle(&self) -> Option<&Motorcycle> {
        Some(self)
    }

    fn range(&self) -> f64 {
        let adjustment = 1.0 - self.displacement as f64 / 1000.0;
        self.base.fuel() * (MOTO_KM_PER_LITER + adjustment * MOTO_KM_PER_LITER)
    }
}

impl fmt::Display for Motorcycle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_summary(
            f,
            "Motorcycle",
            &self.base,
            format_args!("displacement {} cc", self.displacement),
        )
    }
}
