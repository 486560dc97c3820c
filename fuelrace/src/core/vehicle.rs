use crate::core::car::{Car, CarSettings};
use crate::core::motorcycle::Motorcycle;
use helpers::general::InputValueError;
use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

/// (km/l) Base fuel efficiency shared by all vehicles unless a vehicle kind overrides its range.
pub const KM_PER_LITER: f64 = 10.0;

/// Parameters of a single participant as found in the parameter file. The `kind` field selects
/// the vehicle kind.
/// * `name` - Name of the vehicle, must be unique within a race
/// * `brand` - Brand, e.g. Mazda
/// * `model` - Model, e.g. RX-7
/// * `fuel_capacity` - (l) Tank capacity
/// * `fuel` - (l) Fuel in the tank at the start
/// * `distance` - (km) Distance already traveled at the start
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "kind")]
pub enum VehiclePars {
    Car {
        name: String,
        brand: String,
        model: String,
        fuel_capacity: f64,
        fuel: f64,
        #[serde(default)]
        distance: f64,
        is_hybrid: bool,
    },
    Motorcycle {
        name: String,
        brand: String,
        model: String,
        fuel_capacity: f64,
        fuel: f64,
        #[serde(default)]
        distance: f64,
        displacement: u32,
    },
}

impl VehiclePars {
    pub fn name(&self) -> &str {
        match self {
            VehiclePars::Car { name, .. } | VehiclePars::Motorcycle { name, .. } => name,
        }
    }

    /// The method creates the vehicle described by the parameters. Cars share the inserted
    /// settings.
    pub fn build(&self, car_settings: &Rc<CarSettings>) -> anyhow::Result<Box<dyn Vehicle>> {
        let vehicle: Box<dyn Vehicle> = match self {
            VehiclePars::Car {
                name,
                brand,
                model,
                fuel_capacity,
                fuel,
                distance,
                is_hybrid,
            } => Box::new(Car::new(
                VehicleBase::new(name, brand, model, *fuel_capacity, *fuel, *distance)?,
                *is_hybrid,
                Rc::clone(car_settings),
            )),
            VehiclePars::Motorcycle {
                name,
                brand,
                model,
                fuel_capacity,
                fuel,
                distance,
                displacement,
            } => Box::new(Motorcycle::new(
                VehicleBase::new(name, brand, model, *fuel_capacity, *fuel, *distance)?,
                *displacement,
            )?),
        };
        Ok(vehicle)
    }
}

/// VehicleBase holds the state every vehicle kind has in common. Fuel is kept within
/// [0, fuel_capacity] and the distance never decreases.
#[derive(Debug, Clone)]
pub struct VehicleBase {
    pub name: String,
    pub brand: String,
    pub model: String,
    fuel_capacity: f64,
    fuel: f64,
    distance: f64,
}

impl VehicleBase {
    pub fn new(
        name: &str,
        brand: &str,
        model: &str,
        fuel_capacity: f64,
        fuel: f64,
        distance: f64,
    ) -> anyhow::Result<VehicleBase> {
        anyhow::ensure!(
            !name.trim().is_empty(),
            InputValueError::new("vehicle name must not be empty")
        );
        anyhow::ensure!(
            fuel_capacity.is_finite() && fuel_capacity >= 0.0,
            InputValueError::new(format!(
                "fuel capacity of {} must be a non-negative number, got {}",
                name, fuel_capacity
            ))
        );
        anyhow::ensure!(
            fuel >= 0.0 && fuel <= fuel_capacity,
            InputValueError::new(format!(
                "fuel of {} must lie within [0, {}], got {}",
                name, fuel_capacity, fuel
            ))
        );
        anyhow::ensure!(
            distance.is_finite() && distance >= 0.0,
            InputValueError::new(format!(
                "initial distance of {} must be a non-negative number, got {}",
                name, distance
            ))
        );

        Ok(VehicleBase {
            name: name.to_owned(),
            brand: brand.to_owned(),
            model: model.to_owned(),
            fuel_capacity,
            fuel,
            distance,
        })
    }

    pub fn fuel_capacity(&self) -> f64 {
        self.fuel_capacity
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The method removes fuel from the tank without letting it drop below zero and returns the
    /// remaining fuel.
    pub fn burn_fuel(&mut self, amount: f64) -> f64 {
        self.fuel = (self.fuel - amount).max(0.0);
        self.fuel
    }

    pub(crate) fn add_distance(&mut self, distance: f64) {
        if distance > 0.0 {
            self.distance += distance;
        }
    }
}

/// Vehicle is implemented by every vehicle kind taking part in a race. Kinds only have to expose
/// their common state and may override the range calculation; travelling and refuelling are
/// shared.
pub trait Vehicle: fmt::Debug + fmt::Display {
    fn base(&self) -> &VehicleBase;

    fn base_mut(&mut self) -> &mut VehicleBase;

    /// (km) Distance that can be covered with the current fuel.
    fn range(&self) -> f64 {
        self.base().fuel() * KM_PER_LITER
    }

    fn describe_range(&self) -> String {
        format!(
            "With the current fuel the vehicle can travel {:.2} km.",
            self.range()
        )
    }

    /// The method tries to cover the inserted distance. If the range does not suffice, the tank
    /// is emptied, the reachable distance is covered and the remaining distance is returned.
    /// Otherwise 0 is returned.
    fn travel(&mut self, distance: f64) -> f64 {
        if !(distance > 0.0) {
            return 0.0;
        }

        let range = self.range();
        let base = self.base_mut();

        if distance <= range {
            base.burn_fuel(distance / KM_PER_LITER);
            base.add_distance(distance);
            0.0
        } else {
            base.fuel = 0.0;
            base.add_distance(range);
            distance - range
        }
    }

    /// The method fills the tank completely if amount is not positive, otherwise it adds as much
    /// of amount as fits. Returns the amount of fuel actually added.
    fn refuel(&mut self, amount: f64) -> f64 {
        let base = self.base_mut();
        let free = base.fuel_capacity - base.fuel;
        let added = if amount <= 0.0 { free } else { amount.min(free) };
        base.fuel += added;
        added
    }

    fn as_car(&self) -> Option<&Car> {
        None
    }

    fn as_motorcycle(&self) -> Option<&Motorcycle> {
        None
    }

    fn name(&self) -> &str {
        &self.base().name
    }

    fn fuel(&self) -> f64 {
        self.base().fuel()
    }

    fn fuel_capacity(&self) -> f64 {
        self.base().fuel_capacity()
    }

    fn distance(&self) -> f64 {
        self.base().distance()
    }
}

/// write_summary writes the summary line all vehicle kinds share. `extra` describes the
/// kind-specific parameter.
pub(crate) fn write_summary(
    f: &mut fmt::Formatter,
    kind: &str,
    base: &VehicleBase,
    extra: fmt::Arguments,
) -> fmt::Result {
    write!(
        f,
        "{} {} {}, capacity {:.2} l, fuel {:.2} l, {}, traveled {:.2} km",
        kind, base.brand, base.model, base.fuel_capacity, base.fuel, extra, base.distance
    )
}
