use crate::core::vehicle::{write_summary, Vehicle, VehicleBase, KM_PER_LITER};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// (km/l) Efficiency bonus of hybrid cars.
pub const HYBRID_BONUS: f64 = 5.0;
/// (km) Fuel equivalent burnt by a skid of a hybrid car.
const SKID_COST_HYBRID: f64 = 6.25;
/// (km) Fuel equivalent burnt by a skid of a conventional car.
const SKID_COST: f64 = 7.5;

/// CarSettings contains the configuration shared by all cars of a race. It is handed to every car
/// by reference counting, so a change is seen by all of them at once.
#[derive(Debug, Default)]
pub struct CarSettings {
    right_hand_drive: Cell<bool>,
}

impl CarSettings {
    pub fn new(right_hand_drive: bool) -> CarSettings {
        CarSettings {
            right_hand_drive: Cell::new(right_hand_drive),
        }
    }

    pub fn set_right_hand_drive(&self, right_hand_drive: bool) {
        self.right_hand_drive.set(right_hand_drive)
    }

    pub fn right_hand_drive(&self) -> bool {
        self.right_hand_drive.get()
    }
}

#[derive(Debug)]
pub struct Car {
    base: VehicleBase,
    pub is_hybrid: bool,
    settings: Rc<CarSettings>,
}

impl Car {
    pub fn new(base: VehicleBase, is_hybrid: bool, settings: Rc<CarSettings>) -> Car {
        Car {
            base,
            is_hybrid,
            settings,
        }
    }

    /// The method performs a skid which burns some extra fuel, less for hybrid cars. Returns the
    /// remaining fuel, the tank does not drop below empty.
    pub fn perform_skid(&mut self) -> f64 {
        let skid_cost = if self.is_hybrid {
            SKID_COST_HYBRID
        } else {
            SKID_COST
        };
        self.base.burn_fuel(skid_cost / KM_PER_LITER)
    }

    pub fn right_hand_drive(&self) -> bool {
        self.settings.right_hand_drive()
    }
}

impl Vehicle for Car {
    fn base(&self) -> &VehicleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut VehicleBase {
        &mut self.base
    }

    fn as_car(&self) -> Option<&Car> {
        Some(self)
    }

    fn range(&self) -> f64 {
        let bonus = if self.is_hybrid { HYBRID_BONUS } else { 0.0 };
        self.base.fuel() * (KM_PER_LITER + bonus)
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_summary(f, "Car", &self.base, format_args!("hybrid: {}", self.is_hybrid))
    }
}
