use crate::prelude::Vehicle;

/// Keeps vehicles within `radius_m`, nearest first.
///
/// The sort is stable, so vehicles at equal distance keep feed order.
pub fn select_within(vehicles: Vec<Vehicle>, radius_m: u32) -> Vec<Vehicle> {
    let radius = f64::from(radius_m);
    let mut within: Vec<Vehicle> = vehicles
        .into_iter()
        .filter(|vehicle| vehicle.distance_m <= radius)
        .collect();
    within.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    within
}

#[cfg(test)]
pub(crate) fn vehicle_at(plate: &str, distance_m: f64) -> Vehicle {
    use crate::prelude::Coordinate;

    Vehicle {
        brand: "Toyota".into(),
        model: "Prius C".into(),
        plate: plate.into(),
        color: "Blue".into(),
        location: Coordinate::new(45.5, -73.6),
        distance_m,
    }
}
