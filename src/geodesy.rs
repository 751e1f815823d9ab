// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Mean radius of Earth, in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

/// Calculates the great-circle distance between two lon-lat positions
/// on Earth using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in miles.
///
/// Identical positions are exactly 0 miles apart.
pub fn distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let sin_dphi_half = ((lat2 - lat1).to_radians() * 0.5).sin();
    let sin_dlambda_half = ((lon2 - lon1).to_radians() * 0.5).sin();

    // Rounding may push `a` slightly outside of [0, 1] for antipodal points
    let a = (sin_dphi_half * sin_dphi_half
        + phi1.cos() * phi2.cos() * sin_dlambda_half * sin_dlambda_half)
        .clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    c * EARTH_RADIUS_MILES
}

/// Calculates the initial bearing of the great-circle path from the first
/// to the second position, in degrees.
///
/// The result is in the (-180, 180] range, where 0 is north and 90 is east.
/// Use [normalize_bearing] to get a compass bearing.
pub fn bearing(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    y.atan2(x).to_degrees()
}

/// Maps any bearing in degrees to the [0, 360) range.
pub fn normalize_bearing(bearing: f64) -> f64 {
    let b = bearing.rem_euclid(360.0);
    if b >= 360.0 {
        0.0
    } else {
        b
    }
}
