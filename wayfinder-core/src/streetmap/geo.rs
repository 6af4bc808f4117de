//! Geodesy and name normalisation helpers.

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// Returns the haversine great-circle distance in metres between two
/// `(longitude, latitude)` positions given in degrees.
///
/// # Examples
/// ```
/// use wayfinder_core::streetmap::great_circle_distance;
///
/// // One degree of latitude along a meridian.
/// let metres = great_circle_distance((0.0, 0.0), (0.0, 1.0));
/// assert!((metres - 111_194.9).abs() < 0.1);
/// ```
#[must_use]
pub fn great_circle_distance(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lon1, lat1) = (from.0.to_radians(), from.1.to_radians());
    let (lon2, lat2) = (to.0.to_radians(), to.1.to_radians());
    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (lon2 - lon1) / 2.0;

    let a = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    // Rounding can push `a` a hair above one for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_METRES * c
}

/// Normalises a location name for matching: keeps ASCII letters and spaces
/// and lowercases the result.
///
/// # Examples
/// ```
/// use wayfinder_core::streetmap::clean_name;
///
/// assert_eq!(clean_name("Top Dog (Durant Ave.)"), "top dog durant ave");
/// ```
#[must_use]
pub fn clean_name(name: &str) -> String {
    name.chars()
        .filter(|ch| ch.is_ascii_alphabetic() || *ch == ' ')
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}
