//! Seeded point clouds and priority streams.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use wayfinder_core::Point;

use super::SyntheticError;

/// Configuration for [`generate_points`].
#[derive(Clone, Debug)]
pub struct PointCloudConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Points are drawn uniformly from `[0, extent)` on both axes.
    pub extent: f64,
    /// Seed for the generator.
    pub seed: u64,
}

/// Generates a uniform point cloud.
///
/// # Errors
/// Returns [`SyntheticError::ZeroPoints`] when `point_count` is zero and
/// [`SyntheticError::InvalidFloatParameter`] when `extent` is not a positive
/// finite number.
///
/// # Examples
/// ```
/// use wayfinder_benches::source::{PointCloudConfig, generate_points};
///
/// let points = generate_points(&PointCloudConfig {
///     point_count: 16,
///     extent: 10.0,
///     seed: 7,
/// })?;
/// assert_eq!(points.len(), 16);
/// # Ok::<(), wayfinder_benches::source::SyntheticError>(())
/// ```
pub fn generate_points(config: &PointCloudConfig) -> Result<Vec<Point>, SyntheticError> {
    if config.point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if !config.extent.is_finite() || config.extent <= 0.0 {
        return Err(SyntheticError::InvalidFloatParameter { parameter: "extent" });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    Ok((0..config.point_count)
        .map(|_| {
            Point::new(
                rng.gen_range(0.0..config.extent),
                rng.gen_range(0.0..config.extent),
            )
        })
        .collect())
}

/// Generates `count` priorities in `[0, 1000)`.
#[must_use]
pub fn generate_priorities(count: usize, seed: u64) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(0.0..1_000.0)).collect()
}
