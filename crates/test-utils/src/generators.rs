//! Travel-time generators for synthetic surfaces.
//!
//! Values are seconds per vertex, row-major over a `cols x rows` lattice, in
//! the layout [`crate::LatticeSource`] assigns vertex ids.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seconds growing linearly with lattice distance from `(origin_col, origin_row)`.
///
/// ```
/// use test_utils::radial_times;
///
/// let times = radial_times(3, 3, (1, 1), 60);
/// assert_eq!(times[4], 0);
/// assert_eq!(times[5], 60);
/// ```
pub fn radial_times(cols: u32, rows: u32, origin: (u32, u32), seconds_per_cell: i64) -> Vec<i64> {
    let mut times = Vec::with_capacity(cols as usize * rows as usize);
    for row in 0..rows {
        for col in 0..cols {
            let dx = f64::from(col) - f64::from(origin.0);
            let dy = f64::from(row) - f64::from(origin.1);
            let cells = (dx * dx + dy * dy).sqrt();
            times.push((cells * seconds_per_cell as f64).round() as i64);
        }
    }
    times
}

/// Reproducible random seconds in `[min, max]`.
pub fn random_times(count: usize, min: i64, max: i64, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(min..=max)).collect()
}
