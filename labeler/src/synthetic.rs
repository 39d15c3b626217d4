use precip_common::point_cloud::PointTable;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Columns of a synthetic record: `[timestamp, x, y, z, intensity, tag,
/// return_nr]`.
pub const WIDTH: usize = 7;

/// `n` points with standard normal coordinates around the origin, uniform
/// timestamps and intensities in `[0, 1)`, tag 0 and return number 1.
pub fn gaussian_cloud(n: usize, seed: u64) -> PointTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut storage = Vec::with_capacity(n * WIDTH);
    for _ in 0..n {
        let timestamp = rng.random::<f64>();
        let x: f64 = StandardNormal.sample(&mut rng);
        let y: f64 = StandardNormal.sample(&mut rng);
        let z: f64 = StandardNormal.sample(&mut rng);
        let intensity = rng.random::<f64>();
        storage.extend_from_slice(&[timestamp, x, y, z, intensity, 0.0, 1.0]);
    }

    match PointTable::try_from_vec(storage, WIDTH) {
        Ok(table) => table,
        Err(_) => unreachable!("rows are pushed {WIDTH} values at a time"),
    }
}

#[cfg(test)]
mod tests {
    use precip_common::point_cloud::column;

    use super::*;

    #[test]
    fn test_gaussian_cloud() {
        let table = gaussian_cloud(500, 3);
        assert_eq!((table.width(), table.height()), (WIDTH, 500));
        assert_eq!(table, gaussian_cloud(500, 3));
        assert_ne!(table, gaussian_cloud(500, 4));

        assert!(table
            .column(column::INTENSITY)
            .all(|i| (0.0..1.0).contains(&i)));
        assert!(table.column(6).all(|r| r == 1.0));

        let mean_x = table.column(column::X).sum::<f64>() / 500.0;
        assert!(mean_x.abs() < 0.3);
    }
}
