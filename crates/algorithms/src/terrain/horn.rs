//! Horn (1981) aspect and slope
//!
//! Both layers come from the same 3x3 finite-difference gradient:
//! ```text
//! a b c
//! d e f
//! g h i
//! ```
//! dz/dx = z * ((c + 2f + i) - (a + 2d + g)) / (8 * cell_width)
//! dz/dy = z * ((g + 2h + i) - (a + 2b + c)) / (8 * cell_height)
//!
//! Edge cells and cells with a no-data neighbour are NaN.

use super::TerrainDerivatives;
use crate::maybe_rayon::*;
use aspectslope_core::raster::Raster;
use aspectslope_core::{Error, Result};

/// Gradients below this are treated as flat ground with no facing direction
const FLAT_THRESHOLD: f64 = 1e-12;

/// Built-in [`TerrainDerivatives`] using Horn's method.
#[derive(Debug, Clone, Copy, Default)]
pub struct HornDerivatives;

impl TerrainDerivatives for HornDerivatives {
    fn derive_aspect(&self, dem: &Raster<f64>, z_factor: f64) -> Result<Raster<f64>> {
        aspect(dem, z_factor)
    }

    fn derive_slope(&self, dem: &Raster<f64>, z_factor: f64) -> Result<Raster<f64>> {
        slope(dem, z_factor)
    }
}

/// Aspect in degrees clockwise from north (0 = N, 90 = E).
///
/// Flat cells have no facing direction and are NaN.
pub fn aspect(dem: &Raster<f64>, z_factor: f64) -> Result<Raster<f64>> {
    horn_map(dem, z_factor, |dz_dx, dz_dy| {
        if dz_dx.abs() < FLAT_THRESHOLD && dz_dy.abs() < FLAT_THRESHOLD {
            return f64::NAN;
        }
        // Downslope direction in (east, north): (-dz/dx, +dz/dy), rows run south
        let bearing = (-dz_dx).atan2(dz_dy).to_degrees();
        if bearing < 0.0 {
            bearing + 360.0
        } else {
            bearing
        }
    })
}

/// Slope in degrees, `0..=90`.
pub fn slope(dem: &Raster<f64>, z_factor: f64) -> Result<Raster<f64>> {
    horn_map(dem, z_factor, |dz_dx, dz_dy| {
        (dz_dx * dz_dx + dz_dy * dz_dy).sqrt().atan().to_degrees()
    })
}

fn horn_map<F>(dem: &Raster<f64>, z_factor: f64, f: F) -> Result<Raster<f64>>
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    if !z_factor.is_finite() || z_factor <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "z_factor",
            value: z_factor.to_string(),
            reason: "must be positive and finite".into(),
        });
    }

    let gt = dem.transform();
    let (cell_w, cell_h) = (gt.cell_width(), gt.cell_height());
    if !(cell_w > 0.0 && cell_h > 0.0 && cell_w.is_finite() && cell_h.is_finite()) {
        return Err(Error::InvalidParameter {
            name: "cell_size",
            value: format!("{}x{}", cell_w, cell_h),
            reason: "DEM cells must have a positive finite size".into(),
        });
    }

    let (rows, cols) = dem.shape();
    let cells = dem.data();
    let x_scale = z_factor / (8.0 * cell_w);
    let y_scale = z_factor / (8.0 * cell_h);

    let output_data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];
            if row == 0 || row + 1 >= rows {
                return row_data;
            }

            for col in 1..cols.saturating_sub(1) {
                let a = cells[(row - 1, col - 1)];
                let b = cells[(row - 1, col)];
                let c = cells[(row - 1, col + 1)];
                let d = cells[(row, col - 1)];
                let e = cells[(row, col)];
                let ff = cells[(row, col + 1)];
                let g = cells[(row + 1, col - 1)];
                let h = cells[(row + 1, col)];
                let i = cells[(row + 1, col + 1)];

                if [a, b, c, d, e, ff, g, h, i].iter().any(|&v| dem.is_nodata(v)) {
                    continue;
                }

                let dz_dx = ((c + 2.0 * ff + i) - (a + 2.0 * d + g)) * x_scale;
                let dz_dy = ((g + 2.0 * h + i) - (a + 2.0 * b + c)) * y_scale;

                row_data[col] = f(dz_dx, dz_dy);
            }

            row_data
        })
        .collect();

    dem.derive(output_data, Some(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use aspectslope_core::GeoTransform;

    fn plane(rows: usize, cols: usize, f: impl Fn(usize, usize) -> f64) -> Raster<f64> {
        let data = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| f(r, c))
            .collect();
        let mut dem = Raster::from_vec(data, rows, cols).unwrap();
        dem.set_transform(GeoTransform::new(0.0, rows as f64, 1.0, -1.0));
        dem
    }

    #[test]
    fn north_facing_plane() {
        // Higher in the south (high row), falls away to the north
        let dem = plane(5, 5, |r, _| r as f64);
        let val = aspect(&dem, 1.0).unwrap().get(2, 2).unwrap();
        assert!(val.abs() < 1e-9 || (val - 360.0).abs() < 1e-9, "got {}", val);
    }

    #[test]
    fn east_and_south_facing_planes() {
        let east = plane(5, 5, |_, c| -(c as f64));
        assert_relative_eq!(aspect(&east, 1.0).unwrap().get(2, 2).unwrap(), 90.0, epsilon = 1e-9);

        let south = plane(5, 5, |r, _| -(r as f64));
        assert_relative_eq!(aspect(&south, 1.0).unwrap().get(2, 2).unwrap(), 180.0, epsilon = 1e-9);

        let west = plane(5, 5, |_, c| c as f64);
        assert_relative_eq!(aspect(&west, 1.0).unwrap().get(2, 2).unwrap(), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn unit_gradient_is_45_degrees() {
        let dem = plane(5, 5, |r, _| r as f64);
        let s = slope(&dem, 1.0).unwrap();
        assert_relative_eq!(s.get(2, 2).unwrap(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn z_factor_exaggerates_slope_not_aspect() {
        let dem = plane(5, 5, |r, c| (r + c) as f64 * 0.1);
        let s1 = slope(&dem, 1.0).unwrap().get(2, 2).unwrap();
        let s3 = slope(&dem, 3.0).unwrap().get(2, 2).unwrap();
        assert!(s3 > s1);

        let a1 = aspect(&dem, 1.0).unwrap().get(2, 2).unwrap();
        let a3 = aspect(&dem, 3.0).unwrap().get(2, 2).unwrap();
        assert_relative_eq!(a1, a3, epsilon = 1e-9);
    }

    #[test]
    fn edges_flats_and_nodata_are_nan() {
        let flat = Raster::filled(4, 4, 100.0);
        let a = aspect(&flat, 1.0).unwrap();
        assert!(a.get(1, 1).unwrap().is_nan());
        assert!(a.get(0, 0).unwrap().is_nan());
        assert_eq!(slope(&flat, 1.0).unwrap().get(1, 1).unwrap(), 0.0);

        let mut dem = plane(5, 5, |r, _| r as f64);
        dem.set(1, 1, -9999.0).unwrap();
        dem.set_nodata(Some(-9999.0));
        let s = slope(&dem, 1.0).unwrap();
        assert!(s.get(2, 2).unwrap().is_nan());
        assert!(!s.get(3, 3).unwrap().is_nan());
        assert!(s.nodata().map_or(false, f64::is_nan));
    }

    #[test]
    fn rejects_bad_z_factor() {
        let dem = plane(3, 3, |r, _| r as f64);
        assert!(matches!(slope(&dem, 0.0), Err(Error::InvalidParameter { .. })));
        assert!(aspect(&dem, f64::NAN).is_err());
    }

    #[test]
    fn tiny_rasters_are_all_nodata() {
        let dem = plane(2, 2, |r, c| (r + c) as f64);
        let s = slope(&dem, 1.0).unwrap();
        assert_eq!(s.shape(), (2, 2));
        assert!(s.data().iter().all(|v| v.is_nan()));
    }
}
