//! Aspect-slope mapping pipeline
//!
//! Asks a [`TerrainDerivatives`] collaborator for aspect and slope, classifies
//! both with the built-in tables, packs them into one code raster and pairs it
//! with the color ramp for the requested direction.

use crate::encode::AspectSlopeEncoder;
use crate::reclass::{NODATA_CODE, SLOPE_RANGES};
use crate::terrain::{HornDerivatives, TerrainDerivatives};
use aspectslope_colormap::{
    build_ramp, raster_to_rgba, ColorRamp, Direction, RenderParams, StopTable,
};
use aspectslope_core::raster::Raster;
use aspectslope_core::{Algorithm, Error, Result};
use tracing::{debug, info, warn};

/// Smallest accepted z-factor
pub const MIN_Z_FACTOR: f64 = 1.0;

/// Parameters for an aspect-slope run
#[derive(Debug, Clone, PartialEq)]
pub struct AspectSlopeParams {
    /// Aspect band to highlight in the ramp
    pub direction: Direction,
    /// Vertical exaggeration used when deriving aspect
    pub aspect_z_factor: f64,
    /// Vertical exaggeration used when deriving slope
    pub slope_z_factor: f64,
    /// Return the aspect raster alongside the combined codes
    pub keep_aspect: bool,
    /// Return the slope raster alongside the combined codes
    pub keep_slope: bool,
    /// Code written to cells without a class
    pub nodata_code: i32,
}

impl Default for AspectSlopeParams {
    fn default() -> Self {
        Self {
            direction: Direction::NoPreference,
            aspect_z_factor: 1.0,
            slope_z_factor: 1.0,
            keep_aspect: true,
            keep_slope: true,
            nodata_code: NODATA_CODE,
        }
    }
}

impl AspectSlopeParams {
    /// Reject z-factors below [`MIN_Z_FACTOR`] or not finite.
    pub fn validate(&self) -> Result<()> {
        check_z_factor("aspect_z_factor", self.aspect_z_factor)?;
        check_z_factor("slope_z_factor", self.slope_z_factor)
    }
}

fn check_z_factor(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= MIN_Z_FACTOR {
        return Ok(());
    }
    Err(Error::InvalidParameter {
        name,
        value: value.to_string(),
        reason: format!("z-factor must be a finite number >= {}", MIN_Z_FACTOR),
    })
}

/// Result of a run: the combined code raster, its ramp and optional side layers.
#[derive(Debug, Clone)]
pub struct AspectSlopeMap {
    /// Combined codes `10..=88`, or the configured no-data code
    pub combined: Raster<i32>,
    /// Ramp for the requested direction
    pub ramp: ColorRamp,
    /// Display label, e.g. `Aspect-Slope -North East`
    pub label: String,
    /// Aspect in degrees, when requested
    pub aspect: Option<Raster<f64>>,
    /// Slope in degrees, when requested
    pub slope: Option<Raster<f64>>,
}

impl AspectSlopeMap {
    /// Row-major RGBA8 rendering of the combined raster.
    pub fn render(&self, params: &RenderParams) -> Vec<u8> {
        raster_to_rgba(&self.combined, &self.ramp, params)
    }

    /// The ramp as a stop table with one descriptive label per code.
    pub fn stop_table(&self) -> StopTable {
        StopTable::from_ramp(&self.ramp, stop_label)
    }
}

/// Label for a combined code, e.g. `North East, 5-15°`.
///
/// Codes that do not decode to a direction and a slope class get `label`.
pub fn stop_label(code: f64) -> String {
    let code = code.round() as i32;
    let aspect_code = code - code.rem_euclid(10);
    let slope_code = code.rem_euclid(10);

    let direction = Direction::from_aspect_code(aspect_code);
    let slope = SLOPE_RANGES.iter().find(|r| r.code == slope_code);
    match (direction, slope) {
        (Some(d), Some(r)) => format!("{}, {}-{}°", d.name(), r.low, r.high),
        _ => "label".to_string(),
    }
}

fn warn_if_empty(layer: &str, raster: &Raster<f64>) {
    if raster.statistics().valid_count == 0 {
        warn!("{} raster from the elevation collaborator has no valid cells", layer);
    }
}

/// Run the aspect-slope pipeline on `dem` using `terrain` for derivatives.
///
/// Fails with [`Error::MissingInput`] when the DEM is empty or entirely
/// no-data, and with [`Error::InvalidParameter`] when a z-factor is below
/// [`MIN_Z_FACTOR`]. Both checks happen before the collaborator is called.
pub fn aspect_slope_map<D>(
    dem: &Raster<f64>,
    params: &AspectSlopeParams,
    terrain: &D,
) -> Result<AspectSlopeMap>
where
    D: TerrainDerivatives + ?Sized,
{
    if dem.is_empty() {
        return Err(Error::MissingInput("elevation raster is empty".into()));
    }
    if dem.statistics().valid_count == 0 {
        return Err(Error::MissingInput(
            "elevation raster has no valid cells".into(),
        ));
    }
    params.validate()?;
    let encoder = AspectSlopeEncoder::with_nodata_code(params.nodata_code)?;

    let (rows, cols) = dem.shape();
    debug!(rows, cols, z = params.aspect_z_factor, "deriving aspect");
    let aspect = terrain.derive_aspect(dem, params.aspect_z_factor)?;
    dem.ensure_same_shape(&aspect)?;
    warn_if_empty("aspect", &aspect);

    debug!(rows, cols, z = params.slope_z_factor, "deriving slope");
    let slope = terrain.derive_slope(dem, params.slope_z_factor)?;
    dem.ensure_same_shape(&slope)?;
    warn_if_empty("slope", &slope);

    debug!("classifying and combining");
    let combined = encoder.encode_raster(&aspect, &slope)?;

    debug!(direction = %params.direction, "building ramp");
    let ramp = build_ramp(params.direction);
    let label = format!("Aspect-Slope -{}", params.direction.layer_label());

    let stats = combined.statistics();
    info!(
        "{}: {} classified cells, {} no-data",
        label, stats.valid_count, stats.nodata_count
    );

    Ok(AspectSlopeMap {
        combined,
        ramp,
        label,
        aspect: params.keep_aspect.then_some(aspect),
        slope: params.keep_slope.then_some(slope),
    })
}

/// The pipeline as an [`Algorithm`], generic over the elevation collaborator.
#[derive(Debug, Clone, Default)]
pub struct AspectSlopeMapping<D = HornDerivatives> {
    terrain: D,
}

impl<D: TerrainDerivatives> AspectSlopeMapping<D> {
    pub fn new(terrain: D) -> Self {
        Self { terrain }
    }

    pub fn terrain(&self) -> &D {
        &self.terrain
    }
}

impl<D: TerrainDerivatives> Algorithm for AspectSlopeMapping<D> {
    type Input = Raster<f64>;
    type Output = AspectSlopeMap;
    type Params = AspectSlopeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Aspect-Slope Map"
    }

    fn description(&self) -> &'static str {
        "Combine classified aspect and slope into one band colored by a direction-highlight ramp"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        aspect_slope_map(&input, &params, &self.terrain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aspectslope_colormap::{Rgba, GREY, HIGHLIGHT};
    use std::cell::Cell;

    /// Returns constant rasters shaped like the DEM and counts calls.
    struct Constant {
        aspect: f64,
        slope: f64,
        calls: Cell<usize>,
    }

    impl Constant {
        fn new(aspect: f64, slope: f64) -> Self {
            Self { aspect, slope, calls: Cell::new(0) }
        }
    }

    impl TerrainDerivatives for Constant {
        fn derive_aspect(&self, dem: &Raster<f64>, _z: f64) -> Result<Raster<f64>> {
            self.calls.set(self.calls.get() + 1);
            dem.derive(vec![self.aspect; dem.len()], None)
        }

        fn derive_slope(&self, dem: &Raster<f64>, _z: f64) -> Result<Raster<f64>> {
            self.calls.set(self.calls.get() + 1);
            dem.derive(vec![self.slope; dem.len()], None)
        }
    }

    fn dem() -> Raster<f64> {
        Raster::filled(3, 3, 100.0)
    }

    #[test]
    fn combines_constant_layers() {
        let terrain = Constant::new(200.0, 20.0);
        let map = aspect_slope_map(&dem(), &AspectSlopeParams::default(), &terrain).unwrap();
        assert!(map.combined.data().iter().all(|&c| c == 54));
        assert_eq!(map.label, "Aspect-Slope -Visualised");
        assert!(map.aspect.is_some());
        assert!(map.slope.is_some());
        assert_eq!(terrain.calls.get(), 2);
    }

    #[test]
    fn side_layers_are_optional() {
        let params = AspectSlopeParams {
            keep_aspect: false,
            keep_slope: false,
            direction: Direction::NorthEast,
            ..Default::default()
        };
        let map = aspect_slope_map(&dem(), &params, &Constant::new(10.0, 3.0)).unwrap();
        assert!(map.aspect.is_none());
        assert!(map.slope.is_none());
        assert_eq!(map.label, "Aspect-Slope -North East");
    }

    #[test]
    fn north_highlights_code_ten() {
        let terrain = Constant::new(10.0, 3.0);
        let north = AspectSlopeParams {
            direction: Direction::North,
            ..Default::default()
        };
        let map = aspect_slope_map(&dem(), &north, &terrain).unwrap();
        assert_eq!(map.combined.get(1, 1).unwrap(), 10);
        assert_eq!(&map.render(&RenderParams::default())[0..4], &HIGHLIGHT[0].to_array());

        let south = AspectSlopeParams {
            direction: Direction::South,
            ..Default::default()
        };
        let map = aspect_slope_map(&dem(), &south, &terrain).unwrap();
        assert_eq!(map.ramp.color_at(10.0), GREY[0]);
    }

    #[test]
    fn rejects_low_z_factor_before_deriving() {
        let terrain = Constant::new(10.0, 3.0);
        for bad in [0.5, 0.0, -2.0, f64::NAN, f64::INFINITY] {
            let params = AspectSlopeParams {
                slope_z_factor: bad,
                ..Default::default()
            };
            let err = aspect_slope_map(&dem(), &params, &terrain).unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter { name: "slope_z_factor", .. }),
                "{:?}",
                err
            );
        }
        assert_eq!(terrain.calls.get(), 0);

        let params = AspectSlopeParams {
            aspect_z_factor: 0.99,
            ..Default::default()
        };
        assert!(params.validate().is_err());
        assert!(AspectSlopeParams::default().validate().is_ok());
    }

    #[test]
    fn missing_input_fails_fast() {
        let terrain = Constant::new(10.0, 3.0);
        let params = AspectSlopeParams::default();

        let empty = Raster::<f64>::new(0, 0);
        assert!(matches!(
            aspect_slope_map(&empty, &params, &terrain),
            Err(Error::MissingInput(_))
        ));

        let all_nodata = Raster::filled(2, 2, f64::NAN);
        assert!(matches!(
            aspect_slope_map(&all_nodata, &params, &terrain),
            Err(Error::MissingInput(_))
        ));
        assert_eq!(terrain.calls.get(), 0);
    }

    #[test]
    fn nodata_layers_propagate() {
        let map = aspect_slope_map(&dem(), &AspectSlopeParams::default(), &Constant::new(f64::NAN, 3.0))
            .unwrap();
        assert!(map.combined.data().iter().all(|&c| c == NODATA_CODE));
        let rgba = map.render(&RenderParams::default());
        assert_eq!(&rgba[0..4], &Rgba::TRANSPARENT.to_array());
    }

    #[test]
    fn wrong_shaped_collaborator_output_is_an_error() {
        struct Shrinking;
        impl TerrainDerivatives for Shrinking {
            fn derive_aspect(&self, _dem: &Raster<f64>, _z: f64) -> Result<Raster<f64>> {
                Ok(Raster::filled(1, 1, 0.0))
            }
            fn derive_slope(&self, _dem: &Raster<f64>, _z: f64) -> Result<Raster<f64>> {
                Ok(Raster::filled(1, 1, 0.0))
            }
        }

        let err = aspect_slope_map(&dem(), &AspectSlopeParams::default(), &Shrinking).unwrap_err();
        assert!(matches!(err, Error::SizeMismatch { .. }));
    }

    #[test]
    fn stop_labels() {
        assert_eq!(stop_label(10.0), "North, 0-5°");
        assert_eq!(stop_label(22.0), "North East, 5-15°");
        assert_eq!(stop_label(88.0), "North West, 45-90°");
        assert_eq!(stop_label(5.0), "label");

        let map = aspect_slope_map(&dem(), &AspectSlopeParams::default(), &Constant::new(10.0, 3.0))
            .unwrap();
        let table = map.stop_table();
        assert_eq!(table.rows.len(), 40);
        assert_eq!(table.rows[0].label, "North, 0-5°");
    }

    #[test]
    fn runs_as_algorithm() {
        let mapping = AspectSlopeMapping::new(Constant::new(100.0, 50.0));
        assert_eq!(mapping.name(), "Aspect-Slope Map");
        let map = mapping.execute_default(dem()).unwrap();
        assert!(map.combined.data().iter().all(|&c| c == 38));
    }
}
