//! Native GeoTIFF reading/writing through the `tiff` crate.
//!
//! Only north-up georeferencing (pixel scale + tiepoint), the EPSG code from the
//! GeoKey directory and the GDAL no-data tag are understood. Single-band rasters are written as 32-bit float, which
//! holds every class code and the -9999 sentinel exactly.

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster, RasterElement};
use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{Gray32Float, RGBA8};
use tiff::encoder::{DirectoryEncoder, TiffEncoder, TiffKind};
use tiff::tags::Tag;

// GeoKey IDs and values (GeoTIFF 1.1, section 7)
const GT_MODEL_TYPE: u16 = 1024;
const GT_RASTER_TYPE: u16 = 1025;
const GEOGRAPHIC_TYPE: u16 = 2048;
const PROJECTED_CS_TYPE: u16 = 3072;
const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;

/// Read a single-band GeoTIFF file into a Raster
pub fn read_geotiff<T, P>(path: P) -> Result<Raster<T>>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    decode_geotiff(file)
}

/// Read a single-band GeoTIFF from an in-memory buffer
pub fn read_geotiff_from_buffer<T>(data: &[u8]) -> Result<Raster<T>>
where
    T: RasterElement,
{
    decode_geotiff(Cursor::new(data))
}

fn cast_all<S, T>(buf: Vec<S>) -> Vec<T>
where
    S: num_traits::NumCast + Copy,
    T: RasterElement,
{
    buf.into_iter()
        .map(|v| num_traits::cast(v).unwrap_or_else(T::default_nodata))
        .collect()
}

fn decode_geotiff<T, R>(reader: R) -> Result<Raster<T>>
where
    T: RasterElement,
    R: Read + Seek,
{
    let mut decoder =
        Decoder::new(reader).map_err(|e| Error::Other(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Other(format!("Cannot read dimensions: {}", e)))?;

    let rows = height as usize;
    let cols = width as usize;

    let result = decoder
        .read_image()
        .map_err(|e| Error::Other(format!("Cannot read image data: {}", e)))?;

    let data: Vec<T> = match result {
        DecodingResult::F32(buf) => cast_all(buf),
        DecodingResult::F64(buf) => cast_all(buf),
        DecodingResult::U8(buf) => cast_all(buf),
        DecodingResult::U16(buf) => cast_all(buf),
        DecodingResult::U32(buf) => cast_all(buf),
        DecodingResult::I8(buf) => cast_all(buf),
        DecodingResult::I16(buf) => cast_all(buf),
        DecodingResult::I32(buf) => cast_all(buf),
        _ => {
            return Err(Error::UnsupportedDataType(
                "Unsupported TIFF pixel format".to_string(),
            ))
        }
    };

    // Multi-band images decode to samples_per_pixel * rows * cols values
    if data.len() != rows * cols {
        return Err(Error::UnsupportedDataType(format!(
            "expected a single band, got {} samples for {}x{} pixels",
            data.len(),
            cols,
            rows
        )));
    }

    let mut raster = Raster::from_vec(data, rows, cols)?;

    if let Some(transform) = read_geotransform(&mut decoder) {
        raster.set_transform(transform);
    }
    raster.set_nodata(read_nodata(&mut decoder));
    raster.set_crs(read_crs(&mut decoder));

    Ok(raster)
}

fn read_geotransform<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<GeoTransform> {
    let scale = decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag).ok()?;
    let tiepoint = decoder.get_tag_f64_vec(Tag::ModelTiepointTag).ok()?;

    if scale.len() < 2 || tiepoint.len() < 6 {
        return None;
    }

    // tiepoint: [I, J, K, X, Y, Z], scale: [ScaleX, ScaleY, ScaleZ]
    let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
    let origin_y = tiepoint[4] + tiepoint[1] * scale[1];
    Some(GeoTransform::new(origin_x, origin_y, scale[0], -scale[1]))
}

fn read_nodata<T, R>(decoder: &mut Decoder<R>) -> Option<T>
where
    T: RasterElement,
    R: Read + Seek,
{
    let text = decoder.get_tag_ascii_string(Tag::GdalNodata).ok()?;
    let value: f64 = text.trim_matches(|c: char| c == '\0' || c.is_whitespace()).parse().ok()?;
    num_traits::cast(value)
}

fn read_crs<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<CRS> {
    let keys = decoder.get_tag_u16_vec(Tag::GeoKeyDirectoryTag).ok()?;
    epsg_from_geokeys(&keys).map(CRS::from_epsg)
}

/// EPSG code stored inline in a GeoKey directory, projected type preferred.
fn epsg_from_geokeys(keys: &[u16]) -> Option<u32> {
    // header: [version, revision, minor, count], then count x [id, location, count, value]
    let count = *keys.get(3)? as usize;
    let entries: Vec<&[u16]> = keys.get(4..)?.chunks_exact(4).take(count).collect();

    let inline = |id: u16| {
        entries
            .iter()
            .find(|e| e[0] == id && e[1] == 0)
            .map(|e| e[3])
            .filter(|&code| code != 0 && code != 32767)
    };
    inline(PROJECTED_CS_TYPE)
        .or_else(|| inline(GEOGRAPHIC_TYPE))
        .map(u32::from)
}

/// GeoKey directory for `crs`; codes that do not fit a SHORT are left out.
fn geokey_directory(crs: Option<&CRS>) -> Vec<u16> {
    let geographic = crs.is_some_and(CRS::is_geographic);
    let model_type = if geographic {
        MODEL_TYPE_GEOGRAPHIC
    } else {
        MODEL_TYPE_PROJECTED
    };

    let mut entries = vec![
        [GT_MODEL_TYPE, 0, 1, model_type],
        [GT_RASTER_TYPE, 0, 1, RASTER_PIXEL_IS_AREA],
    ];
    if let Some(code) = crs.and_then(CRS::epsg).and_then(|c| u16::try_from(c).ok()) {
        let key = if geographic {
            GEOGRAPHIC_TYPE
        } else {
            PROJECTED_CS_TYPE
        };
        entries.push([key, 0, 1, code]);
    }

    let mut keys = vec![1, 1, 0, entries.len() as u16];
    keys.extend(entries.into_iter().flatten());
    keys
}

/// Write a Raster to a single-band GeoTIFF file
pub fn write_geotiff<T, P>(raster: &Raster<T>, path: P) -> Result<()>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    encode_geotiff(raster, file)
}

/// Write a Raster to an in-memory GeoTIFF buffer
pub fn write_geotiff_to_buffer<T>(raster: &Raster<T>) -> Result<Vec<u8>>
where
    T: RasterElement,
{
    let mut buf = Vec::new();
    encode_geotiff(raster, Cursor::new(&mut buf))?;
    Ok(buf)
}

fn encode_geotiff<T, W>(raster: &Raster<T>, writer: W) -> Result<()>
where
    T: RasterElement,
    W: Write + Seek,
{
    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    let (rows, cols) = raster.shape();
    let data: Vec<f32> = raster
        .data()
        .iter()
        .map(|&v| num_traits::cast(v).unwrap_or(f32::NAN))
        .collect();

    let mut image = encoder
        .new_image::<Gray32Float>(cols as u32, rows as u32)
        .map_err(|e| Error::Other(format!("Cannot create TIFF image: {}", e)))?;

    let nodata = raster.nodata().and_then(|nd| nd.to_f64());
    write_geo_tags(image.encoder(), raster.transform(), raster.crs(), nodata)?;

    image
        .write_data(&data)
        .map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))?;

    Ok(())
}

/// Write a rendered RGBA8 buffer (row-major, 4 bytes per cell) as a georeferenced TIFF
pub fn write_rgba_tiff<P: AsRef<Path>>(
    rgba: &[u8],
    rows: usize,
    cols: usize,
    transform: &GeoTransform,
    crs: Option<&CRS>,
    path: P,
) -> Result<()> {
    if rgba.len() != rows * cols * 4 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let file = File::create(path.as_ref())?;
    let mut encoder =
        TiffEncoder::new(file).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;
    let mut image = encoder
        .new_image::<RGBA8>(cols as u32, rows as u32)
        .map_err(|e| Error::Other(format!("Cannot create TIFF image: {}", e)))?;

    write_geo_tags(image.encoder(), transform, crs, None)?;

    image
        .write_data(rgba)
        .map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))?;
    Ok(())
}

fn write_geo_tags<W, K>(
    dir: &mut DirectoryEncoder<'_, W, K>,
    gt: &GeoTransform,
    crs: Option<&CRS>,
    nodata: Option<f64>,
) -> Result<()>
where
    W: Write + Seek,
    K: TiffKind,
{
    let tag_err = |name: &str, e: tiff::TiffError| Error::Other(format!("Cannot write {} tag: {}", name, e));

    let scale = [gt.pixel_width, gt.pixel_height.abs(), 0.0];
    dir.write_tag(Tag::ModelPixelScaleTag, &scale[..])
        .map_err(|e| tag_err("scale", e))?;

    let tiepoint = [0.0, 0.0, 0.0, gt.origin_x, gt.origin_y, 0.0];
    dir.write_tag(Tag::ModelTiepointTag, &tiepoint[..])
        .map_err(|e| tag_err("tiepoint", e))?;

    let geokeys = geokey_directory(crs);
    dir.write_tag(Tag::GeoKeyDirectoryTag, &geokeys[..])
        .map_err(|e| tag_err("geokey", e))?;

    if let Some(nd) = nodata {
        let text = nd.to_string();
        dir.write_tag(Tag::GdalNodata, text.as_str())
            .map_err(|e| tag_err("nodata", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_roundtrip_keeps_codes_and_nodata() {
        let mut codes = Raster::from_vec(vec![10, 12, 88, -9999], 2, 2).unwrap();
        codes.set_transform(GeoTransform::new(300000.0, 6300000.0, 30.0, -30.0));
        codes.set_nodata(Some(-9999));

        let buf = write_geotiff_to_buffer(&codes).unwrap();
        let back: Raster<i32> = read_geotiff_from_buffer(&buf).unwrap();

        assert_eq!(back.shape(), (2, 2));
        assert_eq!(back.data(), codes.data());
        assert_eq!(back.nodata(), Some(-9999));
        assert_eq!(back.transform(), codes.transform());
    }

    #[test]
    fn file_roundtrip_float() {
        let dem = Raster::from_vec(vec![100.5, 101.25, 99.0, 98.75, 97.5, 96.0], 2, 3).unwrap();
        let tmp = tempfile::NamedTempFile::new().unwrap();

        write_geotiff(&dem, tmp.path()).unwrap();
        let back: Raster<f64> = read_geotiff(tmp.path()).unwrap();

        assert_eq!(back.shape(), (2, 3));
        assert_eq!(back.get(0, 1).unwrap(), 101.25);
        assert_eq!(back.nodata(), None);
    }

    #[test]
    fn georeference_survives_30m_grid() {
        let mut dem = Raster::from_vec(vec![812.0, 815.5, 809.25, -9999.0], 2, 2).unwrap();
        dem.set_transform(GeoTransform::new(300000.0, 6300000.0, 30.0, -30.0));
        dem.set_nodata(Some(-9999.0));

        let back: Raster<f64> = read_geotiff_from_buffer(&write_geotiff_to_buffer(&dem).unwrap()).unwrap();

        assert_eq!(back.transform().cell_width(), 30.0);
        assert_eq!(back.transform().cell_height(), 30.0);
        assert_eq!(back.transform(), dem.transform());
        assert_eq!(back.nodata(), Some(-9999.0));
        assert!(back.is_nodata(back.get(1, 1).unwrap()));
    }

    #[test]
    fn projected_and_geographic_crs_round_trip() {
        for code in [32719, 4326] {
            let mut raster = Raster::filled(2, 2, 1.0_f64);
            raster.set_crs(Some(CRS::from_epsg(code)));

            let back: Raster<f64> =
                read_geotiff_from_buffer(&write_geotiff_to_buffer(&raster).unwrap()).unwrap();
            assert_eq!(back.crs(), Some(&CRS::from_epsg(code)));
        }
    }

    #[test]
    fn missing_or_user_defined_crs_reads_as_none() {
        let raster = Raster::filled(1, 1, 1.0_f64);
        let back: Raster<f64> =
            read_geotiff_from_buffer(&write_geotiff_to_buffer(&raster).unwrap()).unwrap();
        assert_eq!(back.crs(), None);

        // WKT-only systems have no GeoKey code to store
        let mut wkt = Raster::filled(1, 1, 1.0_f64);
        wkt.set_crs(Some(CRS::from_wkt("LOCAL_CS[\"grid\"]")));
        let back: Raster<f64> =
            read_geotiff_from_buffer(&write_geotiff_to_buffer(&wkt).unwrap()).unwrap();
        assert_eq!(back.crs(), None);
    }

    #[test]
    fn geokey_directory_layout() {
        let keys = geokey_directory(Some(&CRS::from_epsg(32719)));
        assert_eq!(
            keys,
            vec![1, 1, 0, 3, 1024, 0, 1, 1, 1025, 0, 1, 1, 3072, 0, 1, 32719]
        );
        assert_eq!(epsg_from_geokeys(&keys), Some(32719));

        let keys = geokey_directory(Some(&CRS::from_epsg(4326)));
        assert_eq!(&keys[4..8], &[1024, 0, 1, 2]);
        assert_eq!(epsg_from_geokeys(&keys), Some(4326));

        assert_eq!(epsg_from_geokeys(&[1, 1, 0]), None);
        assert_eq!(epsg_from_geokeys(&[1, 1, 0, 1, 3072, 0, 1, 32767]), None);
        assert_eq!(epsg_from_geokeys(&[1, 1, 0, 1, 3072, 34736, 1, 0]), None);
    }

    #[test]
    fn rgba_length_is_checked() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let result = write_rgba_tiff(&[0u8; 7], 1, 2, &GeoTransform::default(), None, tmp.path());
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }
}
