//! Data-source collaborators: shapefile geometry and tabular node import.
//!
//! Both readers parse their input fully before the caller mutates any
//! model state, so a failed import leaves the previous map and nodes
//! untouched.

use pangea_core::GeoPoint;
use pangea_render::ingest::ShapeRecord;
use smallvec::SmallVec;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read import file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse shapefile")]
    Shapefile(#[from] shapefile::Error),
    #[error("failed to parse node table")]
    Csv(#[from] csv::Error),
}

/// Read every shape from a shapefile into shape records.
///
/// Only polygon geometry contributes; other shape kinds are skipped.
/// Interior rings are ignored — holes are intentionally not subtracted.
pub fn read_shapefile(path: impl AsRef<Path>) -> Result<Vec<ShapeRecord>, ImportError> {
    let shapes = shapefile::read_shapes(path.as_ref())?;
    let mut records = Vec::with_capacity(shapes.len());
    let mut skipped = 0usize;

    for shape in shapes {
        match shape {
            shapefile::Shape::Polygon(polygon) => {
                let mut exteriors: SmallVec<[Vec<GeoPoint>; 1]> = SmallVec::new();
                for ring in polygon.rings() {
                    if let shapefile::PolygonRing::Outer(points) = ring {
                        exteriors.push(
                            points.iter().map(|p| GeoPoint::new(p.x, p.y)).collect(),
                        );
                    }
                }
                records.push(ShapeRecord { exteriors });
            }
            other => {
                skipped += 1;
                log::debug!("skipping non-polygon shape of kind {:?}", other.shapetype());
            }
        }
    }

    log::info!(
        "read {} polygon record(s) from {} ({} non-polygon shape(s) skipped)",
        records.len(),
        path.as_ref().display(),
        skipped
    );
    Ok(records)
}

/// Result of a tabular node import.
#[derive(Debug, Clone, PartialEq)]
pub struct TableImport {
    /// One geographic position per well-formed row.
    pub coords: Vec<GeoPoint>,
    /// Rows skipped because a coordinate failed to parse.
    pub skipped: usize,
}

/// Read `(lon, lat)` rows from CSV data. The header row is skipped; a
/// malformed row is counted and skipped rather than failing the import.
pub fn read_node_table<R: Read>(reader: R) -> Result<TableImport, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut coords = Vec::new();
    let mut skipped = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        match parse_row(&record) {
            Some(geo) => coords.push(geo),
            None => {
                skipped += 1;
                log::debug!("skipping malformed node row {record:?}");
            }
        }
    }
    Ok(TableImport { coords, skipped })
}

/// File-path convenience wrapper around [`read_node_table`].
pub fn read_node_table_path(path: impl AsRef<Path>) -> Result<TableImport, ImportError> {
    let file = File::open(path)?;
    read_node_table(file)
}

fn parse_row(record: &csv::StringRecord) -> Option<GeoPoint> {
    let lon = record.get(0)?.trim().parse::<f64>().ok()?;
    let lat = record.get(1)?.trim().parse::<f64>().ok()?;
    Some(GeoPoint::new(lon, lat))
}
