use std::io::{Cursor, Read};

use model::{label_for, Location, Point, MAX_POINTS};
use projection::{geographic_to_utm, ZONE_39N};
use utility::id::Id;

use crate::error::{ImportError, ImportResult};

/// How parsed tuples are labelled.
///
/// The original viewer restarted at 'A' for every `<coordinates>` element,
/// so two elements in one document produce colliding labels. `Document`
/// numbers tuples across the whole traversal instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelScope {
    #[default]
    PerElement,
    Document,
}

/// Import a KML or KMZ byte stream, told apart by the file extension.
/// The result replaces the caller's point set wholesale.
pub fn import(file_name: &str, bytes: &[u8], scope: LabelScope) -> ImportResult<Vec<Point>> {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".kmz") {
        parse_kmz(bytes, scope)
    } else if lower.ends_with(".kml") {
        Ok(parse_kml(&String::from_utf8_lossy(bytes), scope))
    } else {
        Err(ImportError::UnsupportedFile(file_name.to_owned()))
    }
}

/// Decode a KMZ container: the first entry named `*.kml` (enumeration
/// order, case-insensitive) holds the document. No such entry, no points.
pub fn parse_kmz(bytes: &[u8], scope: LabelScope) -> ImportResult<Vec<Point>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if !entry.name().to_lowercase().ends_with(".kml") {
            continue;
        }
        let mut text = String::new();
        entry.read_to_string(&mut text)?;
        return Ok(parse_kml(&text, scope));
    }
    log::warn!("KMZ archive contains no .kml entry");
    Ok(Vec::new())
}

/// Parse KML text into points, one per coordinate tuple.
///
/// Every `<coordinates>` element counts, no matter how deeply it is nested
/// or which geometry tag contains it. Malformed tuples are skipped one at
/// a time; malformed XML yields no points at all.
pub fn parse_kml(text: &str, scope: LabelScope) -> Vec<Point> {
    let document = match roxmltree::Document::parse(text) {
        Ok(document) => document,
        Err(why) => {
            log::error!("XML parse error: {why}");
            return Vec::new();
        }
    };

    let mut points = Vec::new();
    for element in document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "coordinates")
    {
        let Some(content) = element.text() else {
            continue;
        };
        let mut element_index = 0;
        for tuple in content.split_whitespace() {
            if points.len() >= MAX_POINTS {
                log::warn!("import capped at {MAX_POINTS} points, remaining tuples ignored");
                return points;
            }
            let Some(location) = parse_tuple(tuple) else {
                log::warn!("skipping malformed coordinate tuple: {tuple}");
                continue;
            };
            let label_index = match scope {
                LabelScope::PerElement => element_index,
                LabelScope::Document => points.len(),
            };
            points.push(point_from_location(
                points.len() as u64 + 1,
                label_index,
                location,
            ));
            element_index += 1;
        }
    }
    points
}

/// A tuple is `lon,lat[,alt]`; altitude, when present, is ignored.
fn parse_tuple(tuple: &str) -> Option<Location> {
    let mut fields = tuple.split(',');
    let longitude: f64 = fields.next()?.trim().parse().ok().filter(|v: &f64| v.is_finite())?;
    let latitude: f64 = fields.next()?.trim().parse().ok().filter(|v: &f64| v.is_finite())?;
    Some(Location {
        latitude,
        longitude,
    })
}

fn point_from_location(id: u64, label_index: usize, location: Location) -> Point {
    // Fill the projected text fields so the entry reads consistently in
    // UTM input mode.
    let (easting, northing) = geographic_to_utm(&ZONE_39N, location.latitude, location.longitude);
    Point {
        id: Id::new(id),
        easting: format!("{easting:.2}"),
        northing: format!("{northing:.2}"),
        geographic: Some(location),
        label: label_for(label_index),
    }
}
