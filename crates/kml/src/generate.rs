use std::io::{Cursor, Write};

use model::{GeometryKind, Location, Point};
use zip::write::SimpleFileOptions;

use crate::error::{ExportError, ExportResult};

/// Minimum valid points each geometry kind can be drawn from.
fn required_points(kind: GeometryKind) -> usize {
    match kind {
        GeometryKind::Path => 2,
        GeometryKind::Polygon => 3,
    }
}

/// Suggested download name for an export.
pub fn export_file_name(kind: GeometryKind) -> &'static str {
    match kind {
        GeometryKind::Path => "utm_converted_path.kmz",
        GeometryKind::Polygon => "utm_converted_polygon.kmz",
    }
}

/// Render the KML document for the given points and geometry kind.
pub fn generate_kml(points: &[&Point], kind: GeometryKind) -> ExportResult<String> {
    let locations: Vec<Location> = points
        .iter()
        .filter_map(|point| point.geographic)
        .collect();
    if locations.len() < required_points(kind) {
        return Err(ExportError::TooFewPoints {
            kind,
            count: locations.len(),
        });
    }

    let mut tuples: Vec<String> = locations
        .iter()
        .map(|location| format!("{},{},0", location.longitude, location.latitude))
        .collect();

    let document = match kind {
        GeometryKind::Path => render_document(
            "UTM Converted Path",
            PATH_STYLE,
            &path_placemark(&tuples.join(" ")),
        ),
        GeometryKind::Polygon => {
            // The ring closes by repeating the first point.
            tuples.push(tuples[0].clone());
            render_document(
                "UTM Converted Polygon",
                POLYGON_STYLE,
                &polygon_placemark(&tuples.join(" ")),
            )
        }
    };
    Ok(document)
}

/// Package the KML document as the single `doc.kml` entry of a KMZ
/// archive and return the archive bytes.
pub fn generate_kmz(points: &[&Point], kind: GeometryKind) -> ExportResult<Vec<u8>> {
    let kml = generate_kml(points, kind)?;
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file("doc.kml", SimpleFileOptions::default())?;
    writer.write_all(kml.as_bytes())?;
    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

const PATH_STYLE: &str = r#"    <Style id="pathStyle">
      <LineStyle>
        <color>ff0000ff</color>
        <width>3</width>
      </LineStyle>
    </Style>"#;

const POLYGON_STYLE: &str = r#"    <Style id="polygonStyle">
      <LineStyle>
        <color>ff0000ff</color>
        <width>3</width>
      </LineStyle>
      <PolyStyle>
        <color>7f0000ff</color>
      </PolyStyle>
    </Style>"#;

fn render_document(name: &str, style: &str, placemark: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>{name}</name>
{style}
{placemark}
  </Document>
</kml>
"#
    )
}

fn path_placemark(tuples: &str) -> String {
    format!(
        r#"    <Placemark>
      <name>Path</name>
      <styleUrl>#pathStyle</styleUrl>
      <LineString>
        <coordinates>{tuples}</coordinates>
      </LineString>
    </Placemark>"#
    )
}

fn polygon_placemark(tuples: &str) -> String {
    format!(
        r#"    <Placemark>
      <name>Polygon</name>
      <styleUrl>#polygonStyle</styleUrl>
      <Polygon>
        <outerBoundaryIs>
          <LinearRing>
            <coordinates>{tuples}</coordinates>
          </LinearRing>
        </outerBoundaryIs>
      </Polygon>
    </Placemark>"#
    )
}
