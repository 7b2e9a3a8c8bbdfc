//! Conversion of caller-supplied `GeoJSON` geometry objects.

use crate::WardError;

/// Parses a `GeoJSON` geometry object (as received in a request body) into
/// a [`geo::Geometry`].
///
/// Accepts every `GeoJSON` geometry type. Positions must carry at least
/// two coordinates and line strings at least two positions. Unclosed
/// polygon rings are closed, after which a ring needs at least four
/// positions. A polygon without rings is an empty shape that touches
/// nothing.
///
/// # Errors
///
/// Returns [`WardError::InvalidGeometry`] if the value is not a `GeoJSON`
/// geometry or does not describe a constructible shape.
pub fn parse_geometry(value: serde_json::Value) -> Result<geo::Geometry<f64>, WardError> {
    let mut geometry: geojson::Geometry =
        serde_json::from_value(value).map_err(|e| WardError::InvalidGeometry {
            message: e.to_string(),
        })?;

    normalize(&mut geometry.value)?;

    geo::Geometry::<f64>::try_from(geometry).map_err(|e| WardError::InvalidGeometry {
        message: e.to_string(),
    })
}

fn normalize(value: &mut geojson::Value) -> Result<(), WardError> {
    if matches!(value, geojson::Value::Polygon(rings) if rings.is_empty()) {
        *value = geojson::Value::MultiPolygon(Vec::new());
        return Ok(());
    }

    match value {
        geojson::Value::Point(position) => validate_position(position),
        geojson::Value::MultiPoint(positions) => {
            positions.iter().try_for_each(|p| validate_position(p))
        }
        geojson::Value::LineString(line) => validate_line(line),
        geojson::Value::MultiLineString(lines) => lines.iter().try_for_each(|l| validate_line(l)),
        geojson::Value::Polygon(rings) => normalize_polygon(rings),
        geojson::Value::MultiPolygon(polygons) => {
            polygons.retain(|rings| !rings.is_empty());
            polygons.iter_mut().try_for_each(normalize_polygon)
        }
        geojson::Value::GeometryCollection(geometries) => {
            geometries.iter_mut().try_for_each(|g| normalize(&mut g.value))
        }
    }
}

fn validate_position(position: &[f64]) -> Result<(), WardError> {
    if position.len() < 2 {
        return Err(invalid(format!(
            "position must have at least 2 coordinates, got {}",
            position.len()
        )));
    }
    if position.iter().any(|c| !c.is_finite()) {
        return Err(invalid("position coordinates must be finite".to_string()));
    }
    Ok(())
}

fn validate_line(line: &[Vec<f64>]) -> Result<(), WardError> {
    if line.len() < 2 {
        return Err(invalid(format!(
            "line string must have at least 2 positions, got {}",
            line.len()
        )));
    }
    line.iter().try_for_each(|p| validate_position(p))
}

fn normalize_polygon(rings: &mut geojson::PolygonType) -> Result<(), WardError> {
    for ring in rings {
        ring.iter().try_for_each(|p| validate_position(p))?;
        if ring.len() >= 3
            && ring.first() != ring.last()
            && let Some(first) = ring.first().cloned()
        {
            ring.push(first);
        }
        if ring.len() < 4 {
            return Err(invalid(format!(
                "polygon ring must have at least 4 positions, got {}",
                ring.len()
            )));
        }
    }
    Ok(())
}

const fn invalid(message: String) -> WardError {
    WardError::InvalidGeometry { message }
}
