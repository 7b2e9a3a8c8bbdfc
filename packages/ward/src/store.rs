//! The ward collection and its spatial index.

use std::path::Path;

use geo::{BoundingRect, Geometry, Intersects, MultiPolygon};
use geojson::{FeatureCollection, GeoJson};
use rstar::{AABB, RTree, RTreeObject};
use urban_insight_ward_models::{Ward, WardProperties};

use crate::WardError;

/// Bounding box of one ward, pointing back at its position in the
/// collection.
struct WardEnvelope {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for WardEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// All wards of the dataset, in source order.
///
/// Built once and never mutated. Intersection queries go through an
/// R-tree of ward bounding boxes before the exact geometry test. The
/// source `FeatureCollection` is kept untouched for serving the map.
pub struct WardCollection {
    wards: Vec<Ward>,
    index: RTree<WardEnvelope>,
    source: FeatureCollection,
}

impl WardCollection {
    fn new(wards: Vec<Ward>, source: FeatureCollection) -> Self {
        let entries = wards
            .iter()
            .enumerate()
            .filter_map(|(index, ward)| {
                compute_envelope(&ward.boundary).map(|envelope| WardEnvelope { index, envelope })
            })
            .collect();

        Self {
            wards,
            index: RTree::bulk_load(entries),
            source,
        }
    }

    /// Loads wards from a `GeoJSON` file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`WardError`] if the file cannot be read or is not a
    /// `FeatureCollection`.
    pub fn load(path: &Path) -> Result<Self, WardError> {
        let contents = std::fs::read_to_string(path)?;
        let collection = Self::from_geojson_str(&contents)?;
        log::info!("Loaded {} wards from {}", collection.len(), path.display());
        Ok(collection)
    }

    /// Parses wards from a `GeoJSON` `FeatureCollection` string.
    ///
    /// Features without a `Polygon` or `MultiPolygon` geometry are skipped
    /// with a warning, so every ward in the collection has a boundary.
    ///
    /// # Errors
    ///
    /// Returns [`WardError`] if the input is not valid `GeoJSON`, is not a
    /// `FeatureCollection`, or a feature's properties do not form an
    /// object.
    pub fn from_geojson_str(contents: &str) -> Result<Self, WardError> {
        let GeoJson::FeatureCollection(collection) = contents.parse::<GeoJson>()? else {
            return Err(WardError::Dataset {
                message: "expected a FeatureCollection".to_string(),
            });
        };

        let mut wards = Vec::with_capacity(collection.features.len());

        for (position, feature) in collection.features.iter().enumerate() {
            let Some(boundary) = feature.geometry.clone().and_then(to_multipolygon) else {
                log::warn!("Skipping feature {position}: missing or non-polygon geometry");
                continue;
            };

            let properties: WardProperties = match &feature.properties {
                Some(map) => serde_json::from_value(serde_json::Value::Object(map.clone()))?,
                None => WardProperties::default(),
            };

            wards.push(Ward::new(position, boundary, properties));
        }

        Ok(Self::new(wards, collection))
    }

    /// Number of wards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wards.len()
    }

    /// Whether the collection holds no wards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wards.is_empty()
    }

    /// All wards in source order.
    #[must_use]
    pub fn wards(&self) -> &[Ward] {
        &self.wards
    }

    /// Returns the wards whose boundary shares at least one point with
    /// `shape`, in source order.
    ///
    /// Touching a ward boundary counts as intersecting it.
    #[must_use]
    pub fn intersecting(&self, shape: &Geometry<f64>) -> Vec<&Ward> {
        let Some(rect) = shape.bounding_rect() else {
            return Vec::new();
        };
        let query_env =
            AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);

        let mut hits: Vec<usize> = self
            .index
            .locate_in_envelope_intersecting(&query_env)
            .map(|entry| entry.index)
            .filter(|&i| shape.intersects(&self.wards[i].boundary))
            .collect();
        hits.sort_unstable();

        hits.into_iter().map(|i| &self.wards[i]).collect()
    }

    /// The dataset exactly as loaded: every feature with its original
    /// id, geometry, and full attribute table, including features that
    /// were not usable as wards.
    #[must_use]
    pub const fn feature_collection(&self) -> &FeatureCollection {
        &self.source
    }
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    match Geometry::<f64>::try_from(geometry).ok()? {
        Geometry::MultiPolygon(mp) => Some(mp),
        Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

/// Compute the bounding box envelope for a [`MultiPolygon`]. Empty
/// boundaries have none and can never be hit.
fn compute_envelope(mp: &MultiPolygon<f64>) -> Option<AABB<[f64; 2]>> {
    mp.bounding_rect()
        .map(|rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]))
}
