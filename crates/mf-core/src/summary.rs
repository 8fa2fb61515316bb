//! Read-only presentation snapshot of a document.
//!
//! A consuming application (form-based editor, listing page, CLI) needs
//! a handful of top-level facts plus one row per layer, without reaching
//! into the model's internals. Everything here is plain, serializable
//! data.

use crate::enums::{LayerStatus, LayerType};
use crate::model::Map;
use serde::Serialize;

/// Top-level facts about a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    pub name: String,
    pub projection: String,
    pub extent: Option<[f64; 4]>,
    pub wms: WmsSummary,
}

/// WMS publication state, derived from the map's metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WmsSummary {
    /// Whether WMS requests are enabled (`wms_enable_request` present).
    pub enabled: bool,
    pub title: Option<String>,
    pub r#abstract: Option<String>,
    pub attribution_title: Option<String>,
    pub attribution_onlineresource: Option<String>,
}

/// One row of the layer listing, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    pub group: Option<String>,
    pub name: String,
    pub kind: LayerType,
    pub projection: String,
    pub status: LayerStatus,
}

impl Map {
    /// Snapshot the top-level facts a presentation layer displays.
    pub fn summary(&self) -> MapSummary {
        let meta = |key: &str| self.metadata.get(key).map(str::to_string);
        MapSummary {
            name: self.name.clone(),
            projection: self.projection.clone(),
            extent: self.extent,
            wms: WmsSummary {
                enabled: self.metadata.get("wms_enable_request").is_some(),
                title: meta("wms_title"),
                r#abstract: meta("wms_abstract"),
                attribution_title: meta("wms_attribution_title"),
                attribution_onlineresource: meta("wms_attribution_onlineresource"),
            },
        }
    }

    /// One [`LayerSummary`] per layer, in draw order.
    pub fn layer_summaries(&self) -> Vec<LayerSummary> {
        self.layers()
            .iter()
            .map(|layer| LayerSummary {
                group: layer.group.clone(),
                name: layer.name.clone(),
                kind: layer.kind,
                projection: layer.projection.clone(),
                status: layer.status,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Layer;

    #[test]
    fn summary_reflects_wms_metadata() {
        let mut map = Map::new();
        map.name = "demo".to_string();
        map.projection = "epsg:4326".to_string();
        map.set_extent(-180.0, -90.0, 180.0, 90.0);

        let summary = map.summary();
        assert!(!summary.wms.enabled);
        assert_eq!(summary.extent, Some([-180.0, -90.0, 180.0, 90.0]));

        map.metadata.set("wms_enable_request", "*");
        map.metadata.set("wms_title", "Demo WMS");
        let summary = map.summary();
        assert!(summary.wms.enabled);
        assert_eq!(summary.wms.title.as_deref(), Some("Demo WMS"));
        assert_eq!(summary.wms.r#abstract, None);
    }

    #[test]
    fn layer_summaries_follow_draw_order() {
        let mut map = Map::new();
        map.add_layer(Layer {
            name: "base".to_string(),
            group: Some("background".to_string()),
            kind: LayerType::Raster,
            ..Layer::default()
        });
        map.add_layer(Layer {
            name: "roads".to_string(),
            kind: LayerType::Line,
            status: LayerStatus::Default,
            ..Layer::default()
        });

        let rows = map.layer_summaries();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "base");
        assert_eq!(rows[0].group.as_deref(), Some("background"));
        assert_eq!(rows[1].kind, LayerType::Line);
        assert_eq!(rows[1].status, LayerStatus::Default);
    }
}
