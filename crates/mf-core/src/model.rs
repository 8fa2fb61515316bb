//! The MapFile document model.
//!
//! A `Map` owns everything below it: one `Legend`, one `Scalebar`, a
//! `Metadata` dictionary, and an ordered `Layer` list whose order is the
//! rendering order (first layer draws first, at the bottom). Layers own
//! `Class`es, classes own `Style` and `Label` lists. Ownership is
//! strictly tree-shaped: no entity is shared between parents, and
//! nothing outlives its root.
//!
//! Parsing and serialization live in [`crate::parser`] and
//! [`crate::emitter`]; this module is the mutation surface a calling
//! application drives interactively.

use crate::emitter::emit_document;
use crate::enums::{LabelPosition, LayerStatus, LayerType, Status, Units};
use crate::error::{Error, Result};
use crate::parser::parse_document;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::fs;
use std::path::Path;

// ─── Color ───────────────────────────────────────────────────────────────

/// RGB triple, one byte per channel, written as `R G B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

// ─── Leaf entities ───────────────────────────────────────────────────────

/// Text styling for legends, scalebars, and class labels.
///
/// Every field is optional; unset fields are simply not written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Label {
    pub font: Option<String>,
    pub size: Option<f64>,
    pub color: Option<Color>,
    pub outline_color: Option<Color>,
    pub position: Option<LabelPosition>,
}

/// One drawing pass of a class: fill/outline colors, symbol reference,
/// and stroke width.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    pub color: Option<Color>,
    pub outline_color: Option<Color>,
    pub size: Option<f64>,
    pub symbol: Option<String>,
    pub width: Option<f64>,
}

/// Ordered string→string dictionary with unique keys.
///
/// Insertion order is the write order; re-setting an existing key
/// replaces its value in place (last write wins, position preserved).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Composite entities ──────────────────────────────────────────────────

/// A thematic class of a layer: an optional filter expression plus the
/// styles and labels applied to matching features, in order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Class {
    pub name: Option<String>,
    pub expression: Option<String>,
    pub styles: SmallVec<[Style; 2]>,
    pub labels: SmallVec<[Label; 2]>,
}

impl Class {
    pub fn add_style(&mut self, style: Style) -> &mut Style {
        let idx = self.styles.len();
        self.styles.push(style);
        &mut self.styles[idx]
    }

    pub fn style(&self, index: usize) -> Option<&Style> {
        self.styles.get(index)
    }

    pub fn remove_style(&mut self, index: usize) -> Option<Style> {
        (index < self.styles.len()).then(|| self.styles.remove(index))
    }

    pub fn add_label(&mut self, label: Label) -> &mut Label {
        let idx = self.labels.len();
        self.labels.push(label);
        &mut self.labels[idx]
    }

    pub fn label(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    pub fn remove_label(&mut self, index: usize) -> Option<Label> {
        (index < self.labels.len()).then(|| self.labels.remove(index))
    }
}

/// One map layer: a data source drawn with an ordered list of classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub group: Option<String>,
    pub kind: LayerType,
    /// Lowercase EPSG code (`epsg:4326`), empty when unset.
    pub projection: String,
    pub status: LayerStatus,
    /// Data source path or SQL, written as the DATA directive.
    pub data: Option<String>,
    pub classes: Vec<Class>,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            name: String::new(),
            group: None,
            kind: LayerType::Polygon,
            projection: String::new(),
            status: LayerStatus::On,
            data: None,
            classes: Vec::new(),
        }
    }
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: Class) -> &mut Class {
        let idx = self.classes.len();
        self.classes.push(class);
        &mut self.classes[idx]
    }

    pub fn class(&self, index: usize) -> Option<&Class> {
        self.classes.get(index)
    }

    pub fn class_mut(&mut self, index: usize) -> Option<&mut Class> {
        self.classes.get_mut(index)
    }

    pub fn remove_class(&mut self, index: usize) -> Option<Class> {
        (index < self.classes.len()).then(|| self.classes.remove(index))
    }
}

/// The map legend: a switch plus the label styling of legend entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub status: Status,
    pub label: Label,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            status: Status::Off,
            label: Label::default(),
        }
    }
}

/// The scale bar drawn onto rendered output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scalebar {
    pub status: Status,
    pub units: Units,
    pub color: Color,
    pub outline_color: Color,
    pub label: Label,
}

impl Default for Scalebar {
    fn default() -> Self {
        Self {
            status: Status::Off,
            units: Units::Meters,
            color: Color::rgb(0, 0, 0),
            outline_color: Color::rgb(0, 0, 0),
            label: Label::default(),
        }
    }
}

// ─── Map ─────────────────────────────────────────────────────────────────

/// The root aggregate of a MapFile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub name: String,
    pub status: Status,
    /// Lowercase EPSG code (`epsg:4326`), empty when unset.
    pub projection: String,
    /// Geographic bounds as `[minx, miny, maxx, maxy]`; `None` until set,
    /// and no EXTENT line is written while unset.
    pub extent: Option<[f64; 4]>,
    pub width: u32,
    pub height: u32,
    pub units: Units,
    pub(crate) fontset: Option<String>,
    pub(crate) symbolset: Option<String>,
    pub metadata: Metadata,
    pub legend: Legend,
    pub scalebar: Scalebar,
    pub(crate) layers: Vec<Layer>,
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl Map {
    /// A fresh map with the engine defaults: `MYMAP`, status ON,
    /// 500×500 pixels, meters, no extent, no layers.
    pub fn new() -> Self {
        Self {
            name: "MYMAP".to_string(),
            status: Status::On,
            projection: String::new(),
            extent: None,
            width: 500,
            height: 500,
            units: Units::Meters,
            fontset: None,
            symbolset: None,
            metadata: Metadata::default(),
            legend: Legend::default(),
            scalebar: Scalebar::default(),
            layers: Vec::new(),
        }
    }

    /// Parse a document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound { path: path.into() });
        }
        let src = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.into(),
            source,
        })?;
        parse_document(&src)
    }

    /// Serialize the document to disk, replacing any existing file.
    ///
    /// No locking is performed; concurrent writers to the same path race
    /// and the final content is whichever write lands last. Callers that
    /// share documents must serialize access themselves.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, emit_document(self)).map_err(|source| Error::Write {
            path: path.into(),
            source,
        })
    }

    pub fn set_extent(&mut self, minx: f64, miny: f64, maxx: f64, maxy: f64) {
        self.extent = Some([minx, miny, maxx, maxy]);
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Point the map at a font lookup file. The path must exist when the
    /// setter runs; a dangling reference is rejected here, not at write
    /// time.
    pub fn set_font_set(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound { path: path.into() });
        }
        self.fontset = Some(path.to_string_lossy().into_owned());
        Ok(())
    }

    pub fn font_set(&self) -> Option<&str> {
        self.fontset.as_deref()
    }

    /// Point the map at a symbol definition file; validated like
    /// [`Map::set_font_set`].
    pub fn set_symbol_set(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound { path: path.into() });
        }
        self.symbolset = Some(path.to_string_lossy().into_owned());
        Ok(())
    }

    pub fn symbol_set(&self) -> Option<&str> {
        self.symbolset.as_deref()
    }

    /// Append a layer and return a handle for further setup.
    pub fn add_layer(&mut self, layer: Layer) -> &mut Layer {
        let idx = self.layers.len();
        self.layers.push(layer);
        &mut self.layers[idx]
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Swap layer `index` with its predecessor (toward the bottom of the
    /// draw order). A no-op at index 0 or out of bounds; returns whether
    /// the order changed.
    pub fn move_layer_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.layers.len() {
            return false;
        }
        self.layers.swap(index - 1, index);
        true
    }

    /// Swap layer `index` with its successor. A no-op on the last layer
    /// or out of bounds; returns whether the order changed.
    pub fn move_layer_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.layers.len() {
            return false;
        }
        self.layers.swap(index, index + 1);
        true
    }

    /// Remove and return the layer at `index`; `None` when out of bounds.
    pub fn remove_layer(&mut self, index: usize) -> Option<Layer> {
        (index < self.layers.len()).then(|| self.layers.remove(index))
    }
}
