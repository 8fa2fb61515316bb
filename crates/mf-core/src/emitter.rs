//! Emitter: document model → MapFile text.
//!
//! Field order inside each block is fixed; indentation is two spaces per
//! nesting level and every closing `END` carries a `# KEYWORD` comment
//! for readability. Output is semantically lossless; whitespace and
//! comments of the source document are not reproduced.

use crate::model::{Class, Label, Layer, Legend, Map, Scalebar, Style};

/// Emit a [`Map`] as a MapFile text document.
#[must_use]
pub fn emit_document(map: &Map) -> String {
    let mut w = BlockWriter::new();
    w.open("MAP");

    w.line(format!("STATUS {}", map.status.token()));
    w.line(format!("NAME \"{}\"", map.name));
    if let Some([minx, miny, maxx, maxy]) = map.extent {
        w.line(format!(
            "EXTENT {} {} {} {}",
            format_num(minx),
            format_num(miny),
            format_num(maxx),
            format_num(maxy)
        ));
    }
    if let Some(fontset) = &map.fontset {
        w.line(format!("FONTSET \"{fontset}\""));
    }
    if let Some(symbolset) = &map.symbolset {
        w.line(format!("SYMBOLSET \"{symbolset}\""));
    }
    if map.width > 0 && map.height > 0 {
        w.line(format!("SIZE {} {}", map.width, map.height));
    }
    w.line(format!("UNITS {}", map.units.token()));

    if !map.projection.is_empty() {
        w.blank();
        emit_projection(&mut w, &map.projection);
    }

    // The WEB wrapper is always written, even with no metadata inside.
    w.blank();
    w.open("WEB");
    if !map.metadata.is_empty() {
        w.open("METADATA");
        for (key, value) in map.metadata.iter() {
            w.line(format!("\"{key}\" \"{value}\""));
        }
        w.close("METADATA");
    }
    w.close("WEB");

    w.blank();
    emit_legend(&mut w, &map.legend);

    w.blank();
    emit_scalebar(&mut w, &map.scalebar);

    for layer in map.layers() {
        w.blank();
        emit_layer(&mut w, layer);
    }

    w.close("MAP");
    w.finish()
}

// ─── Entity emitters ─────────────────────────────────────────────────────

fn emit_projection(w: &mut BlockWriter, projection: &str) {
    w.open("PROJECTION");
    w.line(format!("\"init={}\"", projection.to_ascii_lowercase()));
    w.close("PROJECTION");
}

fn emit_legend(w: &mut BlockWriter, legend: &Legend) {
    w.open("LEGEND");
    w.line(format!("STATUS {}", legend.status.token()));
    emit_label(w, &legend.label);
    w.close("LEGEND");
}

fn emit_scalebar(w: &mut BlockWriter, scalebar: &Scalebar) {
    w.open("SCALEBAR");
    w.line(format!("STATUS {}", scalebar.status.token()));
    w.line(format!("UNITS {}", scalebar.units.token()));
    w.line(format!("COLOR {}", scalebar.color));
    w.line(format!("OUTLINECOLOR {}", scalebar.outline_color));
    emit_label(w, &scalebar.label);
    w.close("SCALEBAR");
}

fn emit_label(w: &mut BlockWriter, label: &Label) {
    w.open("LABEL");
    if let Some(font) = &label.font {
        w.line(format!("FONT \"{font}\""));
    }
    if let Some(size) = label.size {
        w.line(format!("SIZE {}", format_num(size)));
    }
    if let Some(color) = label.color {
        w.line(format!("COLOR {color}"));
    }
    if let Some(outline_color) = label.outline_color {
        w.line(format!("OUTLINECOLOR {outline_color}"));
    }
    if let Some(position) = label.position {
        w.line(format!("POSITION {}", position.token()));
    }
    w.close("LABEL");
}

fn emit_style(w: &mut BlockWriter, style: &Style) {
    w.open("STYLE");
    if let Some(color) = style.color {
        w.line(format!("COLOR {color}"));
    }
    if let Some(outline_color) = style.outline_color {
        w.line(format!("OUTLINECOLOR {outline_color}"));
    }
    if let Some(size) = style.size {
        w.line(format!("SIZE {}", format_num(size)));
    }
    if let Some(symbol) = &style.symbol {
        w.line(format!("SYMBOL \"{symbol}\""));
    }
    if let Some(width) = style.width {
        w.line(format!("WIDTH {}", format_num(width)));
    }
    w.close("STYLE");
}

fn emit_class(w: &mut BlockWriter, class: &Class) {
    w.open("CLASS");
    if let Some(name) = &class.name {
        w.line(format!("NAME \"{name}\""));
    }
    if let Some(expression) = &class.expression {
        w.line(format!("EXPRESSION \"{expression}\""));
    }
    for style in &class.styles {
        emit_style(w, style);
    }
    for label in &class.labels {
        emit_label(w, label);
    }
    w.close("CLASS");
}

fn emit_layer(w: &mut BlockWriter, layer: &Layer) {
    w.open("LAYER");
    if !layer.name.is_empty() {
        w.line(format!("NAME \"{}\"", layer.name));
    }
    if let Some(group) = &layer.group {
        w.line(format!("GROUP \"{group}\""));
    }
    w.line(format!("TYPE {}", layer.kind.token()));
    w.line(format!("STATUS {}", layer.status.token()));
    if let Some(data) = &layer.data {
        w.line(format!("DATA \"{data}\""));
    }
    if !layer.projection.is_empty() {
        emit_projection(w, &layer.projection);
    }
    for class in &layer.classes {
        emit_class(w, class);
    }
    w.close("LAYER");
}

// ─── Writer ──────────────────────────────────────────────────────────────

/// Indentation-aware line writer shared by all entity emitters.
struct BlockWriter {
    out: String,
    depth: usize,
}

impl BlockWriter {
    fn new() -> Self {
        Self {
            out: String::with_capacity(1024),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn open(&mut self, keyword: &str) {
        self.indent();
        self.out.push_str(keyword);
        self.out.push('\n');
        self.depth += 1;
    }

    fn close(&mut self, keyword: &str) {
        self.depth -= 1;
        self.indent();
        self.out.push_str("END # ");
        self.out.push_str(keyword);
        self.out.push('\n');
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.indent();
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Integral values print without a fractional part; everything else uses
/// the shortest representation that parses back to the same `f64`.
fn format_num(n: f64) -> String {
    if n == n.floor() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{LayerStatus, LayerType};
    use crate::model::Color;

    #[test]
    fn fresh_map_emits_no_extent_and_an_empty_web_block() {
        let out = emit_document(&Map::new());
        assert!(!out.contains("EXTENT"));
        assert!(out.contains("  WEB\n  END # WEB\n"));
        assert!(!out.contains("METADATA"));
        assert!(out.ends_with("END # MAP\n"));
    }

    #[test]
    fn extent_is_written_exactly_once_after_set() {
        let mut map = Map::new();
        map.set_extent(-180.0, -90.0, 180.0, 90.0);
        let out = emit_document(&map);
        assert_eq!(out.matches("EXTENT").count(), 1);
        assert!(out.contains("  EXTENT -180 -90 180 90\n"));
    }

    #[test]
    fn header_fields_keep_their_order() {
        let mut map = Map::new();
        map.name = "ordered".to_string();
        map.set_extent(0.0, 0.0, 1.0, 1.0);
        let out = emit_document(&map);

        let status = out.find("STATUS").unwrap();
        let name = out.find("NAME").unwrap();
        let extent = out.find("EXTENT").unwrap();
        let size = out.find("SIZE").unwrap();
        let units = out.find("UNITS").unwrap();
        assert!(status < name && name < extent && extent < size && size < units);
    }

    #[test]
    fn metadata_emits_inside_web_in_insertion_order() {
        let mut map = Map::new();
        map.metadata.set("wms_title", "Demo");
        map.metadata.set("wms_srs", "EPSG:4326");
        let out = emit_document(&map);
        let block = "    METADATA\n      \"wms_title\" \"Demo\"\n      \"wms_srs\" \"EPSG:4326\"\n    END # METADATA\n";
        assert!(out.contains(block), "unexpected WEB block:\n{out}");
    }

    #[test]
    fn layer_block_shape() {
        let mut map = Map::new();
        let layer = map.add_layer(Layer::new());
        layer.name = "districts".to_string();
        layer.kind = LayerType::Polygon;
        layer.status = LayerStatus::On;
        layer.projection = "epsg:4326".to_string();

        let out = emit_document(&map);
        assert!(out.contains("  LAYER\n    NAME \"districts\"\n    TYPE POLYGON\n    STATUS ON\n"));
        assert!(out.contains("    PROJECTION\n      \"init=epsg:4326\"\n    END # PROJECTION\n"));
        assert!(out.contains("  END # LAYER\n"));
    }

    #[test]
    fn scalebar_colors_and_label() {
        let mut map = Map::new();
        map.scalebar.color = Color::rgb(255, 255, 255);
        map.scalebar.label.size = Some(8.0);
        let out = emit_document(&map);
        assert!(out.contains("    COLOR 255 255 255\n"));
        assert!(out.contains("    LABEL\n      SIZE 8\n    END # LABEL\n"));
    }

    #[test]
    fn status_defaults_to_on_in_header() {
        let out = emit_document(&Map::new());
        assert!(out.starts_with("MAP\n  STATUS ON\n  NAME \"MYMAP\"\n"));
    }

    #[test]
    fn fractional_numbers_keep_precision() {
        assert_eq!(format_num(2.5), "2.5");
        assert_eq!(format_num(-180.0), "-180");
        assert_eq!(format_num(20026376.39), "20026376.39");
    }
}
