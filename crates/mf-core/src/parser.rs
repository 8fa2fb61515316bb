//! Parser for the MapFile text format → document model.
//!
//! The block scanner splits the document structurally; each entity walks
//! its own buffered block, recursing into the nested blocks it owns and
//! dispatching the remaining lines through an ordered, first-match-wins
//! scalar-field table (`winnow` handles the within-line token grammar).
//! Unrecognized blocks are skipped wholesale (their content is dropped
//! on round-trip); unrecognized scalar lines are ignored so newer
//! documents stay readable.

use crate::enums::{LabelPosition, LayerStatus, LayerType, Status, Units};
use crate::error::{Error, Result};
use crate::model::{Class, Color, Label, Layer, Legend, Map, Metadata, Scalebar, Style};
use crate::scan::{BlockItem, Line, block_keyword, block_range, is_end, split_lines, walk_block};
use winnow::ascii::space1;
use winnow::combinator::delimited;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// Parse a MapFile document string into a [`Map`].
///
/// Content before the MAP block and non-block content after it are
/// ignored; a document without a MAP block is malformed.
#[must_use = "parsing result should be used"]
pub fn parse_document(src: &str) -> Result<Map> {
    let lines = split_lines(src);
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.text.is_empty() || line.text.starts_with('#') {
            i += 1;
            continue;
        }
        if let Some(keyword) = block_keyword(line.text) {
            let range = block_range(&lines, i)?;
            if keyword == "MAP" {
                let map = parse_map(&lines[range.clone()])?;
                for trailing in &lines[*range.end() + 1..] {
                    if is_end(trailing.text) {
                        return Err(Error::MalformedBlock {
                            line: trailing.no,
                            reason: "END with no matching open block".into(),
                        });
                    }
                }
                return Ok(map);
            }
            log::debug!("dropping top-level {keyword} block at line {}", line.no);
            i = *range.end() + 1;
            continue;
        }
        if is_end(line.text) {
            return Err(Error::MalformedBlock {
                line: line.no,
                reason: "END with no matching open block".into(),
            });
        }
        i += 1;
    }
    Err(Error::MalformedBlock {
        line: 1,
        reason: "no MAP block in document".into(),
    })
}

// ─── Entity block walkers ────────────────────────────────────────────────

fn parse_map(block: &[Line<'_>]) -> Result<Map> {
    let mut map = Map::new();
    walk_block(block, |item| match item {
        BlockItem::Nested("PROJECTION", sub) => {
            map.projection = parse_projection(sub)?;
            Ok(())
        }
        BlockItem::Nested("WEB", sub) => parse_web(sub, &mut map.metadata),
        BlockItem::Nested("LEGEND", sub) => {
            map.legend = parse_legend(sub)?;
            Ok(())
        }
        BlockItem::Nested("SCALEBAR", sub) => {
            map.scalebar = parse_scalebar(sub)?;
            Ok(())
        }
        BlockItem::Nested("LAYER", sub) => {
            let layer = parse_layer(sub)?;
            map.layers.push(layer);
            Ok(())
        }
        BlockItem::Nested(other, sub) => {
            log::debug!("dropping unsupported {other} block at line {}", sub[0].no);
            Ok(())
        }
        BlockItem::Scalar(line) => apply_map_field(&mut map, line),
    })?;
    Ok(map)
}

/// Extract the EPSG code from a PROJECTION block's `"init=…"` line.
fn parse_projection(block: &[Line<'_>]) -> Result<String> {
    let mut projection = String::new();
    walk_block(block, |item| {
        if let BlockItem::Scalar(line) = item {
            let mut input = line.text;
            if let Ok(inner) = quoted.parse_next(&mut input)
                && input.trim_start().is_empty()
                && let Some(prefix) = inner.get(..5)
                && prefix.eq_ignore_ascii_case("init=")
            {
                projection = inner[5..].to_ascii_lowercase();
            }
        }
        Ok(())
    })?;
    Ok(projection)
}

/// The WEB block only carries metadata we model; its other directives
/// are ignored.
fn parse_web(block: &[Line<'_>], metadata: &mut Metadata) -> Result<()> {
    walk_block(block, |item| match item {
        BlockItem::Nested("METADATA", sub) => parse_metadata(sub, metadata),
        BlockItem::Nested(other, sub) => {
            log::debug!("dropping unsupported {other} block at line {}", sub[0].no);
            Ok(())
        }
        BlockItem::Scalar(_) => Ok(()),
    })
}

fn parse_metadata(block: &[Line<'_>], metadata: &mut Metadata) -> Result<()> {
    walk_block(block, |item| {
        if let BlockItem::Scalar(line) = item {
            let mut input = line.text;
            // Duplicate keys: last write wins.
            if let Ok((key, value)) = metadata_pair.parse_next(&mut input)
                && input.trim_start().is_empty()
            {
                metadata.set(key, value);
            }
        }
        Ok(())
    })
}

fn parse_legend(block: &[Line<'_>]) -> Result<Legend> {
    let mut legend = Legend::default();
    walk_block(block, |item| match item {
        BlockItem::Nested("LABEL", sub) => {
            legend.label = parse_label(sub)?;
            Ok(())
        }
        BlockItem::Nested(other, sub) => {
            log::debug!("dropping unsupported {other} block at line {}", sub[0].no);
            Ok(())
        }
        BlockItem::Scalar(line) => {
            let (key, rest) = split_field(line.text);
            if key.eq_ignore_ascii_case("STATUS") {
                legend.status = Status::decode(rest)?;
            }
            Ok(())
        }
    })?;
    Ok(legend)
}

fn parse_scalebar(block: &[Line<'_>]) -> Result<Scalebar> {
    let mut scalebar = Scalebar::default();
    walk_block(block, |item| match item {
        BlockItem::Nested("LABEL", sub) => {
            scalebar.label = parse_label(sub)?;
            Ok(())
        }
        BlockItem::Nested(other, sub) => {
            log::debug!("dropping unsupported {other} block at line {}", sub[0].no);
            Ok(())
        }
        BlockItem::Scalar(line) => {
            let (key, rest) = split_field(line.text);
            match key.to_ascii_uppercase().as_str() {
                "STATUS" => scalebar.status = Status::decode(rest)?,
                "UNITS" => scalebar.units = Units::decode(rest)?,
                "COLOR" => scalebar.color = field(rgb, "COLOR", line, rest)?,
                "OUTLINECOLOR" => scalebar.outline_color = field(rgb, "OUTLINECOLOR", line, rest)?,
                _ => {}
            }
            Ok(())
        }
    })?;
    Ok(scalebar)
}

fn parse_label(block: &[Line<'_>]) -> Result<Label> {
    let mut label = Label::default();
    walk_block(block, |item| match item {
        BlockItem::Nested(other, sub) => {
            log::debug!("dropping unsupported {other} block at line {}", sub[0].no);
            Ok(())
        }
        BlockItem::Scalar(line) => {
            let (key, rest) = split_field(line.text);
            match key.to_ascii_uppercase().as_str() {
                "FONT" => label.font = Some(field(quoted, "FONT", line, rest)?.to_string()),
                "SIZE" => label.size = Some(field(number, "SIZE", line, rest)?),
                "COLOR" => label.color = Some(field(rgb, "COLOR", line, rest)?),
                "OUTLINECOLOR" => {
                    label.outline_color = Some(field(rgb, "OUTLINECOLOR", line, rest)?);
                }
                "POSITION" => label.position = Some(LabelPosition::decode(rest)?),
                _ => {}
            }
            Ok(())
        }
    })?;
    Ok(label)
}

fn parse_style(block: &[Line<'_>]) -> Result<Style> {
    let mut style = Style::default();
    walk_block(block, |item| match item {
        BlockItem::Nested(other, sub) => {
            log::debug!("dropping unsupported {other} block at line {}", sub[0].no);
            Ok(())
        }
        BlockItem::Scalar(line) => {
            let (key, rest) = split_field(line.text);
            match key.to_ascii_uppercase().as_str() {
                "COLOR" => style.color = Some(field(rgb, "COLOR", line, rest)?),
                "OUTLINECOLOR" => {
                    style.outline_color = Some(field(rgb, "OUTLINECOLOR", line, rest)?);
                }
                "SIZE" => style.size = Some(field(number, "SIZE", line, rest)?),
                "SYMBOL" => style.symbol = Some(field(quoted, "SYMBOL", line, rest)?.to_string()),
                "WIDTH" => style.width = Some(field(number, "WIDTH", line, rest)?),
                _ => {}
            }
            Ok(())
        }
    })?;
    Ok(style)
}

fn parse_class(block: &[Line<'_>]) -> Result<Class> {
    let mut class = Class::default();
    walk_block(block, |item| match item {
        BlockItem::Nested("STYLE", sub) => {
            class.styles.push(parse_style(sub)?);
            Ok(())
        }
        BlockItem::Nested("LABEL", sub) => {
            class.labels.push(parse_label(sub)?);
            Ok(())
        }
        BlockItem::Nested(other, sub) => {
            log::debug!("dropping unsupported {other} block at line {}", sub[0].no);
            Ok(())
        }
        BlockItem::Scalar(line) => {
            let (key, rest) = split_field(line.text);
            match key.to_ascii_uppercase().as_str() {
                "NAME" => class.name = Some(field(quoted, "NAME", line, rest)?.to_string()),
                "EXPRESSION" => {
                    class.expression = Some(field(quoted, "EXPRESSION", line, rest)?.to_string());
                }
                _ => {}
            }
            Ok(())
        }
    })?;
    Ok(class)
}

fn parse_layer(block: &[Line<'_>]) -> Result<Layer> {
    let mut layer = Layer::default();
    walk_block(block, |item| match item {
        BlockItem::Nested("CLASS", sub) => {
            layer.classes.push(parse_class(sub)?);
            Ok(())
        }
        BlockItem::Nested("PROJECTION", sub) => {
            layer.projection = parse_projection(sub)?;
            Ok(())
        }
        BlockItem::Nested(other, sub) => {
            log::debug!("dropping unsupported {other} block at line {}", sub[0].no);
            Ok(())
        }
        BlockItem::Scalar(line) => {
            let (key, rest) = split_field(line.text);
            match key.to_ascii_uppercase().as_str() {
                "NAME" => layer.name = field(quoted, "NAME", line, rest)?.to_string(),
                "GROUP" => layer.group = Some(field(quoted, "GROUP", line, rest)?.to_string()),
                "TYPE" => layer.kind = LayerType::decode(rest)?,
                "STATUS" => layer.status = LayerStatus::decode(rest)?,
                "DATA" => layer.data = Some(field(quoted, "DATA", line, rest)?.to_string()),
                _ => {}
            }
            Ok(())
        }
    })?;
    Ok(layer)
}

// ─── Scalar field dispatch ───────────────────────────────────────────────

fn apply_map_field(map: &mut Map, line: Line<'_>) -> Result<()> {
    let (key, rest) = split_field(line.text);
    match key.to_ascii_uppercase().as_str() {
        "NAME" => map.name = field(quoted, "NAME", line, rest)?.to_string(),
        "STATUS" => map.status = Status::decode(rest)?,
        "EXTENT" => map.extent = Some(field(quad, "EXTENT", line, rest)?),
        "FONTSET" => map.fontset = Some(field(quoted, "FONTSET", line, rest)?.to_string()),
        "SYMBOLSET" => map.symbolset = Some(field(quoted, "SYMBOLSET", line, rest)?.to_string()),
        "SIZE" => {
            let (width, height) = field(dimensions, "SIZE", line, rest)?;
            map.width = width;
            map.height = height;
        }
        "UNITS" => map.units = Units::decode(rest)?,
        _ => {}
    }
    Ok(())
}

/// Split a scalar line into its field keyword and the raw remainder.
fn split_field(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim_start()),
        None => (text, ""),
    }
}

/// Run one value parser over a field's raw text, requiring full
/// consumption; anything else is a field parse error at this line.
fn field<'a, T>(
    mut parser: impl Parser<&'a str, T, ErrMode<ContextError>>,
    name: &'static str,
    line: Line<'a>,
    raw: &'a str,
) -> Result<T> {
    let mut input = raw;
    match parser.parse_next(&mut input) {
        Ok(value) if input.trim_start().is_empty() => Ok(value),
        _ => Err(Error::FieldParse {
            line: line.no,
            field: name,
            value: raw.to_string(),
        }),
    }
}

// ─── Low-level value parsers ─────────────────────────────────────────────

fn quoted<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited('"', take_till(0.., '"'), '"').parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<f64> {
    let start = *input;
    if input.starts_with('-') {
        *input = &input[1..];
    }
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ =
            take_while::<_, _, ContextError>(0.., |c: char| c.is_ascii_digit()).parse_next(input);
    }
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f64>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

fn integer(input: &mut &str) -> ModalResult<u32> {
    take_while(1.., |c: char| c.is_ascii_digit())
        .parse_next(input)?
        .parse::<u32>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

fn byte(input: &mut &str) -> ModalResult<u8> {
    take_while(1..=3, |c: char| c.is_ascii_digit())
        .parse_next(input)?
        .parse::<u8>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

fn rgb(input: &mut &str) -> ModalResult<Color> {
    let r = byte.parse_next(input)?;
    let _ = space1.parse_next(input)?;
    let g = byte.parse_next(input)?;
    let _ = space1.parse_next(input)?;
    let b = byte.parse_next(input)?;
    Ok(Color::rgb(r, g, b))
}

fn quad(input: &mut &str) -> ModalResult<[f64; 4]> {
    let minx = number.parse_next(input)?;
    let _ = space1.parse_next(input)?;
    let miny = number.parse_next(input)?;
    let _ = space1.parse_next(input)?;
    let maxx = number.parse_next(input)?;
    let _ = space1.parse_next(input)?;
    let maxy = number.parse_next(input)?;
    Ok([minx, miny, maxx, maxy])
}

fn dimensions(input: &mut &str) -> ModalResult<(u32, u32)> {
    let width = integer.parse_next(input)?;
    let _ = space1.parse_next(input)?;
    let height = integer.parse_next(input)?;
    Ok((width, height))
}

fn metadata_pair<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    let key = quoted.parse_next(input)?;
    let _ = space1.parse_next(input)?;
    let value = quoted.parse_next(input)?;
    Ok((key, value))
}
