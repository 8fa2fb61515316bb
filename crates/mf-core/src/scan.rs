//! Block scanner for the line-oriented `KEYWORD … END` grammar.
//!
//! A block opens on a line holding nothing but a bare keyword (`MAP`,
//! `LAYER`, …) and closes on `END`, optionally suffixed with a
//! `# KEYWORD` readability comment. Blocks nest; the scanner tracks
//! depth so an inner `END` never closes an outer block. It hands each
//! entity its own inclusive line range and never interprets content;
//! that is the owning entity's job.

use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// One trimmed source line with its 1-based position in the document.
///
/// Positions are carried through recursion so errors deep inside a
/// nested block still report document line numbers.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub no: usize,
    pub text: &'a str,
}

/// Split a document into trimmed lines. Blank lines are kept so block
/// ranges stay contiguous slices of the document.
pub fn split_lines(src: &str) -> Vec<Line<'_>> {
    src.lines()
        .enumerate()
        .map(|(i, text)| Line {
            no: i + 1,
            text: text.trim(),
        })
        .collect()
}

/// If `text` is a block-start line (a bare identifier), return the
/// keyword uppercased. `END` is the terminator, never a start.
pub fn block_keyword(text: &str) -> Option<String> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let keyword = text.to_ascii_uppercase();
    if keyword == "END" { None } else { Some(keyword) }
}

/// True for a block terminator: `END`, optionally followed by a comment.
pub fn is_end(text: &str) -> bool {
    let Some(prefix) = text.get(..3) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case("END") {
        return false;
    }
    let rest = text[3..].trim_start();
    rest.is_empty() || rest.starts_with('#')
}

/// Return the index range — inclusive of both delimiter lines — of the
/// block opening at `lines[start]`, skipping over nested blocks.
pub fn block_range(lines: &[Line<'_>], start: usize) -> Result<RangeInclusive<usize>> {
    debug_assert!(block_keyword(lines[start].text).is_some());
    let mut depth = 0usize;
    for (i, line) in lines.iter().enumerate().skip(start) {
        if block_keyword(line.text).is_some() {
            depth += 1;
        } else if is_end(line.text) {
            depth -= 1;
            if depth == 0 {
                return Ok(start..=i);
            }
        }
    }
    Err(Error::MalformedBlock {
        line: lines[start].no,
        reason: format!(
            "unterminated {} block",
            block_keyword(lines[start].text).unwrap_or_else(|| "?".into())
        ),
    })
}

/// One dispatch event while walking a block's interior.
#[derive(Debug)]
pub enum BlockItem<'a, 'b> {
    /// A nested block, handed over whole (both delimiter lines included).
    Nested(&'b str, &'b [Line<'a>]),
    /// A non-blank, non-comment line that is neither a block delimiter
    /// nor part of a nested block.
    Scalar(Line<'a>),
}

/// Walk one buffered block, dispatching nested blocks and scalar lines
/// to the owning entity's handler.
///
/// `block` includes both delimiter lines. Nested blocks are sliced out
/// via [`block_range`] and handed over whole. A stray `END` in the
/// interior (one not consumed as a nested block's terminator) is a
/// structural error.
pub fn walk_block<'a>(
    block: &[Line<'a>],
    mut on_item: impl FnMut(BlockItem<'a, '_>) -> Result<()>,
) -> Result<()> {
    let interior = &block[1..block.len() - 1];
    let mut i = 0;
    while i < interior.len() {
        let line = interior[i];
        if line.text.is_empty() || line.text.starts_with('#') {
            i += 1;
            continue;
        }
        if let Some(keyword) = block_keyword(line.text) {
            let range = block_range(interior, i)?;
            on_item(BlockItem::Nested(keyword.as_str(), &interior[range.clone()]))?;
            i = *range.end() + 1;
            continue;
        }
        if is_end(line.text) {
            return Err(Error::MalformedBlock {
                line: line.no,
                reason: "END with no matching open block".into(),
            });
        }
        on_item(BlockItem::Scalar(line))?;
        i += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<Line<'_>> {
        split_lines(src)
    }

    #[test]
    fn bare_keywords_open_blocks() {
        assert_eq!(block_keyword("LAYER").as_deref(), Some("LAYER"));
        assert_eq!(block_keyword("scalebar").as_deref(), Some("SCALEBAR"));
        assert_eq!(block_keyword("END"), None);
        assert_eq!(block_keyword("NAME \"x\""), None);
        assert_eq!(block_keyword(""), None);
    }

    #[test]
    fn end_line_variants() {
        assert!(is_end("END"));
        assert!(is_end("end"));
        assert!(is_end("END # LAYER"));
        assert!(is_end("END #MAP"));
        assert!(!is_end("ENDS"));
        assert!(!is_end("EXTENT 0 0 1 1"));
    }

    #[test]
    fn range_skips_nested_blocks() {
        let src = "LAYER\nCLASS\nSTYLE\nEND\nEND # CLASS\nEND # LAYER\nNAME \"after\"";
        let lines = lines(src);
        let range = block_range(&lines, 0).unwrap();
        assert_eq!(range, 0..=5);
    }

    #[test]
    fn unterminated_block_reports_opening_line() {
        let src = "MAP\nLAYER\nEND # LAYER";
        let lines = lines(src);
        let err = block_range(&lines, 0).unwrap_err();
        match err {
            Error::MalformedBlock { line, .. } => assert_eq!(line, 1),
            other => panic!("expected MalformedBlock, got {other:?}"),
        }
    }

    #[test]
    fn walk_dispatches_blocks_and_scalars() {
        let src = "LEGEND\nSTATUS ON\nLABEL\nSIZE 8\nEND # LABEL\nEND # LEGEND";
        let lines = lines(src);
        let mut blocks = Vec::new();
        let mut scalars = Vec::new();
        walk_block(&lines, |item| {
            match item {
                BlockItem::Nested(keyword, sub) => blocks.push((keyword.to_string(), sub.len())),
                BlockItem::Scalar(line) => scalars.push(line.text.to_string()),
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(blocks, vec![("LABEL".to_string(), 3)]);
        assert_eq!(scalars, vec!["STATUS ON".to_string()]);
    }

    #[test]
    fn stray_end_is_rejected_with_line_number() {
        let src = "MAP\nNAME \"m\"\nEND\nEND # MAP";
        let lines = lines(src);
        // The block closes at the first END; walking the full four-line
        // slice exposes the dangling terminator.
        let err = walk_block(&lines, |_| Ok(())).unwrap_err();
        match err {
            Error::MalformedBlock { line, .. } => assert_eq!(line, 3),
            other => panic!("expected MalformedBlock, got {other:?}"),
        }
    }
}
