pub mod emitter;
pub mod enums;
pub mod error;
pub mod model;
pub mod parser;
pub mod scan;
pub mod summary;

pub use emitter::emit_document;
pub use enums::{LabelPosition, LayerStatus, LayerType, Status, Units};
pub use error::{Error, Result};
pub use model::{Class, Color, Label, Layer, Legend, Map, Metadata, Scalebar, Style};
pub use parser::parse_document;
pub use summary::{LayerSummary, MapSummary, WmsSummary};
