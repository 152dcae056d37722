//! eTIMS invoice field extraction.

mod confidence;
mod merge;
mod parser;
pub mod rules;

pub use confidence::score_fields;
pub use merge::apply_ocr_assist;
pub use parser::EtimsParser;
pub use rules::Field;
