//! Payee and memo extraction from free-text narrations.

mod extractor;
mod normalize;
mod registry;

pub use extractor::{CORPORATE_SUFFIXES, ExtractionResult, PayeeExtractor, UNKNOWN_PAYEE};
pub use normalize::{END_TO_END_MARKER, normalize};
pub use registry::PayeeRegistry;
