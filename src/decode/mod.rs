//! Response decoder module
//!
//! Turns a JSON response body into the page's records. Where the records
//! live in the body is chosen by a [`RecordLocator`].

mod decoders;
mod types;

pub use decoders::JsonDecoder;
pub use types::{RecordDecoder, RecordLocator};
