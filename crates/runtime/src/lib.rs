//! Runtime support for League of Legends api clients generated by lolgen
//!
//! Generated code stays small by delegating everything that is not specific
//! to one operation to this crate: executing requests through a pluggable
//! [`Transport`], mapping status codes to [`Error`] variants, decoding and
//! re-keying responses, and building urls.

mod error;
mod params;
mod response;
mod spell_range;
mod transport;
pub mod uritemplates;

pub use error::{Error, Result};
pub use params::{encode_query, ToParam};
pub use response::{call, decode, parse_epoch_millis, rekey, verify_response};
pub use spell_range::SpellRange;
pub use transport::{RawResponse, Transport};

#[cfg(test)]
pub use transport::MockTransport;

// Generated code derives through these so it only depends on this crate
pub use serde;
pub use serde_json;
