//! Client generated at build time from the parser's reference fixture

include!(concat!(env!("OUT_DIR"), "/client.rs"));
