pub mod client;
pub mod messages;
pub mod response;

pub use client::{TapClient, TapOptions, SIMBAD_TAP_URL};
pub use response::decode_json;

#[cfg(test)]
mod tests;
