//! Settings for the player: schema, defaults and the file/env loader.
//!
//! Every section is optional; missing keys fall back to the defaults in
//! `schema`.

mod load;
mod schema;

pub use schema::*;
