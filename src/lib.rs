pub mod error;
pub mod parse;
pub mod query;
pub mod validate;
pub mod wasm;
