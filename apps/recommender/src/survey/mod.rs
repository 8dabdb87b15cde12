// Survey input: the record model and the NDJSON loader that produces it.

pub mod loader;
pub mod models;
