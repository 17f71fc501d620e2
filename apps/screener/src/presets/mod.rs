// Job description presets: a flat JSON file of named job descriptions.

pub mod handlers;
pub mod store;
