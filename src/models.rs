pub mod area;
pub mod settings;
pub mod store;
