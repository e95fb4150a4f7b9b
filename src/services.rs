pub mod areas;
pub mod settings;
