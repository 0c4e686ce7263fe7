pub mod config_io;
pub mod fetch;
pub mod log;
pub mod prefs;
