pub mod config;
pub mod filter;
pub mod item;
pub mod record;
pub mod urgency;

pub use config::*;
pub use filter::*;
pub use item::*;
pub use record::*;
pub use urgency::*;
