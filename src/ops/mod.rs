pub mod detail;
pub mod filter;
pub mod mapper;
pub mod timescale;
