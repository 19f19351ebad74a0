pub mod config;
pub mod count;
pub mod filter;
pub mod flatten;
pub mod iterate;
pub mod merge;
