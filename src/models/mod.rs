pub mod config;
pub mod pedigree;

pub use config::*;
pub use pedigree::*;
