#![warn(missing_docs)]
// Note: this overwrites the links in the README to point to the rust docs of the sibling crates.
//! [vms_axum]: https://docs.rs/vms_axum/latest/vms_axum/index.html
//! [vms_sqlite]: https://docs.rs/vms_sqlite/latest/vms_sqlite/index.html
#![doc = include_str!("../README.md")]

pub mod impls;

mod cli;
pub use cli::Cli;

mod config;
pub use config::AppConfig;
