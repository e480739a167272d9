// crates/om-cli/src/services/mod.rs - Infrastructure services

pub mod launcher;

pub use launcher::SystemLauncher;
