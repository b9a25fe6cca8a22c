//! Configuration management
//!
//! TOML-based configuration with `${VAR}` environment substitution and
//! `STRATA_*` environment overrides. The configuration (plus CLI flags)
//! is the thin front-end that produces the single [`ExportContext`]
//! consumed by the core engine.
//!
//! [`ExportContext`]: crate::domain::ExportContext

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CatalogConfig, ExportSettings, LoggingConfig, StrataConfig,
};
