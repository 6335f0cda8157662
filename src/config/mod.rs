// src/config/mod.rs
//
// Configuration record and optional file/env override layer: a `config`
// crate builder with TOML-then-YAML file precedence and an
// `Environment::with_prefix("MPQS").separator("_")` override layer on top.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// The four required tuning knobs. `auto_config` produces one of these
/// directly; this type carries no other state, so it stays `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpqsConfig {
    pub factor_base_bound: u64,
    pub sieving_half_width: u64,
    pub polynomial_exponent: u32,
    pub log_threshold: u64,
}

impl MpqsConfig {
    /// Layers `mpqs.toml` / `mpqs.yaml` and `MPQS_`-prefixed environment
    /// variables over `base`. `auto_config` itself never calls this —
    /// callers opt in explicitly, keeping `auto_config` pure.
    pub fn load_overriding(base: MpqsConfig) -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults(base);

        if Path::new("mpqs.toml").exists() {
            builder = builder.add_source(File::with_name("mpqs.toml"));
        } else if Path::new("mpqs.yaml").exists() {
            builder = builder.add_source(File::with_name("mpqs.yaml"));
        }

        builder = builder.add_source(
            Environment::with_prefix("MPQS").separator("_").try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// As `load_overriding`, but reading a caller-specified file instead
    /// of probing the working directory for `mpqs.toml`/`mpqs.yaml`.
    pub fn load_from_file<P: AsRef<Path>>(base: MpqsConfig, path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults(base);

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(
            Environment::with_prefix("MPQS").separator("_").try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    fn builder_with_defaults(base: MpqsConfig) -> config::ConfigBuilder<config::builder::DefaultState> {
        Config::builder()
            .set_default("factor_base_bound", base.factor_base_bound as i64)
            .expect("literal default key")
            .set_default("sieving_half_width", base.sieving_half_width as i64)
            .expect("literal default key")
            .set_default("polynomial_exponent", base.polynomial_exponent as i64)
            .expect("literal default key")
            .set_default("log_threshold", base.log_threshold as i64)
            .expect("literal default key")
    }
}
