use finlit_core::config::{EngineConfig, PPF_RATE_ENV};

use super::file;

/// Build the engine configuration: defaults, then the optional YAML/JSON
/// file, then the `FINLIT_PPF_RATE` environment override.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let base = match path {
        Some(p) => {
            tracing::debug!(path = p, "loading engine config");
            file::read_yaml::<EngineConfig>(p)?
        }
        None => EngineConfig::default(),
    };

    let env_rate = std::env::var(PPF_RATE_ENV).ok();
    Ok(base.with_ppf_override(env_rate.as_deref())?)
}
