//! Unified configuration for the combined bot + admin server

use anyhow::Result;
use trackquiz_core::config::CoreConfig;

#[derive(Debug, Clone)]
pub struct UnifiedConfig {
    pub core: CoreConfig,
    pub admin: admin::config::Config,
}

impl UnifiedConfig {
    pub fn from_env() -> Result<Self> {
        let core = CoreConfig::from_env()?;
        let admin = admin::config::Config::from_env(core.database_path())?;

        Ok(Self { core, admin })
    }
}
