use serde::Deserialize;
use scopegate_core::error::{Result, ScopeGateError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub entitlements: EntitlementsSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            entitlements: EntitlementsSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ScopeGateError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.gateway.validate()?;
        self.entitlements.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(ScopeGateError::Config(format!(
                "gateway.listen must be a valid socket address: {}",
                self.listen
            )));
        }
        if !(1024..=16 * 1024 * 1024).contains(&self.max_body_bytes) {
            return Err(ScopeGateError::Config(
                "gateway.max_body_bytes must be between 1024 and 16777216".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8090".into()
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}

/// When the entitlement file is (re)read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReloadMode {
    /// Load once at startup.
    #[default]
    Startup,
    /// Re-read on every action call.
    PerRequest,
    /// Poll every `reload_interval_ms`.
    Interval,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitlementsSection {
    #[serde(default = "default_entitlements_path")]
    pub path: String,

    #[serde(default)]
    pub reload: ReloadMode,

    #[serde(default = "default_reload_interval_ms")]
    pub reload_interval_ms: u64,
}

impl Default for EntitlementsSection {
    fn default() -> Self {
        Self {
            path: default_entitlements_path(),
            reload: ReloadMode::default(),
            reload_interval_ms: default_reload_interval_ms(),
        }
    }
}

impl EntitlementsSection {
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(ScopeGateError::Config("entitlements.path must not be empty".into()));
        }
        if !(1000..=3_600_000).contains(&self.reload_interval_ms) {
            return Err(ScopeGateError::Config(
                "entitlements.reload_interval_ms must be between 1000 and 3600000".into(),
            ));
        }
        Ok(())
    }
}

fn default_entitlements_path() -> String {
    "entitlements.json".into()
}
fn default_reload_interval_ms() -> u64 {
    30000
}
