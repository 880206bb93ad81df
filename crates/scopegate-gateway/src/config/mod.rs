//! Gateway config loader (strict parsing).

pub mod schema;

use std::{fs, io, net::SocketAddr};

use scopegate_core::error::{Result, ScopeGateError};

pub use schema::{EntitlementsSection, GatewayConfig, GatewaySection, ReloadMode};

/// Load config from `path`. A missing file yields the defaults.
pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(%path, "config file not found, using defaults");
            Ok(GatewayConfig::default())
        }
        Err(e) => Err(ScopeGateError::Config(format!("read config failed: {e}"))),
    }
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| ScopeGateError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the listen address, letting a `PORT` value replace the port.
pub fn listen_addr(cfg: &GatewayConfig, port: Option<&str>) -> Result<SocketAddr> {
    let mut addr: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|e| ScopeGateError::Config(format!("gateway.listen: {e}")))?;

    if let Some(p) = port.map(str::trim).filter(|p| !p.is_empty()) {
        let port: u16 = p
            .parse()
            .map_err(|_| ScopeGateError::Config(format!("invalid PORT: {p}")))?;
        addr.set_port(port);
    }
    Ok(addr)
}
