#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use scopegate_gateway::config::{self, GatewayConfig, ReloadMode};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:8090"
entitlements:
  pathh: "entitlements.json" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8090");
    assert_eq!(cfg.entitlements.path, "entitlements.json");
    assert_eq!(cfg.entitlements.reload, ReloadMode::Startup);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
gateway:
  listen: "127.0.0.1:9000"
  max_body_bytes: 65536
entitlements:
  path: "/etc/scopegate/entitlements.json"
  reload: interval
  reload_interval_ms: 5000
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.gateway.max_body_bytes, 65536);
    assert_eq!(cfg.entitlements.reload, ReloadMode::Interval);
    assert_eq!(cfg.entitlements.reload_interval_ms, 5000);
}

#[test]
fn rejects_out_of_range_values() {
    for bad in [
        "version: 2\n",
        "version: 1\ngateway:\n  listen: \"not-an-addr\"\n",
        "version: 1\ngateway:\n  max_body_bytes: 10\n",
        "version: 1\nentitlements:\n  path: \" \"\n",
        "version: 1\nentitlements:\n  reload_interval_ms: 10\n",
        "version: 1\nentitlements:\n  reload: sometimes\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert_eq!(err.code().as_str(), "CONFIG", "{bad}");
    }
}

#[test]
fn port_env_overrides_listen_port() {
    let cfg = GatewayConfig::default();

    let addr = config::listen_addr(&cfg, None).unwrap();
    assert_eq!(addr.to_string(), "0.0.0.0:8090");

    let addr = config::listen_addr(&cfg, Some("9443")).unwrap();
    assert_eq!(addr.to_string(), "0.0.0.0:9443");

    let addr = config::listen_addr(&cfg, Some("")).unwrap();
    assert_eq!(addr.port(), 8090);

    assert!(config::listen_addr(&cfg, Some("http")).is_err());
}

#[test]
fn missing_file_uses_defaults() {
    let cfg = config::load_from_file("/nonexistent/scopegate.yaml").expect("defaults");
    assert_eq!(cfg.version, 1);
}
