#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use semgate_gateway::config::{self, EngineKind};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8000"
  lisen: "0.0.0.0:9000" # typo should fail
engine:
  kind: manifest
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
engine:
  kind: manifest
  manifest_path: "target/semantic_manifest.json"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8000");
    assert_eq!(cfg.engine.kind, EngineKind::Manifest);
    assert_eq!(cfg.engine.manifest_path().to_str(), Some("target/semantic_manifest.json"));
}

#[test]
fn unsupported_version() {
    let bad = r#"
version: 2
engine: { kind: manifest }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn listen_must_be_socket_addr() {
    let bad = r#"
version: 1
server: { listen: "localhost" }
engine: { kind: manifest }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("server.listen"));
}

#[test]
fn static_engine_needs_group_bys() {
    let bad = r#"
version: 1
engine: { kind: static }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("engine.group_bys"));
}

#[test]
fn static_engine_rejects_ragged_rows() {
    let bad = r#"
version: 1
engine:
  kind: static
  group_bys: { gmv: [merchant__merchant_id] }
  result:
    columns: [merchant__merchant_id, gmv]
    rows:
      - [m1]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("engine.result rows"));
}

#[test]
fn kind_specific_fields_do_not_mix() {
    let bad = r#"
version: 1
engine:
  kind: manifest
  group_bys: { gmv: [merchant__merchant_id] }
"#;
    assert!(config::load_from_str(bad).is_err());
}
