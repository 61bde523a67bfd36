use clap::Parser;
use pretty_assertions::assert_eq;
use roster_web::config::{Args, BackendChoice, ConfigError, DemoAccount, load_firebase_config};
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

fn config_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

// ── Arguments ───────────────────────────────────────────────────

#[test]
fn defaults() {
    let args = Args::try_parse_from(["roster", "--in-memory"]).unwrap();
    assert_eq!(args.port, 8080);
    assert_eq!(args.bind, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(args.socket_addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    assert!(!args.verbose);
    assert!(args.demo_accounts.is_empty());
}

#[test]
fn demo_accounts_are_repeatable() {
    let args = Args::try_parse_from([
        "roster",
        "--in-memory",
        "--demo-account",
        "admin@school.test:hunter2",
        "--demo-account",
        "t@school.test:pa:ss",
    ])
    .unwrap();

    let BackendChoice::InMemory(accounts) = args.backend_choice().unwrap() else {
        panic!("expected in-memory backend");
    };
    assert_eq!(
        accounts,
        vec![
            DemoAccount {
                email: "admin@school.test".into(),
                password: "hunter2".into()
            },
            DemoAccount {
                email: "t@school.test".into(),
                password: "pa:ss".into()
            },
        ]
    );
}

#[test]
fn malformed_demo_account_is_rejected() {
    assert!(Args::try_parse_from(["roster", "--in-memory", "--demo-account", "nopassword"]).is_err());
    assert!(Args::try_parse_from(["roster", "--in-memory", "--demo-account", ":pw"]).is_err());
}

#[test]
fn demo_account_needs_in_memory() {
    assert!(Args::try_parse_from(["roster", "--demo-account", "a@b.com:pw"]).is_err());
}

#[test]
fn backends_are_exclusive() {
    assert!(Args::try_parse_from(["roster", "--in-memory", "--firebase-config", "f.json"]).is_err());
}

#[test]
fn no_backend_is_an_error() {
    let args = Args::try_parse_from(["roster"]).unwrap();
    assert!(matches!(args.backend_choice(), Err(ConfigError::NoBackend)));
}

#[test]
fn in_memory_backend_builds() {
    let args = Args::try_parse_from(["roster", "--in-memory", "--demo-account", "a@b.com:pw"]).unwrap();
    let backend = args.backend_choice().unwrap().into_backend().unwrap();
    assert_eq!(backend.sessions().provider_name(), "In-memory accounts");
}

// ── Firebase config file ────────────────────────────────────────

#[test]
fn firebase_config_loads_from_file() {
    let file = config_file(r#"{ "apiKey": "AIza-test", "projectId": "demo-project" }"#);
    let args = Args::try_parse_from([
        "roster",
        "--firebase-config",
        file.path().to_str().unwrap(),
    ])
    .unwrap();

    let BackendChoice::Firebase(config) = args.backend_choice().unwrap() else {
        panic!("expected Firebase backend");
    };
    assert_eq!(config.api_key, "AIza-test");
    assert_eq!(config.project_id, "demo-project");

    let backend = BackendChoice::Firebase(config).into_backend().unwrap();
    assert_eq!(backend.sessions().provider_name(), "Firebase Auth");
}

#[test]
fn firebase_config_requires_keys() {
    let file = config_file(r#"{ "projectId": "demo-project" }"#);
    assert!(matches!(
        load_firebase_config(file.path()),
        Err(ConfigError::MissingField("apiKey"))
    ));

    let file = config_file(r#"{ "apiKey": "k" }"#);
    assert!(matches!(
        load_firebase_config(file.path()),
        Err(ConfigError::MissingField("projectId"))
    ));
}

#[test]
fn firebase_config_errors_name_the_file() {
    let file = config_file("not json");
    let err = load_firebase_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));

    let missing = std::path::Path::new("/definitely/not/here.json");
    assert!(matches!(
        load_firebase_config(missing),
        Err(ConfigError::Read { .. })
    ));
}
