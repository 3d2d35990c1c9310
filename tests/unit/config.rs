// Environment parsing without touching the process environment.

#[test]
fn memory_backend_needs_no_database_url() {
    use taskforge::config::{Config, StorageBackend};

    let config = Config::from_pairs(vec![
        ("STORAGE_BACKEND", "memory"),
        ("JWT_SECRET", "unit-secret"),
    ])
    .unwrap();
    assert_eq!(config.storage_backend, StorageBackend::Memory);
    assert_eq!(config.server_address(), "127.0.0.1:8000");
    assert!(config.database().is_err());
}

#[test]
fn auth_settings_follow_the_environment() {
    use taskforge::config::Config;

    let config = Config::from_pairs(vec![
        ("STORAGE_BACKEND", "memory"),
        ("JWT_SECRET", "unit-secret"),
        ("JWT_ACCESS_TOKEN_EXPIRES_IN", "60"),
        ("BCRYPT_COST", "4"),
    ])
    .unwrap();
    let auth = config.auth();
    assert_eq!(auth.jwt_secret, "unit-secret");
    assert_eq!(auth.access_token_expires_in, 60);
    assert_eq!(auth.bcrypt_cost, 4);
}

#[test]
fn out_of_range_bcrypt_cost_is_rejected() {
    use taskforge::config::Config;

    let result = Config::from_pairs(vec![
        ("STORAGE_BACKEND", "memory"),
        ("JWT_SECRET", "unit-secret"),
        ("BCRYPT_COST", "2"),
    ]);
    assert!(result.is_err());
}
