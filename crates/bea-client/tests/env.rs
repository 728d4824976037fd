//! Credential lookup from the environment.
//!
//! Kept in its own test binary so changing the process environment cannot
//! race with other tests.

use bea_client::{API_KEY_ENV, BeaClient, BeaConfig, BeaError};

#[test]
fn test_missing_env_token_is_rejected() {
    // SAFETY: this is the only test in this binary, so no other thread reads
    // the environment concurrently.
    unsafe { std::env::remove_var(API_KEY_ENV) };

    let err = BeaClient::from_env().unwrap_err();
    assert!(matches!(err, BeaError::MissingApiKey));

    let err = BeaClient::from_env_with_config(BeaConfig::default()).unwrap_err();
    assert!(matches!(err, BeaError::MissingApiKey));
}
