//! End-to-end account flow tests
//!
//! These tests drive the credential store through the same sequence of
//! operations the interactive menu performs — register, check a login,
//! reset a password — against a real file in a temporary directory, and
//! reload the store between steps to prove everything round-trips
//! through `regno.csv`.

use openshelf_cli::store::{CredentialStore, StoreError};

#[test]
fn register_then_login_round_trips_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regno.csv");

    let mut store = CredentialStore::load(&path).expect("empty store from missing file");
    assert!(store.is_empty());

    store
        .register("a@b.com", "Abcdef1!", "First pet?", "Rex")
        .expect("registration");

    // A fresh load from the same file sees the account and accepts the
    // same credentials; a wrong-case password is rejected.
    let reloaded = CredentialStore::load(&path).expect("reload");
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.check_login("a@b.com", "Abcdef1!"));
    assert!(!reloaded.check_login("a@b.com", "abcdef1!"));
}

#[test]
fn duplicate_registration_is_rejected_and_leaves_the_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regno.csv");

    let mut store = CredentialStore::load(&path).unwrap();
    store
        .register("a@b.com", "Abcdef1!", "First pet?", "Rex")
        .unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let err = store
        .register("a@b.com", "Other9pw!", "Color?", "blue")
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail { .. }));

    let after = std::fs::read_to_string(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn password_reset_survives_a_reload_and_only_changes_the_digest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regno.csv");

    let mut store = CredentialStore::load(&path).unwrap();
    store
        .register("a@b.com", "Abcdef1!", "First pet?", "Rex")
        .unwrap();
    let before = store.get("a@b.com").unwrap().clone();

    // The stored answer is lowercased, so any casing of "rex" matches.
    store
        .reset_password("a@b.com", "Rex", "Newpass1!")
        .expect("reset");

    let reloaded = CredentialStore::load(&path).unwrap();
    let record = reloaded.get("a@b.com").unwrap();
    assert_eq!(record.security_question, before.security_question);
    assert_eq!(record.answer, before.answer);
    assert_ne!(record.password, before.password);
    assert!(reloaded.check_login("a@b.com", "Newpass1!"));
    assert!(!reloaded.check_login("a@b.com", "Abcdef1!"));
}

#[test]
fn several_accounts_keep_a_deterministic_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regno.csv");

    let mut store = CredentialStore::load(&path).unwrap();
    store
        .register("zoe@example.com", "Zyxwvu9?", "Home town?", "Oslo")
        .unwrap();
    store
        .register("ann@example.com", "Abcdef1!", "First pet?", "Rex")
        .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "email,password,security_question,answer");
    assert!(lines[1].starts_with("ann@example.com,"));
    assert!(lines[2].starts_with("zoe@example.com,"));
}
