mod support;

use paydash_client::commands::SnapshotOptions;
use paydash_client::commands::session::{
    self, LoginOptions, UpdateOptions, login_with_store, logout_with_store, show_with_store,
    update_with_store,
};
use paydash_client::ledger::ProfilePatch;
use paydash_client::session::{FileSessionStore, MemorySessionStore, SessionStore};
use serde_json::Value;
use support::Home;

#[test]
fn login_matches_email_case_insensitively() {
    let home = Home::seeded();
    let store = MemorySessionStore::default();
    let result = login_with_store(&store, &home.snapshot(), "  Ravi@Example.com ");
    assert!(result.is_ok());
    if let Ok(envelope) = result {
        assert_eq!(envelope.data["signed_in"], Value::Bool(true));
        assert_eq!(
            envelope.data["session"]["user"]["name"],
            Value::from("Ravi Menon")
        );
    }
    let saved = store.load();
    assert!(matches!(saved, Ok(Some(ref session)) if session.user.name == "Ravi Menon"));
}

#[test]
fn unknown_email_does_not_sign_in() {
    let home = Home::seeded();
    let store = MemorySessionStore::default();
    let result = login_with_store(&store, &home.snapshot(), "ghost@example.com");
    assert!(matches!(result, Err(ref error) if error.code == "user_not_found"));
    assert!(matches!(store.load(), Ok(None)));
}

#[test]
fn show_without_session_is_an_error_and_logout_is_idempotent() {
    let store = MemorySessionStore::default();
    let shown = show_with_store(&store);
    assert!(matches!(shown, Err(ref error) if error.code == "session_missing"));

    let logout = logout_with_store(&store);
    assert!(logout.is_ok());
    if let Ok(envelope) = logout {
        assert_eq!(envelope.data["cleared"], Value::Bool(false));
    }
}

#[test]
fn file_session_survives_between_commands() {
    let home = Home::seeded();
    let login = session::login(LoginOptions {
        snapshot: home.snapshot(),
        email: "asha@example.com".to_string(),
    });
    assert!(login.is_ok());
    assert!(FileSessionStore::in_home(home.path()).path().exists());

    let shown = session::show(home.snapshot());
    assert!(shown.is_ok());
    if let Ok(envelope) = shown {
        assert_eq!(envelope.command, "session show");
        assert_eq!(
            envelope.data["session"]["user"]["email"],
            Value::from("asha@example.com")
        );
        assert!(envelope.data["session"]["signed_in_at"].is_string());
    }

    let logout = session::logout(home.snapshot());
    assert!(matches!(logout, Ok(ref envelope) if envelope.data["cleared"] == Value::Bool(true)));
    assert!(!FileSessionStore::in_home(home.path()).path().exists());
}

#[test]
fn corrupt_session_file_reads_as_signed_out() {
    let home = Home::seeded();
    home.write("session.json", "{not json");
    let shown = session::show(home.snapshot());
    assert!(matches!(shown, Err(ref error) if error.code == "session_missing"));
}

fn signed_in_as(home: &Home, email: &str) -> MemorySessionStore {
    let store = MemorySessionStore::default();
    assert!(login_with_store(&store, &home.snapshot(), email).is_ok());
    store
}

#[test]
fn update_rewrites_the_users_row_and_the_session() {
    let home = Home::seeded();
    let store = signed_in_as(&home, "asha@example.com");
    let signed_in_at = store
        .load()
        .ok()
        .flatten()
        .map(|session| session.signed_in_at)
        .unwrap_or_default();

    let patch = ProfilePatch {
        name: Some(" Asha R ".to_string()),
        phone: Some("+91 98450 00000".to_string()),
        ..ProfilePatch::default()
    };
    let result = update_with_store(&store, &home.snapshot(), &patch);
    assert!(result.is_ok());
    if let Ok(envelope) = result {
        assert_eq!(envelope.command, "session update");
        assert_eq!(envelope.data["session"]["user"]["name"], Value::from("Asha R"));
        assert_eq!(
            envelope.data["session"]["user"]["phone"],
            Value::from("+91 98450 00000")
        );
    }

    let users = home.read_json("users.json");
    assert_eq!(users[0]["id"], Value::from("usr_1"));
    assert_eq!(users[0]["name"], Value::from("Asha R"));
    assert_eq!(users[0]["email"], Value::from("asha@example.com"));
    assert_eq!(users[0]["role"], Value::from("Admin"));
    assert_eq!(users[1]["name"], Value::from("Ravi Menon"));

    let saved = store.load();
    assert!(matches!(
        saved,
        Ok(Some(ref session)) if session.user.name == "Asha R" && session.signed_in_at == signed_in_at
    ));
}

#[test]
fn update_without_session_is_an_error() {
    let home = Home::seeded();
    let store = MemorySessionStore::default();
    let patch = ProfilePatch {
        role: Some("Owner".to_string()),
        ..ProfilePatch::default()
    };
    let result = update_with_store(&store, &home.snapshot(), &patch);
    assert!(matches!(result, Err(ref error) if error.code == "session_missing"));
    assert_eq!(home.read_json("users.json")[0]["role"], Value::from("Admin"));
}

#[test]
fn empty_or_blank_updates_are_rejected() {
    let home = Home::seeded();
    let store = signed_in_as(&home, "asha@example.com");

    let empty = update_with_store(&store, &home.snapshot(), &ProfilePatch::default());
    assert!(matches!(empty, Err(ref error) if error.code == "invalid_argument"));

    let blank = ProfilePatch {
        name: Some("   ".to_string()),
        ..ProfilePatch::default()
    };
    let result = update_with_store(&store, &home.snapshot(), &blank);
    assert!(matches!(result, Err(ref error) if error.code == "invalid_argument"));
    assert_eq!(home.read_json("users.json")[0]["name"], Value::from("Asha Rao"));
}

#[test]
fn update_refuses_an_email_owned_by_someone_else() {
    let home = Home::seeded();
    let store = signed_in_as(&home, "asha@example.com");
    let patch = ProfilePatch {
        email: Some("RAVI@example.com".to_string()),
        ..ProfilePatch::default()
    };
    let result = update_with_store(&store, &home.snapshot(), &patch);
    assert!(matches!(result, Err(ref error) if error.code == "invalid_argument"));
    assert_eq!(
        home.read_json("users.json")[0]["email"],
        Value::from("asha@example.com")
    );
}

#[test]
fn update_with_users_on_stdin_changes_nothing() {
    let home = Home::seeded();
    let store = signed_in_as(&home, "asha@example.com");
    let patch = ProfilePatch {
        name: Some("Asha R".to_string()),
        ..ProfilePatch::default()
    };
    let options = SnapshotOptions {
        users: Some("-".to_string()),
        stdin_override: Some(support::USERS),
        ..home.snapshot()
    };
    let result = update_with_store(&store, &options, &patch);
    assert!(matches!(result, Err(ref error) if error.code == "invalid_argument"));
    let stored = std::fs::read_to_string(home.file("users.json")).unwrap_or_default();
    assert_eq!(stored, support::USERS);
    assert!(matches!(store.load(), Ok(Some(ref session)) if session.user.name == "Asha Rao"));
}

#[test]
fn file_backed_update_persists_between_commands() {
    let home = Home::seeded();
    let login = session::login(LoginOptions {
        snapshot: home.snapshot(),
        email: "ravi@example.com".to_string(),
    });
    assert!(login.is_ok());

    let updated = session::update(UpdateOptions {
        snapshot: home.snapshot(),
        profile: ProfilePatch {
            role: Some("Admin".to_string()),
            ..ProfilePatch::default()
        },
    });
    assert!(updated.is_ok());

    let shown = session::show(home.snapshot());
    assert!(matches!(
        shown,
        Ok(ref envelope) if envelope.data["session"]["user"]["role"] == Value::from("Admin")
    ));
    assert_eq!(home.read_json("users.json")[1]["role"], Value::from("Admin"));
}
