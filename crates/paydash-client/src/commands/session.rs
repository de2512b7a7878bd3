use crate::commands::common::{SnapshotOptions, load_snapshot};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{SessionData, SessionLogoutData};
use crate::ledger::{ProfilePatch, apply_profile};
use crate::session::{FileSessionStore, Session, SessionStore, find_user_by_email};
use crate::state::{ensure_writable, resolve_home, write_snapshot};
use crate::{ClientError, ClientResult};

const UPDATE_COMMAND: &str = "session update";

#[derive(Debug, Default, Clone)]
pub struct LoginOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub email: String,
}

pub fn login(options: LoginOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let home = resolve_home(options.snapshot.home_override)?;
    let store = FileSessionStore::in_home(&home);
    login_with_store(&store, &options.snapshot, &options.email)
}

pub fn show(options: SnapshotOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let home = resolve_home(options.home_override)?;
    show_with_store(&FileSessionStore::in_home(&home))
}

#[derive(Debug, Default, Clone)]
pub struct UpdateOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub profile: ProfilePatch,
}

/// Edits the signed-in user's profile, saving it to both the users snapshot
/// and the session.
pub fn update(options: UpdateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let home = resolve_home(options.snapshot.home_override)?;
    let store = FileSessionStore::in_home(&home);
    update_with_store(&store, &options.snapshot, &options.profile)
}

pub fn logout(options: SnapshotOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let home = resolve_home(options.home_override)?;
    logout_with_store(&FileSessionStore::in_home(&home))
}

#[doc(hidden)]
pub fn login_with_store(
    store: &dyn SessionStore,
    snapshot_options: &SnapshotOptions<'_>,
    email: &str,
) -> ClientResult<SuccessEnvelope> {
    if email.trim().is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "--email must not be empty.",
            Some("session login"),
        ));
    }
    let snapshot = load_snapshot(snapshot_options)?;
    let Some(user) = find_user_by_email(&snapshot.users, email) else {
        return Err(ClientError::user_not_found(email.trim()));
    };

    let session = Session::begin(user.clone());
    store.save(&session)?;
    success(
        "session login",
        SessionData {
            signed_in: true,
            session: Some(session),
        },
    )
}

#[doc(hidden)]
pub fn show_with_store(store: &dyn SessionStore) -> ClientResult<SuccessEnvelope> {
    let Some(session) = store.load()? else {
        return Err(ClientError::session_missing());
    };
    success(
        "session show",
        SessionData {
            signed_in: true,
            session: Some(session),
        },
    )
}

#[doc(hidden)]
pub fn logout_with_store(store: &dyn SessionStore) -> ClientResult<SuccessEnvelope> {
    let cleared = store.load()?.is_some();
    store.clear()?;
    success("session logout", SessionLogoutData { cleared })
}

#[doc(hidden)]
pub fn update_with_store(
    store: &dyn SessionStore,
    snapshot_options: &SnapshotOptions<'_>,
    patch: &ProfilePatch,
) -> ClientResult<SuccessEnvelope> {
    if patch.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Pass at least one of --name, --email, --phone, --role or --avatar.",
            Some(UPDATE_COMMAND),
        ));
    }
    if let Some(field) = patch.blank_field() {
        return Err(ClientError::invalid_argument_for_command(
            &format!("--{field} must not be empty."),
            Some(UPDATE_COMMAND),
        ));
    }

    let Some(mut session) = store.load()? else {
        return Err(ClientError::session_missing());
    };
    let snapshot = load_snapshot(snapshot_options)?;
    let user_id = session.user.id.to_string();
    let mut users = snapshot.users;
    let Some(index) = users.iter().position(|user| user.id.matches(&user_id)) else {
        return Err(ClientError::record_not_found("user", &user_id));
    };

    if let Some(email) = patch.email.as_deref() {
        let taken = find_user_by_email(&users, email).is_some_and(|other| !other.id.matches(&user_id));
        if taken {
            return Err(ClientError::invalid_argument_for_command(
                &format!("Another user already uses `{}`.", email.trim()),
                Some(UPDATE_COMMAND),
            ));
        }
    }

    ensure_writable(&snapshot.paths.users)?;
    apply_profile(&mut users[index], patch);
    write_snapshot(&snapshot.paths.users, &users)?;

    session.user = users[index].clone();
    store.save(&session)?;
    tracing::info!(user = %session.user.name, "profile updated");

    success(
        UPDATE_COMMAND,
        SessionData {
            signed_in: true,
            session: Some(session),
        },
    )
}
