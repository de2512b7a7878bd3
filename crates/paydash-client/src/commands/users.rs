use crate::commands::common::{SnapshotOptions, load_snapshot, non_empty};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{UserAddData, UserListData, UserRemoveData};
use crate::ledger::{UserDraft, new_user, remove_user, search_users};
use crate::records::UserRecord;
use crate::state::{ensure_writable, write_snapshot};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default, Clone)]
pub struct ListOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct AddOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub draft: UserDraft,
}

#[derive(Debug, Default, Clone)]
pub struct RemoveOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub id: String,
}

pub fn list(options: ListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let search = non_empty(options.search.as_deref());
    let snapshot = load_snapshot(&options.snapshot)?;
    let users = match search.as_deref() {
        Some(term) => search_users(&snapshot.users, term)
            .into_iter()
            .cloned()
            .collect::<Vec<UserRecord>>(),
        None => snapshot.users.clone(),
    };

    success(
        "users list",
        UserListData {
            search,
            total: snapshot.users.len(),
            users,
        },
    )
}

pub fn add(options: AddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if options.draft.name.trim().is_empty() || options.draft.email.trim().is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "--name and --email must not be empty.",
            Some("users add"),
        ));
    }
    let snapshot = load_snapshot(&options.snapshot)?;
    let user = new_user(&options.draft);

    let mut users = snapshot.users;
    users.insert(0, user.clone());
    write_snapshot(&snapshot.paths.users, &users)?;

    success(
        "users add",
        UserAddData {
            user,
            user_count: users.len(),
            path: snapshot.paths.users.describe(),
        },
    )
}

/// Removes the user and every transaction recorded under their name.
pub fn remove(options: RemoveOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let id = options.id.trim().to_string();
    let snapshot = load_snapshot(&options.snapshot)?;
    let Some(removal) = remove_user(&snapshot.users, &snapshot.transactions, &id) else {
        return Err(ClientError::record_not_found("user", &id));
    };

    ensure_writable(&snapshot.paths.users)?;
    if removal.transactions_removed > 0 {
        ensure_writable(&snapshot.paths.transactions)?;
    }
    write_snapshot(&snapshot.paths.users, &removal.users)?;
    if removal.transactions_removed > 0 {
        write_snapshot(&snapshot.paths.transactions, &removal.transactions)?;
    }
    tracing::info!(
        user = %removal.removed.name,
        transactions_removed = removal.transactions_removed,
        "user removed"
    );

    success(
        "users remove",
        UserRemoveData {
            user: removal.removed,
            transactions_removed: removal.transactions_removed,
            remaining_users: removal.users.len(),
            remaining_transactions: removal.transactions.len(),
        },
    )
}
