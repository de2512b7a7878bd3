use crate::commands::common::{SnapshotOptions, load_snapshot, parse_as_of};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::PaymentAddData;
use crate::ledger::{PaymentDraft, apply_payment, new_payment};
use crate::records::number::parse_float_prefix;
use crate::state::{ensure_writable, write_snapshot};
use crate::{ClientError, ClientResult};

const COMMAND: &str = "payment add";

#[derive(Debug, Default, Clone)]
pub struct AddOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub draft: PaymentDraft,
}

/// Records a payment and writes both snapshots back. The users file is only
/// rewritten when the payer was unknown.
pub fn add(options: AddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    validate(&options.draft)?;
    let snapshot = load_snapshot(&options.snapshot)?;
    let mut transactions = snapshot.transactions;
    let mut users = snapshot.users;

    let outcome = new_payment(&options.draft, &users);
    ensure_writable(&snapshot.paths.transactions)?;
    if outcome.new_user.is_some() {
        ensure_writable(&snapshot.paths.users)?;
    }
    let transaction = outcome.transaction.clone();
    let created_user = outcome.new_user.clone();
    apply_payment(&mut transactions, &mut users, outcome);

    write_snapshot(&snapshot.paths.transactions, &transactions)?;
    if created_user.is_some() {
        write_snapshot(&snapshot.paths.users, &users)?;
    }
    tracing::info!(
        id = %transaction.id,
        user = %transaction.user,
        created_user = created_user.is_some(),
        "payment recorded"
    );

    success(
        COMMAND,
        PaymentAddData {
            transaction,
            created_user,
            transaction_count: transactions.len(),
            transactions_path: snapshot.paths.transactions.describe(),
            users_path: snapshot.paths.users.describe(),
        },
    )
}

fn validate(draft: &PaymentDraft) -> ClientResult<()> {
    if draft.user.trim().is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "--user must not be empty.",
            Some(COMMAND),
        ));
    }
    if draft.status.trim().is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "--status must not be empty.",
            Some(COMMAND),
        ));
    }
    if parse_float_prefix(&draft.amount).is_none() {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{}` is not a numeric amount.", draft.amount),
            Some(COMMAND),
        ));
    }
    parse_as_of(&draft.date, COMMAND)?;
    Ok(())
}
