use serde_json::{Map, Value};
use ulid::Ulid;

use crate::records::number::parse_float_prefix;
use crate::records::{InterestType, RecordId, TransactionRecord, TransactionStatus, UserRecord};
use crate::{ClientError, ClientResult};

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";
const DEFAULT_ROLE: &str = "Standard";
const DEFAULT_USER_STATUS: &str = "Active";
const CSV_HEADERS: [&str; 5] = ["ID", "User", "Date", "Amount", "Status"];

#[derive(Debug, Clone, Default)]
pub struct PaymentDraft {
    pub user: String,
    pub amount: String,
    pub status: String,
    pub date: String,
    pub interest_type: String,
    pub interest_percentage: String,
    pub interest_amount: String,
    pub interest_frequency: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Profile fields edited from the settings screen; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.fields().all(|(_, value)| value.is_none())
    }

    /// The first field given as blank text, by flag name.
    pub fn blank_field(&self) -> Option<&'static str> {
        self.fields()
            .find(|(_, value)| value.is_some_and(|text| text.trim().is_empty()))
            .map(|(name, _)| name)
    }

    fn fields(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> {
        [
            ("name", self.name.as_deref()),
            ("email", self.email.as_deref()),
            ("phone", self.phone.as_deref()),
            ("role", self.role.as_deref()),
            ("avatar", self.avatar.as_deref()),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub transaction: TransactionRecord,
    pub new_user: Option<UserRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTab {
    All,
    Completed,
    Pending,
    Failed,
}

impl StatusTab {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "All" => Some(Self::All),
            "Completed" => Some(Self::Completed),
            "Pending" => Some(Self::Pending),
            "Failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }

    fn admits(self, status: &TransactionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Completed => *status == TransactionStatus::Completed,
            Self::Pending => *status == TransactionStatus::Pending,
            Self::Failed => *status == TransactionStatus::Failed,
        }
    }
}

/// Normalizes a payment entered on the dashboard into a stored record, and
/// derives a user for a payer the users snapshot does not know yet.
pub fn new_payment(draft: &PaymentDraft, existing_users: &[UserRecord]) -> PaymentOutcome {
    let avatar = avatar_url(&draft.user);
    let amount = parse_float_prefix(&draft.amount).unwrap_or(0.0);

    let transaction = TransactionRecord {
        id: RecordId::Text(format!("txn_{}", Ulid::new())),
        user: draft.user.clone(),
        amount: format!("₹{amount:.2}"),
        status: TransactionStatus::from(draft.status.clone()),
        date: draft.date.clone(),
        interest_type: InterestType::from(draft.interest_type.clone()),
        interest_percentage: parse_float_prefix(&draft.interest_percentage).unwrap_or(0.0),
        interest_amount: parse_float_prefix(&draft.interest_amount).unwrap_or(0.0),
        interest_frequency: draft.interest_frequency.clone(),
        phone: draft.phone.clone(),
        city: draft.city.clone(),
        address: draft.address.clone(),
        img: Some(avatar.clone()),
        extra: Map::new(),
    };

    let known = existing_users.iter().any(|user| user.name == draft.user);
    let new_user = if known {
        None
    } else {
        Some(UserRecord {
            id: RecordId::Text(format!("usr_{}", Ulid::new())),
            name: draft.user.clone(),
            email: placeholder_email(&draft.user),
            role: DEFAULT_ROLE.to_string(),
            status: DEFAULT_USER_STATUS.to_string(),
            avatar,
            extra: Map::new(),
        })
    };

    PaymentOutcome {
        transaction,
        new_user,
    }
}

/// Newest payment goes first; a derived user joins the end of the list.
pub fn apply_payment(
    transactions: &mut Vec<TransactionRecord>,
    users: &mut Vec<UserRecord>,
    outcome: PaymentOutcome,
) {
    transactions.insert(0, outcome.transaction);
    if let Some(user) = outcome.new_user {
        users.push(user);
    }
}

pub fn new_user(draft: &UserDraft) -> UserRecord {
    UserRecord {
        id: RecordId::Text(format!("usr_{}", Ulid::new())),
        name: draft.name.clone(),
        email: draft.email.clone(),
        role: draft
            .role
            .clone()
            .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        status: draft
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_STATUS.to_string()),
        avatar: avatar_url(&draft.name),
        extra: Map::new(),
    }
}

/// Returns the remaining transactions, or `None` when no record has `id`.
pub fn remove_transaction(
    transactions: &[TransactionRecord],
    id: &str,
) -> Option<Vec<TransactionRecord>> {
    let remaining = transactions
        .iter()
        .filter(|transaction| !transaction.id.matches(id))
        .cloned()
        .collect::<Vec<TransactionRecord>>();
    if remaining.len() == transactions.len() {
        return None;
    }
    Some(remaining)
}

#[derive(Debug, Clone)]
pub struct UserRemoval {
    pub removed: UserRecord,
    pub users: Vec<UserRecord>,
    pub transactions: Vec<TransactionRecord>,
    pub transactions_removed: usize,
}

/// Drops a user together with every transaction recorded under their name.
pub fn remove_user(
    users: &[UserRecord],
    transactions: &[TransactionRecord],
    id: &str,
) -> Option<UserRemoval> {
    let removed = users.iter().find(|user| user.id.matches(id))?.clone();
    let remaining_users = users
        .iter()
        .filter(|user| !user.id.matches(id))
        .cloned()
        .collect::<Vec<UserRecord>>();
    let remaining_transactions = transactions
        .iter()
        .filter(|transaction| transaction.user != removed.name)
        .cloned()
        .collect::<Vec<TransactionRecord>>();
    let transactions_removed = transactions.len() - remaining_transactions.len();

    Some(UserRemoval {
        removed,
        users: remaining_users,
        transactions: remaining_transactions,
        transactions_removed,
    })
}

/// Case-insensitive match on payer or status, plain substring match on the
/// raw amount text.
pub fn search_transactions<'a>(
    transactions: &'a [TransactionRecord],
    term: &str,
) -> Vec<&'a TransactionRecord> {
    let needle = term.to_lowercase();
    transactions
        .iter()
        .filter(|transaction| {
            transaction.user.to_lowercase().contains(&needle)
                || transaction.status.as_str().to_lowercase().contains(&needle)
                || transaction.amount.contains(term)
        })
        .collect()
}

pub fn filter_by_status<'a>(
    transactions: impl IntoIterator<Item = &'a TransactionRecord>,
    tab: StatusTab,
) -> Vec<&'a TransactionRecord> {
    transactions
        .into_iter()
        .filter(|transaction| tab.admits(&transaction.status))
        .collect()
}

pub fn search_users<'a>(users: &'a [UserRecord], term: &str) -> Vec<&'a UserRecord> {
    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|user| {
            user.name.to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Applies a profile edit in place. Users carry no typed phone field, so the
/// phone lands in the pass-through fields next to any the snapshot had.
pub fn apply_profile(user: &mut UserRecord, patch: &ProfilePatch) {
    if let Some(name) = &patch.name {
        user.name = name.trim().to_string();
    }
    if let Some(email) = &patch.email {
        user.email = email.trim().to_string();
    }
    if let Some(phone) = &patch.phone {
        user.extra
            .insert("phone".to_string(), Value::String(phone.trim().to_string()));
    }
    if let Some(role) = &patch.role {
        user.role = role.trim().to_string();
    }
    if let Some(avatar) = &patch.avatar {
        user.avatar = avatar.trim().to_string();
    }
}

pub fn export_csv(transactions: &[&TransactionRecord]) -> ClientResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADERS)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    for transaction in transactions {
        let id = transaction.id.to_string();
        let amount = transaction.amount.replace('$', "₹");
        writer
            .write_record([
                id.as_str(),
                transaction.user.as_str(),
                transaction.date.as_str(),
                amount.as_str(),
                transaction.status.as_str(),
            ])
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    String::from_utf8(bytes).map_err(|error| ClientError::internal_serialization(&error.to_string()))
}

fn avatar_url(seed: &str) -> String {
    format!("{AVATAR_BASE_URL}{seed}")
}

fn placeholder_email(name: &str) -> String {
    let local = name
        .to_lowercase()
        .chars()
        .map(|character| if character.is_whitespace() { '.' } else { character })
        .collect::<String>();
    format!("{local}@example.com")
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{
        PaymentDraft, ProfilePatch, StatusTab, UserDraft, apply_payment, apply_profile,
        export_csv, filter_by_status, new_payment, new_user, remove_transaction, remove_user,
        search_transactions, search_users,
    };
    use crate::records::fixtures::{transaction, user};
    use crate::records::{InterestType, TransactionStatus};

    fn draft(user_name: &str) -> PaymentDraft {
        PaymentDraft {
            user: user_name.to_string(),
            amount: "1500".to_string(),
            status: "Pending".to_string(),
            date: "2026-10-18".to_string(),
            interest_type: "Percentage".to_string(),
            interest_percentage: "2".to_string(),
            interest_amount: String::new(),
            ..PaymentDraft::default()
        }
    }

    #[test]
    fn new_payment_normalizes_amount_and_rates() {
        let outcome = new_payment(&draft("Asha Rao"), &[]);
        let record = &outcome.transaction;
        assert_eq!(record.amount, "₹1500.00");
        assert_eq!(record.status, TransactionStatus::Pending);
        assert_eq!(record.interest_type, InterestType::Percentage);
        assert_eq!(record.interest_percentage, 2.0);
        assert_eq!(record.interest_amount, 0.0);
        assert!(record.id.to_string().starts_with("txn_"));
        assert_eq!(
            record.img.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=Asha Rao")
        );
    }

    #[test]
    fn unknown_payer_becomes_a_standard_user() {
        let outcome = new_payment(&draft("Asha  Rao"), &[]);
        assert!(outcome.new_user.is_some());
        if let Some(created) = &outcome.new_user {
            assert_eq!(created.email, "asha..rao@example.com");
            assert_eq!(created.role, "Standard");
            assert_eq!(created.status, "Active");
        }

        let known = vec![user("u1", "Asha Rao", "asha@example.com")];
        let outcome = new_payment(&draft("Asha Rao"), &known);
        assert!(outcome.new_user.is_none());
    }

    #[test]
    fn applied_payment_is_prepended_and_user_appended() {
        let mut transactions = vec![transaction("t1", "₹10", "Completed", "2026-10-01")];
        let mut users = vec![user("u1", "Vikram", "vikram@example.com")];
        let outcome = new_payment(&draft("Asha Rao"), &users);

        apply_payment(&mut transactions, &mut users, outcome);
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].amount, "₹1500.00");
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "Asha Rao");
    }

    #[test]
    fn new_user_defaults_role_and_status() {
        let created = new_user(&UserDraft {
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            role: Some("Admin".to_string()),
            status: None,
        });
        assert_eq!(created.role, "Admin");
        assert_eq!(created.status, "Active");
        assert!(created.avatar.ends_with("seed=Meera"));
    }

    #[test]
    fn removing_unknown_transaction_reports_none() {
        let rows = vec![transaction("t1", "₹10", "Completed", "2026-10-01")];
        assert!(remove_transaction(&rows, "t9").is_none());
        assert!(remove_transaction(&rows, "t1").is_some_and(|rest| rest.is_empty()));
    }

    #[test]
    fn removing_user_cascades_to_their_transactions() {
        let users = vec![
            user("u1", "Asha Rao", "asha@example.com"),
            user("u2", "Vikram", "vikram@example.com"),
        ];
        let mut other = transaction("t2", "₹10", "Completed", "2026-10-01");
        other.user = "Vikram".to_string();
        let rows = vec![transaction("t1", "₹10", "Completed", "2026-10-01"), other];

        let removal = remove_user(&users, &rows, "u1");
        assert!(removal.is_some());
        if let Some(result) = removal {
            assert_eq!(result.removed.name, "Asha Rao");
            assert_eq!(result.users.len(), 1);
            assert_eq!(result.transactions.len(), 1);
            assert_eq!(result.transactions_removed, 1);
            assert_eq!(result.transactions[0].user, "Vikram");
        }
        assert!(remove_user(&users, &rows, "u9").is_none());
    }

    #[test]
    fn search_and_tabs_narrow_transactions() {
        let rows = vec![
            transaction("t1", "₹1200", "Completed", "2026-10-01"),
            transaction("t2", "₹300", "Pending", "2026-10-02"),
        ];

        assert_eq!(search_transactions(&rows, "asha").len(), 2);
        assert_eq!(search_transactions(&rows, "PEND").len(), 1);
        assert_eq!(search_transactions(&rows, "120").len(), 1);
        assert_eq!(search_transactions(&rows, "").len(), 2);

        let pending = filter_by_status(&rows, StatusTab::Pending);
        assert_eq!(pending.len(), 1);
        assert_eq!(filter_by_status(&rows, StatusTab::All).len(), 2);
        assert_eq!(StatusTab::parse("Overdue"), None);
    }

    #[test]
    fn user_search_matches_name_or_email() {
        let users = vec![
            user("u1", "Asha Rao", "asha@example.com"),
            user("u2", "Vikram", "vk@corp.test"),
        ];
        assert_eq!(search_users(&users, "CORP").len(), 1);
        assert_eq!(search_users(&users, "rao").len(), 1);
    }

    #[test]
    fn csv_export_quotes_amounts_with_grouping() {
        let rows = vec![
            transaction("t1", "$1,200.00", "Completed", "2026-10-01"),
            transaction("t2", "₹300", "Pending", "2026-10-02"),
        ];
        let refs = rows.iter().collect::<Vec<_>>();

        let exported = export_csv(&refs);
        assert!(exported.is_ok());
        if let Ok(text) = exported {
            let lines = text.lines().collect::<Vec<&str>>();
            assert_eq!(lines[0], "ID,User,Date,Amount,Status");
            assert_eq!(lines[1], "t1,Asha Rao,2026-10-01,\"₹1,200.00\",Completed");
            assert_eq!(lines[2], "t2,Asha Rao,2026-10-02,₹300,Pending");
        }
    }

    #[test]
    fn profile_patch_touches_only_given_fields() {
        let mut asha = user("u1", "Asha Rao", "asha@example.com");
        let role_before = asha.role.clone();
        apply_profile(
            &mut asha,
            &ProfilePatch {
                name: Some(" Asha R. ".to_string()),
                phone: Some("98450 00000".to_string()),
                ..ProfilePatch::default()
            },
        );
        assert_eq!(asha.name, "Asha R.");
        assert_eq!(asha.email, "asha@example.com");
        assert_eq!(asha.role, role_before);
        assert_eq!(asha.extra.get("phone"), Some(&Value::from("98450 00000")));
    }

    #[test]
    fn empty_and_blank_patches_are_detected() {
        assert!(ProfilePatch::default().is_empty());
        let blank = ProfilePatch {
            name: Some("Asha".to_string()),
            email: Some("  ".to_string()),
            ..ProfilePatch::default()
        };
        assert!(!blank.is_empty());
        assert_eq!(blank.blank_field(), Some("email"));
    }
}
