//! Canned counterparty lists shown for each stage

use serde::Serialize;

use super::Stage;

/// Which list is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyList {
    /// Customers a payment can be requested from
    Customers,
    /// Bank accounts a payment can be sent to
    Counterparties,
}

impl CounterpartyList {
    /// Title of the empty list
    pub fn empty_title(&self) -> &'static str {
        match self {
            CounterpartyList::Customers => "No customers found",
            CounterpartyList::Counterparties => "No counterparty accounts yet",
        }
    }

    /// Hint under the empty list title
    pub fn empty_text(&self) -> &'static str {
        match self {
            CounterpartyList::Customers => "Customers must be added to start requesting payments",
            CounterpartyList::Counterparties => {
                "Add a counterparty bank account before sending a payment."
            }
        }
    }
}

/// Review status of a counterparty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyStatus {
    /// Verified, payments allowed
    Verified,
    /// Still being reviewed
    Review,
    /// Rejected
    Rejected,
}

impl CounterpartyStatus {
    /// Status badge; a customer under review is awaiting their response
    pub fn label(&self, list: CounterpartyList) -> &'static str {
        match (self, list) {
            (CounterpartyStatus::Verified, _) => "Verified",
            (CounterpartyStatus::Review, CounterpartyList::Customers) => "Awaiting response",
            (CounterpartyStatus::Review, CounterpartyList::Counterparties) => "Under review",
            (CounterpartyStatus::Rejected, _) => "Rejected",
        }
    }
}

/// How a counterparty is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CounterpartyContact {
    /// Customer email
    Email {
        /// Address
        email: &'static str,
    },
    /// Receiving bank account
    BankAccount {
        /// Bank name
        bank: &'static str,
        /// Account number
        account: &'static str,
    },
}

/// One row of a counterparty list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterpartyItem {
    /// Display name
    pub title: &'static str,
    /// Contact details
    pub contact: CounterpartyContact,
    /// Review status
    pub status: CounterpartyStatus,
}

impl CounterpartyItem {
    /// Only verified counterparties can be paid or requested from
    pub fn is_selectable(&self) -> bool {
        self.status == CounterpartyStatus::Verified
    }
}

const NOVAQUILL_EMAIL: CounterpartyContact = CounterpartyContact::Email {
    email: "payments@novaquill.com",
};

const fn customer(title: &'static str, status: CounterpartyStatus) -> CounterpartyItem {
    CounterpartyItem {
        title,
        contact: NOVAQUILL_EMAIL,
        status,
    }
}

const fn account(
    title: &'static str,
    bank: &'static str,
    status: CounterpartyStatus,
) -> CounterpartyItem {
    CounterpartyItem {
        title,
        contact: CounterpartyContact::BankAccount {
            bank,
            account: "012-345678-9",
        },
        status,
    }
}

const INVITED_CUSTOMERS: [CounterpartyItem; 1] =
    [customer("NovaQuill Ltd", CounterpartyStatus::Review)];

const INVITED_ACCOUNTS: [CounterpartyItem; 1] =
    [account("NovaQuill Ltd", "DBS Bank", CounterpartyStatus::Review)];

const VERIFIED_CUSTOMERS: [CounterpartyItem; 4] = [
    customer("NovaQuill Ltd", CounterpartyStatus::Verified),
    customer("Customer X", CounterpartyStatus::Verified),
    customer("Customer Y", CounterpartyStatus::Verified),
    customer("Customer Z", CounterpartyStatus::Rejected),
];

const VERIFIED_ACCOUNTS: [CounterpartyItem; 4] = [
    account("NovaQuill Ltd", "DBS Bank", CounterpartyStatus::Verified),
    account("Counterparty X", "CIMB", CounterpartyStatus::Review),
    account("Counterparty Y", "CIMB", CounterpartyStatus::Review),
    account("Counterparty Z", "CIMB", CounterpartyStatus::Rejected),
];

/// Placeholder customers hidden from the customer list
const HIDDEN_CUSTOMERS: [&str; 3] = ["Customer X", "Customer Y", "Customer Z"];

impl Stage {
    /// Counterparties listed at this stage
    ///
    /// Nothing before an invitation, the invited counterparty under review at
    /// [`Stage::CustomerInvited`], and the verified set from then on.
    pub fn counterparties(&self, list: CounterpartyList) -> Vec<CounterpartyItem> {
        let items: &[CounterpartyItem] = match (self, list) {
            (Stage::NoCustomers, _) => &[],
            (Stage::CustomerInvited, CounterpartyList::Customers) => &INVITED_CUSTOMERS,
            (Stage::CustomerInvited, CounterpartyList::Counterparties) => &INVITED_ACCOUNTS,
            (_, CounterpartyList::Customers) => &VERIFIED_CUSTOMERS,
            (_, CounterpartyList::Counterparties) => &VERIFIED_ACCOUNTS,
        };

        items
            .iter()
            .filter(|item| {
                list == CounterpartyList::Counterparties || !HIDDEN_CUSTOMERS.contains(&item.title)
            })
            .copied()
            .collect()
    }
}

/// Keep verified counterparties only, for the "verified only" filter
pub fn verified_only(items: &[CounterpartyItem]) -> Vec<CounterpartyItem> {
    items
        .iter()
        .filter(|item| item.is_selectable())
        .copied()
        .collect()
}
