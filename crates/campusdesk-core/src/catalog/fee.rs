use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum FeeStatus {
    Paid,
    Unpaid,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTransaction {
    pub transaction_id: String,
    pub date: String,
    pub amount: u64,
    pub method: String,
}

/// One billable item on the student's fee statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    pub id: String,
    pub particulars: String,
    pub total_amount: u64,
    pub paid_amount: u64,
    pub due_date: String,
    pub status: FeeStatus,
    pub transactions: Vec<FeeTransaction>,
}

impl FeeRecord {
    pub fn outstanding(&self) -> u64 {
        self.total_amount.saturating_sub(self.paid_amount)
    }
}

/// Totals shown at the top of the fees view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    pub total_payable: u64,
    pub total_paid: u64,
    pub total_outstanding: u64,
}

impl FeeSummary {
    pub fn of(records: &[FeeRecord]) -> Self {
        let total_payable: u64 = records.iter().map(|r| r.total_amount).sum();
        let total_paid: u64 = records.iter().map(|r| r.paid_amount).sum();
        Self {
            total_payable,
            total_paid,
            total_outstanding: total_payable.saturating_sub(total_paid),
        }
    }
}
