/// Line status values: ACTIVE, INACTIVE, SUSPENDED.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Line {
    pub id: i64,
    pub user_id: i64,
    pub mdn: String,
    pub customer: String,
    pub provider: String,
    pub status: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Option<i64>,
    pub user_id: i64,
    pub line_id: Option<i64>,
    pub mdn: String,
    pub provider: String,
    pub customer: String,
    pub cycle: String,
    pub note: String,
    pub activity_type: String,
    pub category: String,
    pub amount: f64,
    pub transaction_date: Option<String>,
}

/// Intermediate representation of one report row after header mapping,
/// before normalization and classification.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub account: String,
    pub customer: String,
    pub provider: String,
    pub cycle: String,
    pub amount: String,
    pub note: String,
    pub activity_type: String,
}
