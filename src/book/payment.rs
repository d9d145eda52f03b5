use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One contract payment milestone, expressed as a share of the contract
/// total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMilestone {
    pub label: String,
    #[serde(default)]
    pub percent_of_total: f64,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
}

impl PaymentMilestone {
    pub fn new(label: impl Into<String>, percent_of_total: f64) -> Self {
        Self {
            label: label.into(),
            percent_of_total,
            paid: false,
            paid_date: None,
        }
    }

    pub fn mark_paid(&mut self, date: NaiveDate) {
        self.paid = true;
        self.paid_date = Some(date);
    }
}
