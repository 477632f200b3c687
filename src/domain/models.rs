use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote store when an expense is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ExpenseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Expense payload without an identifier, as sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseData {
    pub amount: f64,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub description: String,
}

impl ExpenseData {
    pub fn into_record(self, id: ExpenseId) -> ExpenseRecord {
        ExpenseRecord {
            id,
            amount: self.amount,
            date: self.date,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub amount: f64,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub description: String,
}

impl ExpenseRecord {
    pub fn data(&self) -> ExpenseData {
        ExpenseData {
            amount: self.amount,
            date: self.date,
            description: self.description.clone(),
        }
    }

    pub fn apply(&mut self, data: ExpenseData) {
        self.amount = data.amount;
        self.date = data.date;
        self.description = data.description;
    }
}

/// Calendar dates travel as `YYYY-MM-DD`. Older clients stored full
/// timestamps, so decoding also accepts RFC 3339 and keeps the UTC date.
pub mod wire_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid expense date: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
    }
}
