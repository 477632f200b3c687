//! Expense form state and submit-time validation.
//!
//! Fields are validated only on submit. Typing into a field puts it back
//! into the editing phase, where it reports itself as valid until the next
//! submit computes its validity again.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::models::{ExpenseData, ExpenseRecord};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input values - please check your entered data!";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidity {
    pub amount_valid: bool,
    pub date_valid: bool,
    pub description_valid: bool,
}

impl FieldValidity {
    pub fn all_valid(&self) -> bool {
        self.amount_valid && self.date_valid && self.description_valid
    }
}

/// Outcome of validating the three raw form inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid(ExpenseData),
    Invalid(FieldValidity),
}

impl Validation {
    pub fn validity(&self) -> FieldValidity {
        match self {
            Validation::Valid(_) => FieldValidity {
                amount_valid: true,
                date_valid: true,
                description_valid: true,
            },
            Validation::Invalid(validity) => *validity,
        }
    }
}

pub fn validate(amount: &str, date: &str, description: &str) -> Validation {
    let parsed_amount = parse_amount(amount);
    let parsed_date = parse_date(date);
    let description_valid = !description.trim().is_empty();

    match (parsed_amount, parsed_date) {
        (Some(amount), Some(date)) if description_valid => Validation::Valid(ExpenseData {
            amount,
            date,
            // Only the validity check trims; the stored text is the raw input.
            description: description.to_string(),
        }),
        (amount, date) => Validation::Invalid(FieldValidity {
            amount_valid: amount.is_some(),
            date_valid: date.is_some(),
            description_valid,
        }),
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let value = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse::<f64>().ok()?
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Amount,
    Date,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum FieldPhase {
    Editing,
    Validated { valid: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftField {
    pub value: String,
    #[serde(flatten)]
    pub phase: FieldPhase,
}

impl DraftField {
    fn editing(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            phase: FieldPhase::Editing,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self.phase {
            FieldPhase::Editing => true,
            FieldPhase::Validated { valid } => valid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub amount: DraftField,
    pub date: DraftField,
    pub description: DraftField,
}

impl ExpenseDraft {
    /// Opens a form, seeded from `defaults` when editing an existing expense.
    pub fn new(defaults: Option<&ExpenseRecord>) -> Self {
        match defaults {
            Some(record) => Self {
                amount: DraftField::editing(record.amount.to_string()),
                date: DraftField::editing(record.date.format(DATE_FORMAT).to_string()),
                description: DraftField::editing(record.description.clone()),
            },
            None => Self::from_inputs("", "", ""),
        }
    }

    pub fn from_inputs(amount: &str, date: &str, description: &str) -> Self {
        Self {
            amount: DraftField::editing(amount),
            date: DraftField::editing(date),
            description: DraftField::editing(description),
        }
    }

    pub fn field(&self, id: FieldId) -> &DraftField {
        match id {
            FieldId::Amount => &self.amount,
            FieldId::Date => &self.date,
            FieldId::Description => &self.description,
        }
    }

    fn field_mut(&mut self, id: FieldId) -> &mut DraftField {
        match id {
            FieldId::Amount => &mut self.amount,
            FieldId::Date => &mut self.date,
            FieldId::Description => &mut self.description,
        }
    }

    /// Replaces one field's text and returns it to the editing phase.
    pub fn input_changed(&mut self, id: FieldId, value: impl Into<String>) {
        *self.field_mut(id) = DraftField::editing(value);
    }

    /// Validates the current values. On failure every field moves to the
    /// validated phase with its computed validity; values are untouched.
    pub fn submit(&mut self) -> Option<ExpenseData> {
        match validate(
            &self.amount.value,
            &self.date.value,
            &self.description.value,
        ) {
            Validation::Valid(data) => Some(data),
            Validation::Invalid(validity) => {
                self.amount.phase = FieldPhase::Validated {
                    valid: validity.amount_valid,
                };
                self.date.phase = FieldPhase::Validated {
                    valid: validity.date_valid,
                };
                self.description.phase = FieldPhase::Validated {
                    valid: validity.description_valid,
                };
                None
            }
        }
    }

    pub fn has_invalid_fields(&self) -> bool {
        !(self.amount.is_valid() && self.date.is_valid() && self.description.is_valid())
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.has_invalid_fields().then_some(INVALID_INPUT_MESSAGE)
    }
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self::new(None)
    }
}
