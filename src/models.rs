// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(ValidationError::UnknownType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub r#type: TransactionType,
    #[serde(default)]
    pub recurring: bool,
    pub created_at: DateTime<Utc>,
}

/// Everything about a transaction the user controls. An edit replaces all of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFields {
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub description: String,
    pub r#type: TransactionType,
    pub recurring: bool,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    pub(crate) fn apply(&mut self, fields: TransactionFields) {
        self.amount = fields.amount;
        self.category = fields.category;
        self.date = fields.date;
        self.description = fields.description;
        self.r#type = fields.r#type;
        self.recurring = fields.recurring;
    }
}

/// A recurring fixed payment (EMI). Always counted as expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallmentFields {
    pub name: String,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl Installment {
    pub(crate) fn apply(&mut self, fields: InstallmentFields) {
        self.name = fields.name;
        self.amount = fields.amount;
        self.start_date = fields.start_date;
        self.end_date = fields.end_date;
    }
}

/// Whether installments past their end date still count as expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallmentPolicy {
    #[default]
    Always,
    UntilEndDate,
}

impl InstallmentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::UntilEndDate => "until-end-date",
        }
    }

    pub fn counts(&self, emi: &Installment, as_of: NaiveDate) -> bool {
        match self {
            Self::Always => true,
            Self::UntilEndDate => emi.end_date.is_none_or(|end| end >= as_of),
        }
    }
}

impl FromStr for InstallmentPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "until-end-date" => Ok(Self::UntilEndDate),
            other => Err(ValidationError::UnknownPolicy(other.to_string())),
        }
    }
}
