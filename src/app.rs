// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state and command dispatch.
//!
//! [`AppState`] owns the record store and the two edit-in-progress machines
//! (one for transactions, one for EMIs). The presentation layer never mutates
//! records directly; it builds a [`Command`] and hands it to [`AppState::apply`].

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::chart::ChartData;
use crate::display::{Currency, Theme};
use crate::error::{LedgerError, Result, ValidationError};
use crate::models::{
    Installment, InstallmentFields, InstallmentPolicy, Transaction, TransactionFields,
};
use crate::store::{RecordStore, ensure_positive};
use crate::summary::{self, BudgetStatus, CategoryBreakdown, Summary, TransactionFilter};

/// Raw transaction input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
    pub r#type: String,
    pub recurring: bool,
}

impl TransactionForm {
    pub fn from_record(tx: &Transaction) -> Self {
        Self {
            amount: tx.amount.to_string(),
            category: tx.category.clone(),
            date: tx.date.to_string(),
            description: tx.description.clone(),
            r#type: tx.r#type.to_string(),
            recurring: tx.recurring,
        }
    }

    pub fn validate(&self) -> std::result::Result<TransactionFields, ValidationError> {
        let amount = parse_amount(&self.amount)?;
        let category = required(&self.category, "category")?;
        let date = parse_required_date(&self.date, "date")?;
        let kind = required(&self.r#type, "type")?.parse()?;
        Ok(TransactionFields {
            amount,
            category,
            date,
            description: self.description.trim().to_string(),
            r#type: kind,
            recurring: self.recurring,
        })
    }
}

/// Raw EMI input. An empty `end_date` means open-ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallmentForm {
    pub name: String,
    pub amount: String,
    pub start_date: String,
    pub end_date: String,
}

impl InstallmentForm {
    pub fn from_record(emi: &Installment) -> Self {
        Self {
            name: emi.name.clone(),
            amount: emi.amount.to_string(),
            start_date: emi.start_date.to_string(),
            end_date: emi.end_date.map(|d| d.to_string()).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> std::result::Result<InstallmentFields, ValidationError> {
        let name = required(&self.name, "name")?;
        let amount = parse_amount(&self.amount)?;
        let start_date = parse_required_date(&self.start_date, "start date")?;
        let end = self.end_date.trim();
        let end_date = if end.is_empty() {
            None
        } else {
            Some(parse_date_field(end, "end date")?)
        };
        Ok(InstallmentFields {
            name,
            amount,
            start_date,
            end_date,
        })
    }
}

fn required(raw: &str, field: &'static str) -> std::result::Result<String, ValidationError> {
    let v = raw.trim();
    if v.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(v.to_string())
    }
}

/// Non-numeric, non-positive and oversized amounts are all rejected.
pub fn parse_amount(raw: &str) -> std::result::Result<Decimal, ValidationError> {
    let v = raw.trim();
    let d = v
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidAmount(v.to_string()))?;
    ensure_positive(d).map_err(|_| ValidationError::InvalidAmount(v.to_string()))?;
    Ok(d)
}

fn parse_required_date(
    raw: &str,
    field: &'static str,
) -> std::result::Result<NaiveDate, ValidationError> {
    let v = raw.trim();
    if v.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    parse_date_field(v, field)
}

fn parse_date_field(raw: &str, field: &'static str) -> std::result::Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(String),
}

impl EditState {
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTransaction(TransactionForm),
    UpdateTransaction(String, TransactionForm),
    DeleteTransaction(String),
    BeginTransactionEdit(String),
    /// Adds while idle, updates the record under edit otherwise.
    SubmitTransaction(TransactionForm),
    CancelTransactionEdit,
    AddInstallment(InstallmentForm),
    UpdateInstallment(String, InstallmentForm),
    DeleteInstallment(String),
    BeginInstallmentEdit(String),
    SubmitInstallment(InstallmentForm),
    CancelInstallmentEdit,
    SetBudget(String),
    SetCurrency(Currency),
    SetTheme(Theme),
    ToggleTheme,
    SetInstallmentPolicy(InstallmentPolicy),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(String),
    Updated(String),
    Deleted(String),
    NotFound(String),
    EditingTransaction(TransactionForm),
    EditingInstallment(InstallmentForm),
    Cancelled,
    ThemeChanged(Theme),
    Changed,
}

impl Outcome {
    /// Whether the expense chart has to be redrawn.
    pub fn affects_chart(&self) -> bool {
        matches!(
            self,
            Self::Added(_) | Self::Updated(_) | Self::Deleted(_) | Self::ThemeChanged(_)
        )
    }
}

pub struct AppState {
    store: RecordStore,
    tx_edit: EditState,
    emi_edit: EditState,
    as_of: NaiveDate,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            tx_edit: EditState::Idle,
            emi_edit: EditState::Idle,
            as_of: Local::now().date_naive(),
        }
    }

    /// Evaluation date for the EMI end-date policy. Defaults to today.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn transaction_edit(&self) -> &EditState {
        &self.tx_edit
    }

    pub fn installment_edit(&self) -> &EditState {
        &self.emi_edit
    }

    pub fn transaction_submit_label(&self) -> &'static str {
        if self.tx_edit.is_editing() {
            "Update Transaction"
        } else {
            "Add Transaction"
        }
    }

    pub fn installment_submit_label(&self) -> &'static str {
        if self.emi_edit.is_editing() {
            "Update EMI"
        } else {
            "Add EMI"
        }
    }

    /// Cancel is only offered while a transaction edit is in progress.
    pub fn can_cancel_transaction_edit(&self) -> bool {
        self.tx_edit.is_editing()
    }

    pub fn apply(&mut self, cmd: Command) -> Result<Outcome> {
        tracing::debug!(?cmd, "dispatch");
        match cmd {
            Command::AddTransaction(form) => {
                let fields = form.validate()?;
                Ok(Outcome::Added(self.store.add_transaction(fields)?))
            }
            Command::UpdateTransaction(id, form) => {
                let fields = form.validate()?;
                self.update_transaction(id, fields)
            }
            Command::DeleteTransaction(id) => {
                if self.tx_edit.editing_id() == Some(id.as_str()) {
                    self.tx_edit = EditState::Idle;
                }
                if self.store.delete_transaction(&id)? {
                    Ok(Outcome::Deleted(id))
                } else {
                    Ok(Outcome::NotFound(id))
                }
            }
            Command::BeginTransactionEdit(id) => {
                let tx = self.store.transaction(&id).ok_or_else(|| LedgerError::NotFound {
                    kind: "transaction",
                    id: id.clone(),
                })?;
                let form = TransactionForm::from_record(tx);
                self.tx_edit = EditState::Editing(id);
                Ok(Outcome::EditingTransaction(form))
            }
            Command::SubmitTransaction(form) => {
                let fields = form.validate()?;
                match std::mem::take(&mut self.tx_edit) {
                    EditState::Idle => Ok(Outcome::Added(self.store.add_transaction(fields)?)),
                    EditState::Editing(id) => self.update_transaction(id, fields),
                }
            }
            Command::CancelTransactionEdit => {
                self.tx_edit = EditState::Idle;
                Ok(Outcome::Cancelled)
            }
            Command::AddInstallment(form) => {
                let fields = form.validate()?;
                Ok(Outcome::Added(self.store.add_installment(fields)?))
            }
            Command::UpdateInstallment(id, form) => {
                let fields = form.validate()?;
                self.update_installment(id, fields)
            }
            Command::DeleteInstallment(id) => {
                if self.emi_edit.editing_id() == Some(id.as_str()) {
                    self.emi_edit = EditState::Idle;
                }
                if self.store.delete_installment(&id)? {
                    Ok(Outcome::Deleted(id))
                } else {
                    Ok(Outcome::NotFound(id))
                }
            }
            Command::BeginInstallmentEdit(id) => {
                let emi = self.store.installment(&id).ok_or_else(|| LedgerError::NotFound {
                    kind: "EMI",
                    id: id.clone(),
                })?;
                let form = InstallmentForm::from_record(emi);
                self.emi_edit = EditState::Editing(id);
                Ok(Outcome::EditingInstallment(form))
            }
            Command::SubmitInstallment(form) => {
                let fields = form.validate()?;
                match std::mem::take(&mut self.emi_edit) {
                    EditState::Idle => Ok(Outcome::Added(self.store.add_installment(fields)?)),
                    EditState::Editing(id) => self.update_installment(id, fields),
                }
            }
            Command::CancelInstallmentEdit => {
                self.emi_edit = EditState::Idle;
                Ok(Outcome::Cancelled)
            }
            Command::SetBudget(raw) => {
                self.store.set_budget(parse_amount(&raw)?)?;
                Ok(Outcome::Changed)
            }
            Command::SetCurrency(c) => {
                self.store.set_currency(c);
                Ok(Outcome::Changed)
            }
            Command::SetTheme(t) => {
                self.store.set_theme(t);
                Ok(Outcome::ThemeChanged(t))
            }
            Command::ToggleTheme => {
                let t = self.store.preferences().theme.toggled();
                self.store.set_theme(t);
                Ok(Outcome::ThemeChanged(t))
            }
            Command::SetInstallmentPolicy(p) => {
                self.store.set_installment_policy(p);
                Ok(Outcome::Changed)
            }
        }
    }

    fn update_transaction(&mut self, id: String, fields: TransactionFields) -> Result<Outcome> {
        if self.store.update_transaction(&id, fields)? {
            Ok(Outcome::Updated(id))
        } else {
            Ok(Outcome::NotFound(id))
        }
    }

    fn update_installment(&mut self, id: String, fields: InstallmentFields) -> Result<Outcome> {
        if self.store.update_installment(&id, fields)? {
            Ok(Outcome::Updated(id))
        } else {
            Ok(Outcome::NotFound(id))
        }
    }

    pub fn filtered(&self, f: &TransactionFilter) -> Vec<&Transaction> {
        summary::filter(self.store.transactions(), f)
    }

    pub fn summary(&self) -> Summary {
        summary::summary(
            self.store.transactions(),
            self.store.installments(),
            self.store.preferences().installment_policy,
            self.as_of,
        )
    }

    pub fn budget_status(&self) -> Option<BudgetStatus> {
        summary::budget_status(self.store.budget(), self.summary().total_expense)
    }

    pub fn breakdown(&self) -> CategoryBreakdown {
        summary::category_breakdown(
            self.store.transactions(),
            self.store.installments(),
            self.store.preferences().installment_policy,
            self.as_of,
        )
    }

    pub fn chart(&self) -> ChartData {
        ChartData::from_breakdown(&self.breakdown(), self.store.preferences().theme)
    }

    pub fn installment_total(&self) -> Decimal {
        summary::installment_total(
            self.store.installments(),
            self.store.preferences().installment_policy,
            self.as_of,
        )
    }
}
