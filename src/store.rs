// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory record collections mirrored to key-value storage.
//!
//! Every mutation writes the complete affected collection (or scalar) under its
//! fixed key. When a write fails the store keeps the change in memory, logs a
//! warning and stops writing; callers check [`RecordStore::is_degraded`].

use chrono::Utc;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use uuid::Uuid;

use crate::display::{Currency, Theme};
use crate::error::{LedgerError, Result, ValidationError};
use crate::models::{
    Installment, InstallmentFields, InstallmentPolicy, Transaction, TransactionFields,
};
use crate::storage::{
    KEY_BUDGET, KEY_CURRENCY, KEY_EMI_POLICY, KEY_EMIS, KEY_THEME, KEY_TRANSACTIONS,
    KeyValueStore, MemoryStore,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub currency: Currency,
    pub theme: Theme,
    pub installment_policy: InstallmentPolicy,
}

pub struct RecordStore {
    storage: Box<dyn KeyValueStore>,
    transactions: Vec<Transaction>,
    installments: Vec<Installment>,
    budget: Decimal,
    prefs: Preferences,
    degraded: bool,
}

/// Largest accepted amount. Keeps totals over any realistic number of
/// records well inside `Decimal`'s range.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

pub(crate) fn ensure_positive(amount: Decimal) -> std::result::Result<(), ValidationError> {
    if amount > Decimal::ZERO && amount <= Decimal::from(MAX_AMOUNT_UNITS) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount(amount.to_string()))
    }
}

impl RecordStore {
    /// Load every collection from `storage`. Absent keys load as empty/default.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Result<Self> {
        let transactions: Vec<Transaction> = load_json(storage.as_ref(), KEY_TRANSACTIONS)?;
        let installments: Vec<Installment> = load_json(storage.as_ref(), KEY_EMIS)?;
        let budget = match storage.get(KEY_BUDGET)? {
            Some(raw) => match raw.trim().parse::<Decimal>() {
                Ok(v) if v > Decimal::ZERO => v,
                Ok(_) => Decimal::ZERO,
                Err(_) => {
                    tracing::warn!(value = %raw, "unreadable monthly budget, treating as unset");
                    Decimal::ZERO
                }
            },
            None => Decimal::ZERO,
        };
        let prefs = Preferences {
            currency: load_pref(storage.as_ref(), KEY_CURRENCY)?,
            theme: load_pref(storage.as_ref(), KEY_THEME)?,
            installment_policy: load_pref(storage.as_ref(), KEY_EMI_POLICY)?,
        };
        tracing::debug!(
            transactions = transactions.len(),
            emis = installments.len(),
            "records loaded"
        );
        let mut store = Self {
            storage,
            transactions,
            installments,
            budget,
            prefs,
            degraded: false,
        };
        // Snapshots written by other tools are not guaranteed to be sorted.
        store.sort_transactions();
        Ok(store)
    }

    pub fn in_memory() -> Self {
        Self {
            storage: Box::new(MemoryStore::new()),
            transactions: Vec::new(),
            installments: Vec::new(),
            budget: Decimal::ZERO,
            prefs: Preferences::default(),
            degraded: false,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn installment(&self, id: &str) -> Option<&Installment> {
        self.installments.iter().find(|e| e.id == id)
    }

    /// Monthly budget; zero means unset.
    pub fn budget(&self) -> Decimal {
        self.budget
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn add_transaction(&mut self, fields: TransactionFields) -> Result<String> {
        ensure_positive(fields.amount)?;
        let id = self.fresh_id(|s, id| s.transaction(id).is_some());
        let tx = Transaction {
            id: id.clone(),
            amount: fields.amount,
            category: fields.category,
            date: fields.date,
            description: fields.description,
            r#type: fields.r#type,
            recurring: fields.recurring,
            created_at: Utc::now(),
        };
        tracing::info!(id = %id, amount = %tx.amount, kind = %tx.r#type, "transaction added");
        self.transactions.push(tx);
        self.sort_transactions();
        self.save_transactions()?;
        Ok(id)
    }

    pub fn update_transaction(&mut self, id: &str, fields: TransactionFields) -> Result<bool> {
        ensure_positive(fields.amount)?;
        let Some(tx) = self.transactions.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(id, "update of unknown transaction ignored");
            return Ok(false);
        };
        tx.apply(fields);
        tracing::info!(id, "transaction updated");
        self.sort_transactions();
        self.save_transactions()?;
        Ok(true)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return Ok(false);
        }
        tracing::info!(id, "transaction deleted");
        self.save_transactions()?;
        Ok(true)
    }

    pub fn add_installment(&mut self, fields: InstallmentFields) -> Result<String> {
        ensure_positive(fields.amount)?;
        let id = self.fresh_id(|s, id| s.installment(id).is_some());
        tracing::info!(id = %id, name = %fields.name, amount = %fields.amount, "EMI added");
        self.installments.push(Installment {
            id: id.clone(),
            name: fields.name,
            amount: fields.amount,
            start_date: fields.start_date,
            end_date: fields.end_date,
            created_at: Utc::now(),
        });
        self.save_installments()?;
        Ok(id)
    }

    pub fn update_installment(&mut self, id: &str, fields: InstallmentFields) -> Result<bool> {
        ensure_positive(fields.amount)?;
        let Some(emi) = self.installments.iter_mut().find(|e| e.id == id) else {
            tracing::debug!(id, "update of unknown EMI ignored");
            return Ok(false);
        };
        emi.apply(fields);
        tracing::info!(id, "EMI updated");
        self.save_installments()?;
        Ok(true)
    }

    pub fn delete_installment(&mut self, id: &str) -> Result<bool> {
        let before = self.installments.len();
        self.installments.retain(|e| e.id != id);
        if self.installments.len() == before {
            return Ok(false);
        }
        tracing::info!(id, "EMI deleted");
        self.save_installments()?;
        Ok(true)
    }

    pub fn set_budget(&mut self, amount: Decimal) -> Result<()> {
        ensure_positive(amount)?;
        self.budget = amount;
        tracing::info!(budget = %amount, "monthly budget set");
        self.persist(KEY_BUDGET, amount.to_string());
        Ok(())
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.prefs.currency = currency;
        self.persist(KEY_CURRENCY, currency.code().to_string());
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.prefs.theme = theme;
        self.persist(KEY_THEME, theme.as_str().to_string());
    }

    pub fn set_installment_policy(&mut self, policy: InstallmentPolicy) {
        self.prefs.installment_policy = policy;
        self.persist(KEY_EMI_POLICY, policy.as_str().to_string());
    }

    fn sort_transactions(&mut self) {
        // Stable: equal dates keep insertion order.
        self.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }

    fn fresh_id(&self, taken: impl Fn(&Self, &str) -> bool) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if !taken(self, &id) {
                return id;
            }
        }
    }

    fn save_transactions(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.transactions)?;
        self.persist(KEY_TRANSACTIONS, json);
        Ok(())
    }

    fn save_installments(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.installments)?;
        self.persist(KEY_EMIS, json);
        Ok(())
    }

    fn persist(&mut self, key: &'static str, value: String) {
        if self.degraded {
            tracing::debug!(key, "storage degraded, keeping change in memory only");
            return;
        }
        match self.storage.set(key, &value) {
            Ok(()) => tracing::debug!(key, bytes = value.len(), "snapshot persisted"),
            Err(err) => {
                tracing::warn!(key, error = %err, "storage write failed, continuing in memory only");
                self.degraded = true;
            }
        }
    }
}

fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &'static str) -> Result<Vec<T>> {
    match storage.get(key)? {
        Some(raw) if !raw.trim().is_empty() && raw.trim() != "null" => {
            serde_json::from_str(&raw).map_err(|source| LedgerError::Corrupt { key, source })
        }
        _ => Ok(Vec::new()),
    }
}

fn load_pref<T>(storage: &dyn KeyValueStore, key: &'static str) -> Result<T>
where
    T: FromStr + Default,
{
    Ok(match storage.get(key)? {
        Some(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unknown stored preference, using default");
            T::default()
        }),
        None => T::default(),
    })
}
