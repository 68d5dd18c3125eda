// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over a snapshot of transactions and installments.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Installment, InstallmentPolicy, Transaction, TransactionType};

/// Label of the synthetic breakdown entry that holds all installments.
pub const INSTALLMENTS_LABEL: &str = "EMI/Loan";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionType),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub category: CategoryFilter,
    pub r#type: TypeFilter,
    /// Inclusive lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        let category_ok = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => &tx.category == c,
        };
        let type_ok = match self.r#type {
            TypeFilter::All => true,
            TypeFilter::Only(t) => tx.r#type == t,
        };
        let from_ok = self.from.is_none_or(|from| tx.date >= from);
        let to_ok = self.to.is_none_or(|to| tx.date <= to);
        category_ok && type_ok && from_ok && to_ok
    }
}

pub fn filter<'a>(transactions: &'a [Transaction], f: &TransactionFilter) -> Vec<&'a Transaction> {
    transactions.iter().filter(|t| f.matches(t)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

pub fn installment_total(
    installments: &[Installment],
    policy: InstallmentPolicy,
    as_of: NaiveDate,
) -> Decimal {
    saturating_sum(
        installments
            .iter()
            .filter(|e| policy.counts(e, as_of))
            .map(|e| e.amount),
    )
}

/// Sum that clamps at `Decimal::MAX` instead of panicking. Amounts loaded
/// from older snapshots are not bounded by input validation.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, saturating_add)
}

fn saturating_add(acc: Decimal, v: Decimal) -> Decimal {
    acc.checked_add(v).unwrap_or(Decimal::MAX)
}

/// Income, expense (including counted installments) and balance.
///
/// Under [`InstallmentPolicy::Always`] every installment counts, whether or not
/// its end date has passed.
pub fn summary(
    transactions: &[Transaction],
    installments: &[Installment],
    policy: InstallmentPolicy,
    as_of: NaiveDate,
) -> Summary {
    let mut s = Summary::default();
    for t in transactions {
        match t.r#type {
            TransactionType::Income => s.total_income = saturating_add(s.total_income, t.amount),
            TransactionType::Expense => {
                s.total_expense = saturating_add(s.total_expense, t.amount)
            }
        }
    }
    s.total_expense = saturating_add(
        s.total_expense,
        installment_total(installments, policy, as_of),
    );
    s.balance = s.total_income - s.total_expense;
    s
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Normal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub budget: Decimal,
    pub remaining: Decimal,
    /// Capped at 100.
    pub percent_used: Decimal,
    pub tier: BudgetTier,
}

/// `None` while no budget is set.
pub fn budget_status(monthly_budget: Decimal, total_expense: Decimal) -> Option<BudgetStatus> {
    if monthly_budget <= Decimal::ZERO {
        return None;
    }
    let hundred = Decimal::ONE_HUNDRED;
    // Overflow only happens far past the budget.
    let percent_used = total_expense
        .checked_div(monthly_budget)
        .and_then(|ratio| ratio.checked_mul(hundred))
        .map_or(hundred, |p| p.min(hundred));
    let tier = if percent_used >= Decimal::from(90) {
        BudgetTier::Critical
    } else if percent_used >= Decimal::from(70) {
        BudgetTier::Warning
    } else {
        BudgetTier::Normal
    };
    Some(BudgetStatus {
        budget: monthly_budget,
        remaining: monthly_budget - total_expense,
        percent_used,
        tier,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BreakdownKey {
    Category(String),
    Installments,
}

impl BreakdownKey {
    pub fn label(&self) -> &str {
        match self {
            Self::Category(c) => c,
            Self::Installments => INSTALLMENTS_LABEL,
        }
    }
}

/// Expense totals per category, in first-seen order, installments last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    entries: Vec<(BreakdownKey, Decimal)>,
}

impl CategoryBreakdown {
    pub fn entries(&self) -> &[(BreakdownKey, Decimal)] {
        &self.entries
    }

    pub fn get(&self, key: &BreakdownKey) -> Option<Decimal> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn category(&self, name: &str) -> Option<Decimal> {
        self.get(&BreakdownKey::Category(name.to_string()))
    }

    pub fn installments(&self) -> Option<Decimal> {
        self.get(&BreakdownKey::Installments)
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(self.entries.iter().map(|(_, v)| *v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub fn category_breakdown(
    transactions: &[Transaction],
    installments: &[Installment],
    policy: InstallmentPolicy,
    as_of: NaiveDate,
) -> CategoryBreakdown {
    let mut entries: Vec<(BreakdownKey, Decimal)> = Vec::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        match entries
            .iter_mut()
            .find(|(k, _)| matches!(k, BreakdownKey::Category(c) if c == &t.category))
        {
            Some((_, total)) => *total = saturating_add(*total, t.amount),
            None => entries.push((BreakdownKey::Category(t.category.clone()), t.amount)),
        }
    }
    let emi_total = installment_total(installments, policy, as_of);
    if emi_total > Decimal::ZERO {
        entries.push((BreakdownKey::Installments, emi_total));
    }
    CategoryBreakdown { entries }
}
