// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use pocketledger::models::{Installment, InstallmentPolicy, Transaction, TransactionType};
use pocketledger::summary::{
    BreakdownKey, BudgetTier, CategoryFilter, TransactionFilter, TypeFilter, budget_status,
    category_breakdown, filter, summary,
};
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(id: &str, amount: &str, kind: TransactionType, category: &str, d: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: Decimal::from_str_exact(amount).unwrap(),
        category: category.to_string(),
        date: date(d),
        description: String::new(),
        r#type: kind,
        recurring: false,
        created_at: Utc::now(),
    }
}

fn e(id: &str, amount: &str, end: Option<&str>) -> Installment {
    Installment {
        id: id.to_string(),
        name: format!("emi {}", id),
        amount: Decimal::from_str_exact(amount).unwrap(),
        start_date: date("2023-06-01"),
        end_date: end.map(date),
        created_at: Utc::now(),
    }
}

fn today() -> NaiveDate {
    date("2024-06-15")
}

fn sample() -> Vec<Transaction> {
    vec![
        t("5", "12.50", TransactionType::Expense, "Food", "2024-03-10"),
        t("4", "900", TransactionType::Income, "Salary", "2024-03-01"),
        t("3", "30", TransactionType::Expense, "Transport", "2024-02-20"),
        t("2", "7.25", TransactionType::Expense, "Food", "2024-02-03"),
        t("1", "850", TransactionType::Income, "Salary", "2024-02-01"),
    ]
}

#[test]
fn reference_scenario_totals() {
    let txs = vec![
        t("b", "40", TransactionType::Expense, "Food", "2024-01-02"),
        t("a", "100", TransactionType::Income, "Salary", "2024-01-01"),
    ];
    let emis = vec![e("x", "20", None)];
    let s = summary(&txs, &emis, InstallmentPolicy::Always, today());
    assert_eq!(s.total_income, Decimal::from(100));
    assert_eq!(s.total_expense, Decimal::from(60));
    assert_eq!(s.balance, Decimal::from(40));
}

#[test]
fn each_amount_lands_in_exactly_one_bucket() {
    let mut txs = sample();
    let before = summary(&txs, &[], InstallmentPolicy::Always, today());

    txs.push(t("6", "19.99", TransactionType::Income, "Gift", "2024-01-01"));
    let after = summary(&txs, &[], InstallmentPolicy::Always, today());
    assert_eq!(
        after.total_income - before.total_income,
        Decimal::from_str_exact("19.99").unwrap()
    );
    assert_eq!(after.total_expense, before.total_expense);

    txs.push(t("7", "3.01", TransactionType::Expense, "Food", "2024-01-01"));
    let last = summary(&txs, &[], InstallmentPolicy::Always, today());
    assert_eq!(last.total_income, after.total_income);
    assert_eq!(
        last.total_expense - after.total_expense,
        Decimal::from_str_exact("3.01").unwrap()
    );
}

#[test]
fn expired_installments_count_under_always_policy() {
    let emis = vec![e("x", "20", Some("2024-01-31")), e("y", "5", None)];
    let always = summary(&[], &emis, InstallmentPolicy::Always, today());
    assert_eq!(always.total_expense, Decimal::from(25));

    let cutoff = summary(&[], &emis, InstallmentPolicy::UntilEndDate, today());
    assert_eq!(cutoff.total_expense, Decimal::from(5));
    assert_eq!(cutoff.balance, Decimal::from(-5));

    // The end date itself still counts.
    let on_end = summary(&[], &emis, InstallmentPolicy::UntilEndDate, date("2024-01-31"));
    assert_eq!(on_end.total_expense, Decimal::from(25));
}

#[test]
fn all_pass_filter_returns_everything_in_order() {
    let txs = sample();
    let out = filter(&txs, &TransactionFilter::default());
    let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["5", "4", "3", "2", "1"]);
}

#[test]
fn date_range_is_inclusive_on_both_ends() {
    let txs = sample();
    let f = TransactionFilter {
        from: Some(date("2024-02-03")),
        to: Some(date("2024-03-01")),
        ..Default::default()
    };
    let out = filter(&txs, &f);
    let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["4", "3", "2"]);
    for tx in filter(&txs, &f) {
        assert!(tx.date >= date("2024-02-03") && tx.date <= date("2024-03-01"));
    }
}

#[test]
fn date_bounds_are_independent() {
    let txs = sample();
    let only_from = TransactionFilter {
        from: Some(date("2024-03-01")),
        ..Default::default()
    };
    assert_eq!(filter(&txs, &only_from).len(), 2);

    let only_to = TransactionFilter {
        to: Some(date("2024-02-01")),
        ..Default::default()
    };
    let out = filter(&txs, &only_to);
    let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1"]);
}

#[test]
fn category_and_type_filters_match_exactly() {
    let txs = sample();
    let food = TransactionFilter {
        category: CategoryFilter::Only("Food".into()),
        ..Default::default()
    };
    let out = filter(&txs, &food);
    let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["5", "2"]);

    let lower = TransactionFilter {
        category: CategoryFilter::Only("food".into()),
        ..Default::default()
    };
    assert!(filter(&txs, &lower).is_empty());

    let income = TransactionFilter {
        r#type: TypeFilter::Only(TransactionType::Income),
        from: Some(date("2024-02-15")),
        ..Default::default()
    };
    let out = filter(&txs, &income);
    let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["4"]);
}

#[test]
fn budget_tiers() {
    let st = budget_status(Decimal::from(1000), Decimal::from(950)).unwrap();
    assert_eq!(st.percent_used, Decimal::from(95));
    assert_eq!(st.tier, BudgetTier::Critical);
    assert_eq!(st.remaining, Decimal::from(50));

    let over = budget_status(Decimal::from(1000), Decimal::from(1200)).unwrap();
    assert_eq!(over.percent_used, Decimal::from(100));
    assert_eq!(over.tier, BudgetTier::Critical);
    assert_eq!(over.remaining, Decimal::from(-200));

    let at_ninety = budget_status(Decimal::from(1000), Decimal::from(900)).unwrap();
    assert_eq!(at_ninety.tier, BudgetTier::Critical);

    let warn = budget_status(Decimal::from(1000), Decimal::from(700)).unwrap();
    assert_eq!(warn.tier, BudgetTier::Warning);

    let fine = budget_status(
        Decimal::from(1000),
        Decimal::from_str_exact("699.99").unwrap(),
    )
    .unwrap();
    assert_eq!(fine.tier, BudgetTier::Normal);
}

#[test]
fn budget_status_needs_a_budget() {
    assert!(budget_status(Decimal::ZERO, Decimal::from(10)).is_none());
}

#[test]
fn breakdown_without_installments_has_no_synthetic_entry() {
    let txs = sample();
    let b = category_breakdown(&txs, &[], InstallmentPolicy::Always, today());
    assert_eq!(b.installments(), None);
    assert_eq!(b.len(), 2);
    assert_eq!(b.category("Food"), Some(Decimal::from_str_exact("19.75").unwrap()));
    assert_eq!(b.category("Transport"), Some(Decimal::from(30)));
    assert_eq!(b.category("Salary"), None);
    let labels: Vec<&str> = b.entries().iter().map(|(k, _)| k.label()).collect();
    assert_eq!(labels, ["Food", "Transport"]);
}

#[test]
fn breakdown_sums_installments_into_one_entry() {
    let txs = sample();
    let emis = vec![e("x", "20", None), e("y", "30.5", Some("2024-01-01"))];
    let b = category_breakdown(&txs, &emis, InstallmentPolicy::Always, today());
    assert_eq!(b.installments(), Some(Decimal::from_str_exact("50.5").unwrap()));
    let (last_key, _) = b.entries().last().unwrap();
    assert_eq!(last_key, &BreakdownKey::Installments);
    assert_eq!(last_key.label(), "EMI/Loan");

    let cut = category_breakdown(&txs, &emis, InstallmentPolicy::UntilEndDate, today());
    assert_eq!(cut.installments(), Some(Decimal::from(20)));
}

#[test]
fn user_category_named_like_installments_stays_separate() {
    let txs = vec![t("1", "10", TransactionType::Expense, "EMI/Loan", "2024-01-01")];
    let emis = vec![e("x", "20", None)];
    let b = category_breakdown(&txs, &emis, InstallmentPolicy::Always, today());
    assert_eq!(b.len(), 2);
    assert_eq!(b.category("EMI/Loan"), Some(Decimal::from(10)));
    assert_eq!(b.installments(), Some(Decimal::from(20)));
    assert_eq!(b.total(), Decimal::from(30));
}

#[test]
fn tiny_budget_reads_as_fully_used() {
    let tiny = Decimal::from_str_exact("0.0000000000000000000000000001").unwrap();
    let st = budget_status(tiny, Decimal::from(1000)).unwrap();
    assert_eq!(st.percent_used, Decimal::from(100));
    assert_eq!(st.tier, BudgetTier::Critical);
}

#[test]
fn totals_saturate_instead_of_overflowing() {
    let huge = "50000000000000000000000000000";
    let txs = vec![
        t("1", huge, TransactionType::Expense, "Food", "2024-01-01"),
        t("2", huge, TransactionType::Expense, "Food", "2024-01-02"),
    ];
    let emis = vec![e("x", huge, None)];
    let s = summary(&txs, &emis, InstallmentPolicy::Always, today());
    assert_eq!(s.total_expense, Decimal::MAX);
    assert_eq!(s.balance, -Decimal::MAX);

    let b = category_breakdown(&txs, &emis, InstallmentPolicy::Always, today());
    assert_eq!(b.category("Food"), Some(Decimal::MAX));
    assert_eq!(b.total(), Decimal::MAX);
    assert!(budget_status(Decimal::from(10), s.total_expense).is_some());
}
