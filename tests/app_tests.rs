// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::app::{AppState, Command, EditState, InstallmentForm, Outcome, TransactionForm};
use pocketledger::display::Theme;
use pocketledger::error::{LedgerError, ValidationError};
use pocketledger::models::InstallmentPolicy;
use pocketledger::store::RecordStore;
use rust_decimal::Decimal;

fn app() -> AppState {
    AppState::new(RecordStore::in_memory())
        .with_as_of(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
}

fn form(amount: &str, kind: &str, category: &str, date: &str) -> TransactionForm {
    TransactionForm {
        amount: amount.into(),
        category: category.into(),
        date: date.into(),
        description: "test".into(),
        r#type: kind.into(),
        recurring: false,
    }
}

fn emi_form(name: &str, amount: &str, start: &str, end: &str) -> InstallmentForm {
    InstallmentForm {
        name: name.into(),
        amount: amount.into(),
        start_date: start.into(),
        end_date: end.into(),
    }
}

fn added(outcome: Outcome) -> String {
    match outcome {
        Outcome::Added(id) => id,
        other => panic!("expected Added, got {:?}", other),
    }
}

#[test]
fn reference_scenario_through_commands() {
    let mut app = app();
    app.apply(Command::AddTransaction(form("100", "income", "Salary", "2024-01-01")))
        .unwrap();
    app.apply(Command::AddTransaction(form("40", "expense", "Food", "2024-01-02")))
        .unwrap();
    app.apply(Command::AddInstallment(emi_form("Car", "20", "2024-01-01", "")))
        .unwrap();
    let s = app.summary();
    assert_eq!(s.total_income, Decimal::from(100));
    assert_eq!(s.total_expense, Decimal::from(60));
    assert_eq!(s.balance, Decimal::from(40));
}

#[test]
fn invalid_amounts_are_rejected_without_mutation() {
    let mut app = app();
    for bad in ["", "abc", "0", "-5", "12,50"] {
        let err = app
            .apply(Command::AddTransaction(form(bad, "expense", "Food", "2024-01-02")))
            .unwrap_err();
        assert!(
            matches!(err, LedgerError::Validation(ValidationError::InvalidAmount(_))),
            "{bad:?} gave {err:?}"
        );
    }
    assert!(app.store().transactions().is_empty());
}

#[test]
fn missing_fields_are_reported() {
    let mut app = app();
    let err = app
        .apply(Command::AddTransaction(form("5", "expense", "  ", "2024-01-02")))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::MissingField("category"))
    ));

    let err = app
        .apply(Command::AddTransaction(form("5", "expense", "Food", "")))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::MissingField("date"))
    ));

    let err = app
        .apply(Command::AddTransaction(form("5", "transfer", "Food", "2024-01-02")))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::UnknownType(_))
    ));

    let err = app
        .apply(Command::AddInstallment(emi_form("", "5", "2024-01-01", "")))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::MissingField("name"))
    ));

    let err = app
        .apply(Command::AddInstallment(emi_form("Car", "5", "", "")))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::MissingField("start date"))
    ));

    let err = app
        .apply(Command::AddInstallment(emi_form("Car", "5", "2024-01-01", "soon")))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::InvalidDate { field: "end date", .. })
    ));
    assert!(app.store().transactions().is_empty());
    assert!(app.store().installments().is_empty());
}

#[test]
fn transaction_edit_flow_updates_and_returns_to_idle() {
    let mut app = app();
    let id = added(
        app.apply(Command::AddTransaction(form("100", "income", "Salary", "2024-01-01")))
            .unwrap(),
    );
    let created = app.store().transaction(&id).unwrap().created_at;
    assert_eq!(app.transaction_submit_label(), "Add Transaction");
    assert!(!app.can_cancel_transaction_edit());

    let mut prefilled = match app.apply(Command::BeginTransactionEdit(id.clone())).unwrap() {
        Outcome::EditingTransaction(f) => f,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(prefilled, form("100", "income", "Salary", "2024-01-01"));
    assert_eq!(app.transaction_edit(), &EditState::Editing(id.clone()));
    assert_eq!(app.transaction_submit_label(), "Update Transaction");
    assert!(app.can_cancel_transaction_edit());

    prefilled.amount = "120.50".into();
    prefilled.recurring = true;
    let outcome = app.apply(Command::SubmitTransaction(prefilled)).unwrap();
    assert_eq!(outcome, Outcome::Updated(id.clone()));
    assert!(outcome.affects_chart());
    assert_eq!(app.transaction_edit(), &EditState::Idle);

    let t = app.store().transaction(&id).unwrap();
    assert_eq!(t.amount, Decimal::from_str_exact("120.50").unwrap());
    assert!(t.recurring);
    assert_eq!(t.created_at, created);
    assert_eq!(app.store().transactions().len(), 1);
}

#[test]
fn cancel_leaves_records_untouched() {
    let mut app = app();
    let id = added(
        app.apply(Command::AddTransaction(form("10", "expense", "Food", "2024-01-01")))
            .unwrap(),
    );
    let before = app.store().transactions().to_vec();
    app.apply(Command::BeginTransactionEdit(id)).unwrap();
    assert_eq!(
        app.apply(Command::CancelTransactionEdit).unwrap(),
        Outcome::Cancelled
    );
    assert_eq!(app.transaction_edit(), &EditState::Idle);
    assert_eq!(app.store().transactions(), &before[..]);

    // A submit after cancel adds instead of updating.
    app.apply(Command::SubmitTransaction(form("3", "expense", "Food", "2024-01-03")))
        .unwrap();
    assert_eq!(app.store().transactions().len(), 2);
}

#[test]
fn invalid_submit_keeps_editing_and_data() {
    let mut app = app();
    let id = added(
        app.apply(Command::AddTransaction(form("10", "expense", "Food", "2024-01-01")))
            .unwrap(),
    );
    app.apply(Command::BeginTransactionEdit(id.clone())).unwrap();
    assert!(
        app.apply(Command::SubmitTransaction(form("0", "expense", "Food", "2024-01-01")))
            .is_err()
    );
    assert_eq!(app.transaction_edit(), &EditState::Editing(id.clone()));
    assert_eq!(app.store().transaction(&id).unwrap().amount, Decimal::from(10));
}

#[test]
fn begin_edit_of_unknown_record_fails() {
    let mut app = app();
    let err = app
        .apply(Command::BeginTransactionEdit("nope".into()))
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { kind: "transaction", .. }));
    assert_eq!(app.transaction_edit(), &EditState::Idle);

    let err = app
        .apply(Command::BeginInstallmentEdit("nope".into()))
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { kind: "EMI", .. }));
}

#[test]
fn only_one_edit_per_kind_but_kinds_are_independent() {
    let mut app = app();
    let a = added(
        app.apply(Command::AddTransaction(form("1", "expense", "A", "2024-01-01")))
            .unwrap(),
    );
    let b = added(
        app.apply(Command::AddTransaction(form("2", "expense", "B", "2024-01-02")))
            .unwrap(),
    );
    let car = added(
        app.apply(Command::AddInstallment(emi_form("Car", "20", "2024-01-01", "")))
            .unwrap(),
    );
    app.apply(Command::BeginTransactionEdit(a)).unwrap();
    app.apply(Command::BeginTransactionEdit(b.clone())).unwrap();
    app.apply(Command::BeginInstallmentEdit(car.clone())).unwrap();
    assert_eq!(app.transaction_edit(), &EditState::Editing(b));
    assert_eq!(app.installment_edit(), &EditState::Editing(car.clone()));
    assert_eq!(app.installment_submit_label(), "Update EMI");

    app.apply(Command::CancelTransactionEdit).unwrap();
    assert_eq!(app.installment_edit(), &EditState::Editing(car));
}

#[test]
fn installment_edit_flow() {
    let mut app = app();
    let id = added(
        app.apply(Command::AddInstallment(emi_form("Car", "300", "2024-01-01", "2025-12-31")))
            .unwrap(),
    );
    let mut f = match app.apply(Command::BeginInstallmentEdit(id.clone())).unwrap() {
        Outcome::EditingInstallment(f) => f,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(f, emi_form("Car", "300", "2024-01-01", "2025-12-31"));
    f.end_date.clear();
    f.name = "Car loan".into();
    assert_eq!(
        app.apply(Command::SubmitInstallment(f)).unwrap(),
        Outcome::Updated(id.clone())
    );
    assert_eq!(app.installment_edit(), &EditState::Idle);
    assert_eq!(app.installment_submit_label(), "Add EMI");
    let emi = app.store().installment(&id).unwrap();
    assert_eq!(emi.name, "Car loan");
    assert_eq!(emi.end_date, None);
}

#[test]
fn deleting_the_record_under_edit_ends_the_edit() {
    let mut app = app();
    let id = added(
        app.apply(Command::AddTransaction(form("1", "expense", "A", "2024-01-01")))
            .unwrap(),
    );
    app.apply(Command::BeginTransactionEdit(id.clone())).unwrap();
    assert_eq!(
        app.apply(Command::DeleteTransaction(id.clone())).unwrap(),
        Outcome::Deleted(id.clone())
    );
    assert_eq!(app.transaction_edit(), &EditState::Idle);
    assert_eq!(
        app.apply(Command::DeleteTransaction(id.clone())).unwrap(),
        Outcome::NotFound(id)
    );
}

#[test]
fn direct_update_of_unknown_id_is_not_found() {
    let mut app = app();
    assert_eq!(
        app.apply(Command::UpdateTransaction(
            "ghost".into(),
            form("1", "expense", "A", "2024-01-01")
        ))
        .unwrap(),
        Outcome::NotFound("ghost".into())
    );
    assert_eq!(
        app.apply(Command::UpdateInstallment(
            "ghost".into(),
            emi_form("Car", "1", "2024-01-01", "")
        ))
        .unwrap(),
        Outcome::NotFound("ghost".into())
    );
}

#[test]
fn preferences_and_budget() {
    let mut app = app();
    assert!(app.apply(Command::SetBudget("abc".into())).is_err());
    assert!(app.apply(Command::SetBudget("0".into())).is_err());
    assert_eq!(app.store().budget(), Decimal::ZERO);
    assert!(app.budget_status().is_none());

    let outcome = app.apply(Command::SetBudget("1000".into())).unwrap();
    assert!(!outcome.affects_chart());
    app.apply(Command::AddTransaction(form("950", "expense", "Rent", "2024-01-01")))
        .unwrap();
    let st = app.budget_status().unwrap();
    assert_eq!(st.remaining, Decimal::from(50));

    let outcome = app.apply(Command::ToggleTheme).unwrap();
    assert_eq!(outcome, Outcome::ThemeChanged(Theme::Dark));
    assert!(outcome.affects_chart());
    assert_eq!(app.chart().colors, ["#6d83f2"]);
}

#[test]
fn emi_policy_changes_totals() {
    let mut app = app();
    app.apply(Command::AddInstallment(emi_form("Old", "20", "2023-01-01", "2024-01-31")))
        .unwrap();
    app.apply(Command::AddInstallment(emi_form("Current", "5", "2024-01-01", "")))
        .unwrap();
    assert_eq!(app.summary().total_expense, Decimal::from(25));
    assert_eq!(app.breakdown().installments(), Some(Decimal::from(25)));

    app.apply(Command::SetInstallmentPolicy(InstallmentPolicy::UntilEndDate))
        .unwrap();
    assert_eq!(app.summary().total_expense, Decimal::from(5));
    assert_eq!(app.installment_total(), Decimal::from(5));
    assert_eq!(app.breakdown().installments(), Some(Decimal::from(5)));
}

#[test]
fn oversized_amounts_never_reach_the_totals() {
    let mut app = app();
    let huge = "50000000000000000000000000000";
    for _ in 0..2 {
        let err = app
            .apply(Command::AddTransaction(form(huge, "expense", "Food", "2024-01-02")))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::InvalidAmount(_))
        ));
    }
    assert!(app.apply(Command::AddInstallment(emi_form("Car", huge, "2024-01-01", ""))).is_err());
    assert!(app.apply(Command::SetBudget("1000000000000001".into())).is_err());

    app.apply(Command::AddTransaction(form("1000000000000000", "expense", "Food", "2024-01-02")))
        .unwrap();
    app.apply(Command::AddTransaction(form("1000000000000000", "expense", "Food", "2024-01-03")))
        .unwrap();
    assert_eq!(app.summary().total_expense, Decimal::from(2_000_000_000_000_000i64));
    assert_eq!(app.chart().values.len(), 1);
}

#[test]
fn tiny_budget_does_not_break_status() {
    let mut app = app();
    app.apply(Command::SetBudget("0.0000000000000000000000000001".into()))
        .unwrap();
    app.apply(Command::AddTransaction(form("1000", "expense", "Rent", "2024-01-01")))
        .unwrap();
    let st = app.budget_status().unwrap();
    assert_eq!(st.percent_used, Decimal::ONE_HUNDRED);
}
