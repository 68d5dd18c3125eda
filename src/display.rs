// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Display preferences: currency symbol placement and colour theme.
//!
//! Neither affects stored amounts; there is no conversion between currencies.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    INR,
    CAD,
    AUD,
    CNY,
}

impl Currency {
    pub const ALL: [Currency; 8] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::INR,
        Currency::CAD,
        Currency::AUD,
        Currency::CNY,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::JPY => "JPY",
            Self::INR => "INR",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::CNY => "CNY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::JPY | Self::CNY => "¥",
            Self::INR => "₹",
            Self::CAD => "C$",
            Self::AUD => "A$",
        }
    }

    /// Symbol always leads: `$12.50`, `-$3.00`.
    pub fn fmt_money(&self, amount: Decimal) -> String {
        let sign = if amount.is_sign_negative() && !amount.round_dp(2).is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.2}", amount.abs().round_dp(2));
        format!("{}{}{}", sign, self.symbol(), digits)
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(ValidationError::UnknownCurrency(code))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ValidationError::UnknownTheme(other.to_string())),
        }
    }
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

pub fn fmt_date_range(start: NaiveDate, end: Option<NaiveDate>) -> String {
    match end {
        Some(end) => format!("{} - {}", fmt_date(start), fmt_date(end)),
        None => format!("From {}", fmt_date(start)),
    }
}
