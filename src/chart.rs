// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::display::Theme;
use crate::summary::{CategoryBreakdown, saturating_sum};

const LIGHT_PALETTE: [&str; 9] = [
    "#4361ee", "#f44336", "#4caf50", "#ffc107", "#3a0ca3", "#00bcd4", "#9c27b0", "#ff5722",
    "#ff9800",
];

const DARK_PALETTE: [&str; 9] = [
    "#6d83f2", "#ef5350", "#66bb6a", "#ffca28", "#7b5ee8", "#26c6da", "#ba68c8", "#ff8a65",
    "#ffb74d",
];

/// Input for a proportional (pie) chart. The three vectors are parallel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
    pub colors: Vec<String>,
    pub border_color: String,
}

impl ChartData {
    pub fn from_breakdown(breakdown: &CategoryBreakdown, theme: Theme) -> Self {
        let (labels, values): (Vec<String>, Vec<Decimal>) = breakdown
            .entries()
            .iter()
            .map(|(k, v)| (k.label().to_string(), *v))
            .unzip();
        Self {
            labels,
            values,
            colors: palette(breakdown.len(), theme),
            border_color: match theme {
                Theme::Light => "#ffffff",
                Theme::Dark => "#1e1e1e",
            }
            .to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Share of each slice in percent, in label order.
    pub fn shares(&self) -> Vec<Decimal> {
        let total = saturating_sum(self.values.iter().copied());
        if total.is_zero() {
            return vec![Decimal::ZERO; self.values.len()];
        }
        self.values
            .iter()
            .map(|v| {
                (*v / total)
                    .checked_mul(Decimal::ONE_HUNDRED)
                    .unwrap_or(Decimal::ONE_HUNDRED)
            })
            .collect()
    }
}

/// `count` colours for `theme`, cycling through the palette.
pub fn palette(count: usize, theme: Theme) -> Vec<String> {
    let base = match theme {
        Theme::Light => &LIGHT_PALETTE,
        Theme::Dark => &DARK_PALETTE,
    };
    (0..count).map(|i| base[i % base.len()].to_string()).collect()
}
