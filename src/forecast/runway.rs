//! Emergency-fund runway
//!
//! How many months current savings would cover average spending if income
//! stopped. The value is kept as an exact ratio of cents so callers decide
//! how to round it for display.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CashflowError, CashflowResult};
use crate::models::Money;

/// How a runway ratio should be rounded for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    /// Whole months, rounded down (conservative)
    #[default]
    Floor,
    /// One decimal place, rounded to nearest
    Tenths,
}

/// Exact runway as savings over monthly expense, both in cents
///
/// The denominator is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRatio {
    numerator: i64,
    denominator: i64,
}

impl MonthRatio {
    fn new(savings: Money, monthly_expense: Money) -> Self {
        debug_assert!(monthly_expense.is_positive());
        Self {
            numerator: savings.cents(),
            denominator: monthly_expense.cents(),
        }
    }

    fn zero() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
        }
    }

    /// Savings in cents
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Monthly expense in cents
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Unrounded number of months
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whole months covered, rounded down
    pub fn whole_months(&self) -> i64 {
        self.numerator.div_euclid(self.denominator)
    }

    /// Apply a rounding policy
    pub fn rounded(&self, policy: RoundingPolicy) -> f64 {
        match policy {
            RoundingPolicy::Floor => self.whole_months() as f64,
            RoundingPolicy::Tenths => (self.as_f64() * 10.0).round() / 10.0,
        }
    }
}

/// Runway length in months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RunwayMonths {
    /// No spending, so savings never run out
    Infinite,
    /// A finite number of months
    Finite(MonthRatio),
}

impl RunwayMonths {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// The exact ratio, if finite
    pub fn ratio(&self) -> Option<&MonthRatio> {
        match self {
            Self::Infinite => None,
            Self::Finite(ratio) => Some(ratio),
        }
    }
}

/// Result of a runway calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Runway {
    /// Months of coverage (0 when insolvent)
    pub months: RunwayMonths,

    /// Savings are already negative
    pub insolvent: bool,

    /// Suggested rounding for display
    pub recommended_rounding: RoundingPolicy,
}

impl Runway {
    /// Format the runway with a rounding policy, e.g. "3 months" or "infinite"
    pub fn describe(&self, policy: RoundingPolicy) -> String {
        match &self.months {
            RunwayMonths::Infinite => "infinite".to_string(),
            RunwayMonths::Finite(ratio) => match policy {
                RoundingPolicy::Floor => format!("{} months", ratio.whole_months()),
                RoundingPolicy::Tenths => format!("{:.1} months", ratio.rounded(policy)),
            },
        }
    }
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe(self.recommended_rounding))?;
        if self.insolvent {
            write!(f, " (currently insolvent)")?;
        }
        Ok(())
    }
}

/// Compute how long current savings cover average monthly spending
///
/// Negative savings report zero months with the insolvent flag set, which
/// takes precedence over a zero expense. A zero expense otherwise yields an
/// infinite runway. A negative expense is rejected.
pub fn compute_runway(
    current_savings: Money,
    avg_monthly_expense: Money,
) -> CashflowResult<Runway> {
    if avg_monthly_expense.is_negative() {
        return Err(CashflowError::invalid_parameter(
            "avg_monthly_expense",
            format!("must not be negative, got {}", avg_monthly_expense),
        ));
    }

    let (months, insolvent) = if current_savings.is_negative() {
        (RunwayMonths::Finite(MonthRatio::zero()), true)
    } else if avg_monthly_expense.is_zero() {
        (RunwayMonths::Infinite, false)
    } else {
        (
            RunwayMonths::Finite(MonthRatio::new(current_savings, avg_monthly_expense)),
            false,
        )
    };

    log::debug!(
        "runway: savings={} expense={} -> {:?} insolvent={}",
        current_savings,
        avg_monthly_expense,
        months,
        insolvent
    );

    Ok(Runway {
        months,
        insolvent,
        recommended_rounding: RoundingPolicy::Floor,
    })
}
