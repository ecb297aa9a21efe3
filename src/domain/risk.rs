//! Position sizing under a fixed-percentage risk rule.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::AcademyError;

/// Per-trade risk cap, in percent of the account.
pub const MAX_RISK_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub enum CalculatorField {
    AccountSize,
    RiskPercent,
    EntryPrice,
    StopLoss,
}

impl CalculatorField {
    pub const ALL: [CalculatorField; 4] = [
        CalculatorField::AccountSize,
        CalculatorField::RiskPercent,
        CalculatorField::EntryPrice,
        CalculatorField::StopLoss,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CalculatorField::AccountSize => "account_size",
            CalculatorField::RiskPercent => "risk_percent",
            CalculatorField::EntryPrice => "entry_price",
            CalculatorField::StopLoss => "stop_loss",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalculatorField::AccountSize => "Account Size ($)",
            CalculatorField::RiskPercent => "Risk Per Trade (%)",
            CalculatorField::EntryPrice => "Entry Price ($)",
            CalculatorField::StopLoss => "Stop Loss ($)",
        }
    }
}

impl fmt::Display for CalculatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CalculatorField {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "account" | "account_size" => Ok(CalculatorField::AccountSize),
            "risk" | "risk_percent" => Ok(CalculatorField::RiskPercent),
            "entry" | "entry_price" => Ok(CalculatorField::EntryPrice),
            "stop" | "stop_loss" => Ok(CalculatorField::StopLoss),
            other => Err(AcademyError::invalid_input(
                "field",
                format!("unknown calculator field '{other}'"),
            )),
        }
    }
}

/// Parses a user-typed amount, rejecting anything that is not a finite number.
pub fn parse_amount(field: CalculatorField, raw: &str) -> Result<f64, AcademyError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AcademyError::invalid_input(field.key(), format!("'{}' is not a number", raw.trim())))?;
    if !value.is_finite() {
        return Err(AcademyError::invalid_input(field.key(), "must be a finite number"));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionInputs {
    pub account_size: f64,
    pub risk_percent: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
}

impl Default for PositionInputs {
    fn default() -> Self {
        Self {
            account_size: 10_000.0,
            risk_percent: 2.0,
            entry_price: 50.0,
            stop_loss: 48.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSize {
    pub risk_amount: f64,
    pub risk_per_share: f64,
    pub shares: i64,
    pub total_value: f64,
}

impl PositionInputs {
    pub fn get(&self, field: CalculatorField) -> f64 {
        match field {
            CalculatorField::AccountSize => self.account_size,
            CalculatorField::RiskPercent => self.risk_percent,
            CalculatorField::EntryPrice => self.entry_price,
            CalculatorField::StopLoss => self.stop_loss,
        }
    }

    pub fn set(&mut self, field: CalculatorField, value: f64) {
        match field {
            CalculatorField::AccountSize => self.account_size = value,
            CalculatorField::RiskPercent => self.risk_percent = value,
            CalculatorField::EntryPrice => self.entry_price = value,
            CalculatorField::StopLoss => self.stop_loss = value,
        }
    }

    /// Sizes the position without validating inputs. A zero risk per share
    /// yields zero shares.
    pub fn size(&self) -> PositionSize {
        let risk_amount = self.account_size * self.risk_percent / 100.0;
        let risk_per_share = (self.entry_price - self.stop_loss).abs();
        let shares = if risk_per_share > 0.0 {
            (risk_amount / risk_per_share).floor() as i64
        } else {
            0
        };
        PositionSize {
            risk_amount,
            risk_per_share,
            shares,
            total_value: shares as f64 * self.entry_price,
        }
    }

    pub fn validate(&self) -> Result<(), AcademyError> {
        for field in CalculatorField::ALL {
            if !self.get(field).is_finite() {
                return Err(AcademyError::invalid_input(field.key(), "must be a finite number"));
            }
        }
        if self.account_size <= 0.0 {
            return Err(AcademyError::invalid_input(
                CalculatorField::AccountSize.key(),
                "must be positive",
            ));
        }
        if self.risk_percent <= 0.0 || self.risk_percent > MAX_RISK_PERCENT {
            return Err(AcademyError::invalid_input(
                CalculatorField::RiskPercent.key(),
                format!("must be greater than 0 and at most {MAX_RISK_PERCENT}"),
            ));
        }
        if self.entry_price <= 0.0 {
            return Err(AcademyError::invalid_input(
                CalculatorField::EntryPrice.key(),
                "must be positive",
            ));
        }
        if self.stop_loss <= 0.0 {
            return Err(AcademyError::invalid_input(
                CalculatorField::StopLoss.key(),
                "must be positive",
            ));
        }
        if self.entry_price == self.stop_loss {
            return Err(AcademyError::invalid_input(
                CalculatorField::StopLoss.key(),
                "must differ from the entry price",
            ));
        }
        Ok(())
    }

    pub fn size_checked(&self) -> Result<PositionSize, AcademyError> {
        self.validate()?;
        Ok(self.size())
    }

    pub fn calculate(&self, strict: bool) -> Result<PositionSize, AcademyError> {
        if strict {
            self.size_checked()
        } else {
            Ok(self.size())
        }
    }
}

/// `(target - entry) / (entry - stop)`; `None` when entry equals stop.
pub fn reward_to_risk(entry: f64, stop: f64, target: f64) -> Option<f64> {
    let risk = entry - stop;
    if risk == 0.0 {
        return None;
    }
    Some((target - entry) / risk)
}

/// Worked example shown at the end of the risk module.
pub struct PracticeScenario {
    pub inputs: PositionInputs,
    pub target: f64,
}

pub const PRACTICE: PracticeScenario = PracticeScenario {
    inputs: PositionInputs {
        account_size: 10_000.0,
        risk_percent: 2.0,
        entry_price: 50.0,
        stop_loss: 48.0,
    },
    target: 54.0,
};

impl PracticeScenario {
    /// Profit if the target is hit with the computed share count.
    pub fn reward(&self) -> f64 {
        let size = self.inputs.size();
        size.shares as f64 * (self.target - self.inputs.entry_price)
    }

    /// Share of the account committed to the position, in percent.
    pub fn account_share_percent(&self) -> f64 {
        self.inputs.size().total_value / self.inputs.account_size * 100.0
    }

    pub fn lines(&self) -> Vec<String> {
        let i = &self.inputs;
        let size = i.size();
        vec![
            format!(
                "Risk amount: ${:.0} x {}% = ${:.0}",
                i.account_size, i.risk_percent, size.risk_amount
            ),
            format!(
                "Risk per share: ${:.0} - ${:.0} = ${:.0}",
                i.entry_price, i.stop_loss, size.risk_per_share
            ),
            format!(
                "Position size: ${:.0} / ${:.0} = {} shares",
                size.risk_amount, size.risk_per_share, size.shares
            ),
            format!(
                "Total investment: {} x ${:.0} = ${:.0} ({:.0}% of account)",
                size.shares,
                i.entry_price,
                size.total_value,
                self.account_share_percent()
            ),
        ]
    }
}

pub const TWO_PERCENT_RULE: &str = "Alan Farley emphasizes never risking more than 2% of your \
    account on any single trade. This is the golden rule of capital preservation. Even with a \
    50% win rate, you can stay profitable long-term by following this principle.";

pub const STOP_PLACEMENT: &[(&str, &str)] = &[
    ("Below support", "Place stops just below key support levels"),
    ("Pattern extremes", "Use pattern lows/highs as stop references"),
    ("ATR method", "1.5-2x Average True Range below entry"),
    ("Never mental", "Always use hard stops in the market"),
];

pub const PROFIT_TARGETS: &[(&str, &str)] = &[
    ("Risk/Reward", "Target minimum 2:1 reward-to-risk ratio"),
    ("Scale out", "Take partial profits at key resistance levels"),
    ("Trail stops", "Move stop to breakeven, then trail upward"),
    ("Pattern targets", "Measure pattern height for price targets"),
];

pub const KEY_PRINCIPLES: &[(&str, &str)] = &[
    ("Capital Preservation", "Protecting your capital is more important than making profits"),
    ("Position Sizing", "Smaller positions = longer survival = more opportunities to profit"),
    ("Emotional Control", "Pre-calculated risk removes emotion from trading decisions"),
    ("Consistency", "Use the same risk rules for every single trade without exception"),
    ("Documentation", "Keep a trading journal to track risk metrics and improve over time"),
];
