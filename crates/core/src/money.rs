//! Money and tax-rate value objects.
//!
//! Amounts are integer minor currency units (paise, cents). Nothing in this
//! module touches floating point.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

const MINOR_PER_MAJOR: u64 = 100;
const BPS_PER_UNIT: u64 = 10_000;

/// Non-negative amount in the smallest currency unit.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Whole currency units (e.g. rupees), saturating on overflow.
    pub const fn from_major(major: u64) -> Self {
        Self(major.saturating_mul(MINOR_PER_MAJOR))
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Line total: `self × quantity`.
    pub const fn times(self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(quantity as u64))
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / MINOR_PER_MAJOR, self.0 % MINOR_PER_MAJOR)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parses `"35000"`, `"499.9"` or `"499.99"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scaled(s, 2)
            .map(Money)
            .ok_or_else(|| DomainError::validation(format!("invalid amount '{s}'")))
    }
}

/// Tax rate in basis points (`0.18` = 1800 bps).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxRate(u32);

impl TaxRate {
    pub const ZERO: TaxRate = TaxRate(0);

    pub const fn from_bps(bps: u32) -> Self {
        Self(bps)
    }

    pub const fn bps(self) -> u32 {
        self.0
    }

    /// Tax owed on `amount`, rounded half-up to the nearest minor unit.
    pub fn tax_on(self, amount: Money) -> Money {
        let scaled = amount.minor() as u128 * self.0 as u128 + (BPS_PER_UNIT as u128 / 2);
        let tax = scaled / BPS_PER_UNIT as u128;
        Money(u64::try_from(tax).unwrap_or(u64::MAX))
    }

    /// `amount × (1 + rate)`.
    pub fn gross(self, amount: Money) -> Money {
        amount.saturating_add(self.tax_on(amount))
    }
}

impl core::fmt::Display for TaxRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let bps = self.0 as u64;
        let frac = format!("{:04}", bps % BPS_PER_UNIT);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            write!(f, "{}", bps / BPS_PER_UNIT)
        } else {
            write!(f, "{}.{}", bps / BPS_PER_UNIT, frac)
        }
    }
}

impl FromStr for TaxRate {
    type Err = DomainError;

    /// Parses a decimal fraction such as `"0.18"` (at most four decimals).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scaled(s, 4)
            .and_then(|bps| u32::try_from(bps).ok())
            .map(TaxRate)
            .ok_or_else(|| DomainError::validation(format!("invalid tax rate '{s}'")))
    }
}

impl TryFrom<String> for TaxRate {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaxRate> for String {
    fn from(value: TaxRate) -> Self {
        value.to_string()
    }
}

/// Parse an unsigned decimal with at most `decimals` fractional digits into
/// an integer scaled by `10^decimals`.
pub(crate) fn parse_scaled(s: &str, decimals: u32) -> Option<u64> {
    let s = s.trim();
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > decimals as usize
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac_value: u64 = if frac.is_empty() { 0 } else { frac.parse().ok()? };
    let frac_scale = 10u64.pow(decimals - frac.len() as u32);

    whole
        .checked_mul(10u64.pow(decimals))?
        .checked_add(frac_value * frac_scale)
}

/// Convenience for config readers that want a typed parse with a field name.
pub fn parse_money(field: &str, raw: &str) -> DomainResult<Money> {
    raw.parse::<Money>()
        .map_err(|_| DomainError::validation(format!("{field}: invalid amount '{raw}'")))
}
