//! Core domain types for the voucher service.

use std::fmt;

use crate::Amount;

/// Voucher identifier, assigned by the store.
pub type VoucherId = u64;

/// A voucher code. Never empty or blank; compared exactly, case included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoucherCode(String);

impl VoucherCode {
    /// Returns `None` for an empty or whitespace-only code.
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return None;
        }
        Some(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoucherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whole percentage taken off a purchase, between 1 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Discount(u8);

impl Discount {
    pub const MAX: u32 = 100;

    /// Returns `None` outside `1..=100`.
    pub fn new(percent: u32) -> Option<Self> {
        match percent {
            1..=Self::MAX => Some(Self(percent as u8)),
            _ => None,
        }
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A discount code record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voucher {
    pub id: VoucherId,
    pub code: VoucherCode,
    pub discount: Discount,
    /// Flips to `true` once, on the first successful application.
    pub used: bool,
}

/// Outcome of applying a voucher to a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationResult {
    /// Purchase amount as supplied by the caller.
    pub amount: Amount,
    /// Discount of the voucher, echoed whether applied or not.
    pub discount: Discount,
    /// Amount to pay; equal to `amount` when not applied.
    pub final_amount: Amount,
    pub applied: bool,
}

impl ApplicationResult {
    pub fn declined(amount: Amount, discount: Discount) -> Self {
        Self {
            amount,
            discount,
            final_amount: amount,
            applied: false,
        }
    }

    pub fn applied(amount: Amount, discount: Discount) -> Self {
        Self {
            amount,
            discount,
            final_amount: amount.percent_off(discount.percent()),
            applied: true,
        }
    }
}

/// An operation submitted to the service.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Register a new voucher code.
    Create { code: String, discount: u32 },
    /// Apply a voucher to a purchase amount.
    Apply { code: String, amount: Amount },
}

impl Operation {
    pub fn code(&self) -> &str {
        match self {
            Operation::Create { code, .. } | Operation::Apply { code, .. } => code,
        }
    }
}
