//! Error types for voucher operations.

use thiserror::Error;

use crate::Amount;
use crate::model::VoucherCode;
use crate::store::StoreError;

/// Error returned by [`VoucherManager`](super::VoucherManager) operations.
///
/// A voucher that exists but is used, or a purchase below the minimum, is not
/// an error: it is reported through
/// [`ApplicationResult::applied`](crate::model::ApplicationResult).
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Voucher already exist.")]
    DuplicateVoucher(VoucherCode),

    #[error("Voucher does not exist.")]
    VoucherNotFound(String),

    #[error("voucher code must not be empty")]
    InvalidCode,

    #[error("discount must be between 1 and 100, got {0}")]
    InvalidDiscount(u32),

    #[error("purchase amount must not be negative, got {0}")]
    InvalidAmount(Amount),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ManagerError {
    /// True when the caller can retry with different input.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, ManagerError::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_messages() {
        let code = VoucherCode::new("FIDO10").unwrap();
        assert_eq!(
            ManagerError::DuplicateVoucher(code).to_string(),
            "Voucher already exist."
        );
        assert_eq!(
            ManagerError::VoucherNotFound("NOPE".to_string()).to_string(),
            "Voucher does not exist."
        );
    }

    #[test]
    fn store_failures_are_not_rejections() {
        let err = ManagerError::from(StoreError::Unavailable("down".to_string()));
        assert!(!err.is_rejection());
        assert_eq!(err.to_string(), "store unavailable: down");
        assert!(ManagerError::InvalidAmount(Amount::from_whole(-1)).is_rejection());
    }
}
