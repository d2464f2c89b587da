//! Persistence boundary of the voucher service.

use std::future::Future;
use thiserror::Error;

use crate::model::{Discount, Voucher, VoucherCode, VoucherId};

mod memory;
pub use memory::MemoryStore;

/// Errors reported by a [`VoucherStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("code '{0}' is already taken")]
    DuplicateCode(VoucherCode),

    #[error("voucher {0} not found")]
    NotFound(VoucherId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage operations for vouchers.
///
/// Writes are conditional so a read followed by a write cannot double-spend:
/// - `create_voucher` fails with [`StoreError::DuplicateCode`] if the code exists
/// - `use_voucher` only flips `used` if it is still `false`
pub trait VoucherStore: Send + Sync {
    /// Look up a voucher by its exact code.
    fn get_voucher_by_code(
        &self,
        code: &VoucherCode,
    ) -> impl Future<Output = Result<Option<Voucher>, StoreError>> + Send;

    /// Insert a new unused voucher and return it with its assigned id.
    fn create_voucher(
        &self,
        code: &VoucherCode,
        discount: Discount,
    ) -> impl Future<Output = Result<Voucher, StoreError>> + Send;

    /// Mark the voucher as used. Returns the updated voucher, or `None` if it
    /// was already used.
    fn use_voucher(
        &self,
        voucher: &Voucher,
    ) -> impl Future<Output = Result<Option<Voucher>, StoreError>> + Send;
}
