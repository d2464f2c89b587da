use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{StoreError, VoucherStore};
use crate::model::{Discount, Voucher, VoucherCode, VoucherId};

#[derive(Debug, Default)]
struct Inner {
    vouchers: HashMap<VoucherCode, Voucher>,
    last_id: VoucherId,
}

/// In-memory voucher store. Ids start at 1.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored vouchers.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.vouchers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl VoucherStore for MemoryStore {
    async fn get_voucher_by_code(&self, code: &VoucherCode) -> Result<Option<Voucher>, StoreError> {
        Ok(self.inner.lock().await.vouchers.get(code).cloned())
    }

    async fn create_voucher(
        &self,
        code: &VoucherCode,
        discount: Discount,
    ) -> Result<Voucher, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.vouchers.contains_key(code) {
            return Err(StoreError::DuplicateCode(code.clone()));
        }

        inner.last_id += 1;
        let voucher = Voucher {
            id: inner.last_id,
            code: code.clone(),
            discount,
            used: false,
        };
        inner.vouchers.insert(code.clone(), voucher.clone());
        Ok(voucher)
    }

    async fn use_voucher(&self, voucher: &Voucher) -> Result<Option<Voucher>, StoreError> {
        let mut inner = self.inner.lock().await;
        let stored = inner
            .vouchers
            .get_mut(&voucher.code)
            .filter(|stored| stored.id == voucher.id)
            .ok_or(StoreError::NotFound(voucher.id))?;

        if stored.used {
            return Ok(None);
        }
        stored.used = true;
        Ok(Some(stored.clone()))
    }
}
