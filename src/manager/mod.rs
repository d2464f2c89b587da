//! Voucher lifecycle and application rules.
//!
//! The manager is stateless: it reads from the injected [`VoucherStore`],
//! applies the eligibility rules and asks the store to persist the only
//! state change there is, `used` going from `false` to `true`.
//! Also supports async stream of operations.

use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::Amount;
use crate::model::{ApplicationResult, Discount, Operation, Voucher, VoucherCode};
use crate::store::{StoreError, VoucherStore};

mod error;
pub use error::ManagerError;

/// Tunables of the eligibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Smallest purchase a voucher can be applied to (inclusive).
    pub minimum_amount: Amount,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            minimum_amount: Amount::from_whole(100),
        }
    }
}

/// Result of a successfully executed [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(Voucher),
    Applied(ApplicationResult),
}

/// Creates vouchers and applies them to purchases.
pub struct VoucherManager<S> {
    store: S,
    config: ManagerConfig,
}

/// Public API
impl<S: VoucherStore> VoucherManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, ManagerConfig::default())
    }

    pub fn with_config(store: S, config: ManagerConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Register a new voucher:
    /// - Reject a blank code or a discount outside 1..=100
    /// - Reject a code that is already taken
    /// - Insert the voucher as unused
    pub async fn create_voucher(&self, code: &str, discount: u32) -> Result<Voucher, ManagerError> {
        let code = VoucherCode::new(code).ok_or(ManagerError::InvalidCode)?;
        let discount = Discount::new(discount).ok_or(ManagerError::InvalidDiscount(discount))?;

        if self.store.get_voucher_by_code(&code).await?.is_some() {
            return Err(ManagerError::DuplicateVoucher(code));
        }

        // The code may have been taken since the lookup
        match self.store.create_voucher(&code, discount).await {
            Ok(voucher) => Ok(voucher),
            Err(StoreError::DuplicateCode(code)) => Err(ManagerError::DuplicateVoucher(code)),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a voucher to a purchase, each rule short-circuiting the next:
    /// - Unknown (or blank) code is an error
    /// - Used voucher leaves the amount unchanged
    /// - Amount under the minimum leaves the amount unchanged
    /// - Otherwise take the discount off and mark the voucher used
    pub async fn apply_voucher(
        &self,
        code: &str,
        amount: Amount,
    ) -> Result<ApplicationResult, ManagerError> {
        if amount.is_negative() {
            return Err(ManagerError::InvalidAmount(amount));
        }
        // a blank code cannot name any voucher
        let Some(code) = VoucherCode::new(code) else {
            return Err(ManagerError::VoucherNotFound(code.to_string()));
        };

        let voucher = self
            .store
            .get_voucher_by_code(&code)
            .await?
            .ok_or_else(|| ManagerError::VoucherNotFound(code.to_string()))?;

        if voucher.used || amount < self.config.minimum_amount {
            return Ok(ApplicationResult::declined(amount, voucher.discount));
        }

        // Lost a race with another application: same as already used
        if self.store.use_voucher(&voucher).await?.is_none() {
            warn!(code = %voucher.code, "voucher used concurrently");
            return Ok(ApplicationResult::declined(amount, voucher.discount));
        }

        Ok(ApplicationResult::applied(amount, voucher.discount))
    }

    /// Execute a single operation and log its result
    pub async fn execute(&self, operation: Operation) -> Result<Outcome, ManagerError> {
        let result = match &operation {
            Operation::Create { code, discount } => self
                .create_voucher(code, *discount)
                .await
                .map(Outcome::Created),
            Operation::Apply { code, amount } => self
                .apply_voucher(code, *amount)
                .await
                .map(Outcome::Applied),
        };
        Self::log_result(&operation, &result);
        result
    }

    /// Run the manager over the given operation stream, in order.
    pub async fn run(
        &self,
        mut stream: impl Stream<Item = Operation> + Unpin,
    ) -> Vec<(Operation, Result<Outcome, ManagerError>)> {
        let mut results = Vec::new();
        while let Some(operation) = stream.next().await {
            // a failed operation does not stop the run
            let result = self.execute(operation.clone()).await;
            results.push((operation, result));
        }
        results
    }
}

/// Private API
impl<S: VoucherStore> VoucherManager<S> {
    /// Small helper to log `execute` results
    fn log_result(operation: &Operation, result: &Result<Outcome, ManagerError>) {
        let code = operation.code();
        match result {
            Ok(Outcome::Created(voucher)) => {
                info!(code, id = voucher.id, discount = %voucher.discount, "voucher created");
            }
            Ok(Outcome::Applied(r)) if r.applied => {
                info!(
                    code,
                    amount = %r.amount,
                    final_amount = %r.final_amount,
                    "voucher applied"
                );
            }
            Ok(Outcome::Applied(r)) => {
                info!(code, amount = %r.amount, "voucher declined");
            }
            Err(e) if e.is_rejection() => {
                info!(code, reason = %e, "operation rejected");
            }
            Err(e) => {
                warn!(code, reason = %e, "operation failed");
            }
        }
    }
}
