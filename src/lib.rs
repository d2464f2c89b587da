pub mod amount;
pub mod csv;
pub mod manager;
pub mod model;
pub mod store;

pub use amount::Amount;
pub use manager::{ManagerConfig, ManagerError, Outcome, VoucherManager};
pub use model::{ApplicationResult, Discount, Operation, Voucher, VoucherCode, VoucherId};
pub use store::{MemoryStore, StoreError, VoucherStore};
