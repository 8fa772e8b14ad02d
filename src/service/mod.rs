pub mod transfer;

pub use transfer::{ApproveOrder, SwapOrder, TransferService, WithdrawalOrder};
