pub mod initialize_factory;
pub mod update_factory;
pub mod create_market;
pub mod join_market;
pub mod resolve;
pub mod withdraw;
pub mod cancel;
pub mod claim_refund;
pub mod record_result;

pub use initialize_factory::*;
pub use update_factory::*;
pub use create_market::*;
pub use join_market::*;
pub use resolve::*;
pub use withdraw::*;
pub use cancel::*;
pub use claim_refund::*;
pub use record_result::*;
