mod account;
mod error;
mod integrity;
mod ledger;
mod money;
mod role;
mod transaction;

pub use account::*;
pub use error::*;
pub use integrity::*;
pub use ledger::*;
pub use money::*;
pub use role::*;
pub use transaction::*;
