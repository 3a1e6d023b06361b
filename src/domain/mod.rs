mod budget;
mod money;
mod shops;
mod transaction;
mod user;

pub use budget::*;
pub use money::*;
pub use shops::*;
pub use transaction::*;
pub use user::*;
