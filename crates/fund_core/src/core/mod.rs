pub mod errors;
pub mod fund_manager;
pub mod utils;
pub mod watch;

pub use errors::CliError;
pub use fund_manager::{FundManager, LoadMetadata};
pub use watch::{ChangeFeed, ChangeNotice, ChangeScope};
