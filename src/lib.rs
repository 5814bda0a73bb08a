pub mod domain;
pub mod error;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::assembler::{ImbibeParams, InstructionBundle, TransactionAssembler};
pub use domain::connection::{Connection, Connector};
pub use domain::resolver::resolve_sns_domain;
pub use error::{ImbibeError, LogOnError};
pub use infra::solana;
