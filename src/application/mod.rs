// Application layer - the ledger aggregate and its request/response values.
// Presentation layers (the CLI, or anything else) only talk to `Ledger`.

pub mod error;
pub mod ledger;

pub use error::*;
pub use ledger::*;
