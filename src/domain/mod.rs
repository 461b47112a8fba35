mod date;
mod money;
mod record;
mod validation;

pub use date::*;
pub use money::*;
pub use record::*;
pub use validation::*;
