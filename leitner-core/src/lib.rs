pub mod buckets;
pub mod errors;
pub mod models;
pub mod scheduler;
pub mod stats;

pub use buckets::*;
pub use errors::*;
pub use models::*;
pub use scheduler::*;
pub use stats::*;
