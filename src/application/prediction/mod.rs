pub mod context;
pub mod heuristic;
pub mod router;

pub use context::ServiceContext;
pub use router::predict;
