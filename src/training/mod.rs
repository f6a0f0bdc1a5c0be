//! Training infrastructure: the RMSprop trainer, test-slice evaluation and
//! per-epoch metrics collection.

pub mod metrics;
pub mod trainer;
