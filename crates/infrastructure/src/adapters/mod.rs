//! Port implementations

mod ensemble_adapter;

pub use ensemble_adapter::EnsembleClassifierAdapter;
