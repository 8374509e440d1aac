//! Built-in task handler implementations.

pub mod reconcile;

pub use reconcile::ReconcileJobHandler;
