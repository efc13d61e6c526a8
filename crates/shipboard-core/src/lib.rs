pub mod activity;
pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod evaluate;
pub mod io;
pub mod paths;
pub mod presentation;
pub mod readiness;
pub mod release;
pub mod roster;
pub mod rules;
pub mod schedule;
pub mod store;
pub mod types;
pub mod upcoming;

pub use classifier::{classify, ClassifyInput};
pub use error::{Result, ShipboardError};
pub use types::{ExplicitStatus, ReleaseState};
