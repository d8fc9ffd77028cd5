pub mod board;
pub mod catalog;
pub mod data_sync;
pub mod health;
pub mod rules;

pub use board::{AdvisoryBoard, AdvisoryFilter};
pub use data_sync::ConditionsService;
pub use rules::RulesEngine;
