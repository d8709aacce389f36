//! Campus - EAFIT Virtual Assistant
//!
//! Record collections for the campus (classrooms, events, restaurants, staff
//! directory, student groups, map, academic calendar and knowledge sources),
//! a conjunctive filter engine over them, and a keyword-driven chat responder
//! with a cancellable typing delay.

pub mod commands;
pub mod config;
pub mod conversation;
pub mod display;
pub mod error;
pub mod filter;
pub mod login;
pub mod record;
pub mod responder;
pub mod session;
pub mod store;
pub mod text;
pub mod toggle;

pub use error::{CampusError, LoginError, Result};
pub use filter::{filter_records, FilterCriteria, NumericBucket, Selection};
pub use responder::{respond_to, Responder, Response, RuleTable};
pub use store::{Collection, RecordStore};
