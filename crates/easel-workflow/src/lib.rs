#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod classify;
pub mod dispatch;
pub mod extract;

pub use classify::{WorkflowMatch, classify};
pub use dispatch::{DispatchOutcome, DispatchReport, DispatchState, Dispatched, Dispatcher};
pub use extract::{Extraction, Role, RoleBindings, extract};
