#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod board;
pub mod canvas;
pub mod endpoint;
pub mod generation;
pub mod prelude;

pub use error::{BoxedError, Error, ErrorKind, Result};
