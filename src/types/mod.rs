//! Core types for the fireclient.

pub mod error;
pub mod record;

pub use error::{ClientError, ParseError, Result};
pub use record::{Fields, Record};
