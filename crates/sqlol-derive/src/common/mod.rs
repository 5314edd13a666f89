//! Common utilities shared across macro modules.

pub mod rename;
pub mod sql_ident;
