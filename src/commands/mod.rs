#![allow(clippy::needless_pass_by_value)]

pub mod analyze;
pub mod classify;
pub mod init;
pub mod session;
