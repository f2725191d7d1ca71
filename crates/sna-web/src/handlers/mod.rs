//! Web handlers
//!
//! Author: hephaex@gmail.com

pub mod health;
pub mod page;
