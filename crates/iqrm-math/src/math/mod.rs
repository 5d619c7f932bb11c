//! Core math modules.

pub mod lagged;
pub mod quantile;
pub mod robust;
