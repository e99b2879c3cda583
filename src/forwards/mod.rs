//! FX forwards settled by difference.

pub mod ndf;
