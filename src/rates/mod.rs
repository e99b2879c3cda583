//! Period-return factors for the three swap indexers.

pub mod adjustment;
