//! Adapters implementing the domain ports.

pub mod in_memory;
pub mod json_file;
pub mod seed;
pub mod simulated_payment;
