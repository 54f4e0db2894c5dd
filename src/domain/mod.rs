//! Domain model: money, menu, carts, orders and the production manifest,
//! plus the ports through which the application reaches its collaborators.

pub mod cart;
pub mod customer;
pub mod menu;
pub mod money;
pub mod order;
pub mod ports;
pub mod production;
