//! Typed records for the marketplace collections, the lifecycle policies, and
//! the ports the sweep operates through.

pub mod application;
pub mod contract;
pub mod delivery;
pub mod event;
pub mod notification;
pub mod policy;
pub mod ports;
pub mod transaction;
