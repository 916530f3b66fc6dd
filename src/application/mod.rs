//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `LifecycleSweeper`, the single entry point for the
//! periodic contract/event lifecycle sweep. It owns boxed store ports and a
//! clock, and performs one full scan-and-reconcile pass per invocation.

pub mod sweeper;
