// src/fault/mod.rs
//! Error reporting subsystem
//!
//! A static catalog maps subsystem faults onto a prioritized integer code
//! space, and a single bounded queue carries pending codes to the display
//! and the remote protocol. Delivery order is strictly insertion order;
//! priorities only partition the numbering.

pub mod catalog;
pub mod queue;

pub use catalog::{
    encode, message, ErrorCode, Fault, GenericFault, HardwareFault, ProtocolFault,
    GENERIC_PRIORITY, HARDWARE_PRIORITY, PROTOCOL_PRIORITY,
};
pub use queue::{FaultQueue, NotifyFn, FAULT_QUEUE_DEPTH};
