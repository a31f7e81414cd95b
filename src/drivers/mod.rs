//! Device drivers
//!
//! - `sci`: polled SCI (UART) driver and its register layer
//! - `sysctrl`: clock, interrupt-table and pin-mux collaborators
//!
//! Unsafe code lives only where hardware is touched: MMIO construction and
//! the vendor FFI. Everything above those seams is safe and host-testable.

pub mod sci;
pub mod sysctrl;
