//! sci-echo - polled SCI echo-back for TMS320F2833x DSPs
//!
//! Receives characters on SCI-C and sends each one back to the host terminal,
//! using blocking FIFO polling only. No interrupts, no DMA.
//!
//! # Layout
//! - `drivers::sci`: register layer and the typestate SCI driver
//! - `drivers::sysctrl`: clock, interrupt-table and pin-mux collaborators
//! - `echo`: the greeting / prompt / echo loop and its counters
//! - `logger`: `log` backend over any `fmt::Write` sink
//!
//! # Build Configuration
//! - `cpu-150mhz` (default) / `cpu-100mhz`: core clock profile, selects the
//!   baud divisor. Exactly one must be enabled.
//! - `dsp2833x`: bind to the vendor device-support library and build the
//!   on-target binary.
//! - `log-scia`: send diagnostics to SCI-A on target.
//!
//! The library is `no_std`; under `cfg(test)` it links `std` so the driver can
//! be exercised on the host against a simulated register block.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod drivers;
pub mod echo;
pub mod logger;

pub use drivers::sci::config::{ClockProfile, LineFormat};
pub use drivers::sci::port::SciPort;
pub use drivers::sci::regs::{Mmio, SciRegisters};
pub use drivers::sci::{Held, Ready, Sci};
pub use echo::{EchoLoop, EchoSession, EchoState};
