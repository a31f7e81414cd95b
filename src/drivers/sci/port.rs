//! SCI module instances
//!
//! The F2833x carries three SCI modules. Each has a fixed register block in
//! peripheral frame 2 and a default pair of GPIOs it can be muxed onto.

/// One of the on-chip SCI modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SciPort {
    A,
    B,
    C,
}

impl SciPort {
    /// Base address of the module's register block (16-bit word address).
    pub const fn base(self) -> usize {
        match self {
            SciPort::A => 0x7050,
            SciPort::B => 0x7750,
            SciPort::C => 0x7770,
        }
    }

    /// GPIO number muxed to the receive line.
    pub const fn rx_gpio(self) -> u8 {
        match self {
            SciPort::A => 28,
            SciPort::B => 19,
            SciPort::C => 62,
        }
    }

    /// GPIO number muxed to the transmit line.
    pub const fn tx_gpio(self) -> u8 {
        match self {
            SciPort::A => 29,
            SciPort::B => 18,
            SciPort::C => 63,
        }
    }
}
