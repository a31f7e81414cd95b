//! SCI register block
//!
//! Register offsets, bit layouts and the access trait the driver is written
//! against. Offsets are in 16-bit words from the module base, matching the
//! C28x data-space addressing.
//!
//! # Register Map
//! | Offset | Register | Use in this driver                  |
//! |--------|----------|-------------------------------------|
//! | 0x0    | SCICCR   | line format                         |
//! | 0x1    | SCICTL1  | TX/RX enable, software reset        |
//! | 0x2    | SCIHBAUD | baud divisor, high byte             |
//! | 0x3    | SCILBAUD | baud divisor, low byte              |
//! | 0x4    | SCICTL2  | interrupt enables (reserved)        |
//! | 0x7    | SCIRXBUF | receive buffer                      |
//! | 0x9    | SCITXBUF | transmit buffer                     |
//! | 0xA    | SCIFFTX  | TX FIFO control and status          |
//! | 0xB    | SCIFFRX  | RX FIFO control and status          |
//! | 0xC    | SCIFFCT  | FIFO control (auto-baud, delay)     |

use bitflags::bitflags;

use super::port::SciPort;

/// Number of 16-bit words in one SCI register block.
pub const REG_COUNT: usize = 16;

/// SCI registers touched by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    /// Communications control (line format).
    Ccr,
    /// Control register 1.
    Ctl1,
    /// Baud divisor, high byte.
    HBaud,
    /// Baud divisor, low byte.
    LBaud,
    /// Control register 2.
    Ctl2,
    /// Receive data buffer.
    RxBuf,
    /// Transmit data buffer.
    TxBuf,
    /// FIFO transmit register.
    FfTx,
    /// FIFO receive register.
    FfRx,
    /// FIFO control register.
    FfCt,
}

impl Reg {
    /// Word offset of the register from the module base.
    pub const fn offset(self) -> usize {
        match self {
            Reg::Ccr => 0x0,
            Reg::Ctl1 => 0x1,
            Reg::HBaud => 0x2,
            Reg::LBaud => 0x3,
            Reg::Ctl2 => 0x4,
            Reg::RxBuf => 0x7,
            Reg::TxBuf => 0x9,
            Reg::FfTx => 0xA,
            Reg::FfRx => 0xB,
            Reg::FfCt => 0xC,
        }
    }

    /// True for the data buffers, false for configuration and status.
    pub const fn is_buffer(self) -> bool {
        matches!(self, Reg::RxBuf | Reg::TxBuf)
    }
}

bitflags! {
    /// SCICCR - communications control.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Ccr: u16 {
        /// Two stop bits when set.
        const STOPBITS = 1 << 7;
        /// Even parity when set (with PARITYENA).
        const EVENPARITY = 1 << 6;
        const PARITYENA = 1 << 5;
        /// Internal loopback of TX onto RX.
        const LOOPBKENA = 1 << 4;
        /// Address-bit mode when set, idle-line mode when clear.
        const ADDRIDLE_MODE = 1 << 3;
        /// Character length minus one [2:0].
        const SCICHAR = 0b111;
    }
}

bitflags! {
    /// SCICTL1 - control register 1.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Ctl1: u16 {
        const RXERRINTENA = 1 << 6;
        /// Active low: the module is held in reset while this bit is clear.
        const SWRESET = 1 << 5;
        const TXWAKE = 1 << 3;
        const SLEEP = 1 << 2;
        const TXENA = 1 << 1;
        const RXENA = 1 << 0;
    }
}

bitflags! {
    /// SCICTL2 - control register 2.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Ctl2: u16 {
        const TXRDY = 1 << 7;
        const TXEMPTY = 1 << 6;
        const RXBKINTENA = 1 << 1;
        const TXINTENA = 1 << 0;
    }
}

bitflags! {
    /// SCIFFTX - FIFO transmit control and status.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FfTx: u16 {
        /// Active low reset of the SCI transmit and receive channels.
        const SCIRST = 1 << 15;
        const SCIFFENA = 1 << 14;
        /// Active low reset of the transmit FIFO pointer.
        const TXFIFOXRESET = 1 << 13;
        /// Transmit FIFO level [12:8], read only.
        const TXFFST = 0x1F << 8;
        const TXFFINT = 1 << 7;
        const TXFFINTCLR = 1 << 6;
        const TXFFIENA = 1 << 5;
        /// Transmit interrupt level [4:0].
        const TXFFIL = 0x1F;
    }
}

bitflags! {
    /// SCIFFRX - FIFO receive control and status.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FfRx: u16 {
        const RXFFOVF = 1 << 15;
        const RXFFOVRCLR = 1 << 14;
        /// Active low reset of the receive FIFO pointer.
        const RXFIFORESET = 1 << 13;
        /// Receive FIFO level [12:8], read only.
        const RXFFST = 0x1F << 8;
        const RXFFINT = 1 << 7;
        const RXFFINTCLR = 1 << 6;
        const RXFFIENA = 1 << 5;
        /// Receive interrupt level [4:0].
        const RXFFIL = 0x1F;
    }
}

/// Bit position of the TXFFST/RXFFST level fields.
pub const FIFO_LEVEL_SHIFT: u16 = 8;

impl FfTx {
    /// Number of words waiting in the transmit FIFO.
    pub const fn level(self) -> u16 {
        (self.bits() & Self::TXFFST.bits()) >> FIFO_LEVEL_SHIFT
    }
}

impl FfRx {
    /// Number of words waiting in the receive FIFO.
    pub const fn level(self) -> u16 {
        (self.bits() & Self::RXFFST.bits()) >> FIFO_LEVEL_SHIFT
    }
}

/// Raw 16-bit access to one SCI register block.
///
/// Reads may have side effects in hardware: reading SCIRXBUF pops the
/// receive FIFO.
pub trait SciRegisters {
    fn read(&self, reg: Reg) -> u16;
    fn write(&self, reg: Reg, value: u16);

    /// Read-modify-write helper.
    fn modify(&self, reg: Reg, f: impl FnOnce(u16) -> u16) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }
}

impl<T: SciRegisters> SciRegisters for &T {
    fn read(&self, reg: Reg) -> u16 {
        (**self).read(reg)
    }

    fn write(&self, reg: Reg, value: u16) {
        (**self).write(reg, value)
    }
}

/// Memory-mapped register block of a real SCI module.
#[derive(Debug)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// Bind to the register block of `port`.
    ///
    /// # Safety
    /// - Must run on a device where `port.base()` is the SCI register block
    /// - At most one live `Mmio` per port; the driver assumes exclusive access
    pub const unsafe fn new(port: SciPort) -> Self {
        Self { base: port.base() }
    }

    /// Base address of the bound register block.
    pub const fn base(&self) -> usize {
        self.base
    }

    fn ptr(&self, reg: Reg) -> *mut u16 {
        (self.base as *mut u16).wrapping_add(reg.offset())
    }
}

impl SciRegisters for Mmio {
    fn read(&self, reg: Reg) -> u16 {
        // SAFETY: `base` names a valid SCI block per the contract of `new`,
        // and every `Reg` offset lies inside that block.
        unsafe { core::ptr::read_volatile(self.ptr(reg)) }
    }

    fn write(&self, reg: Reg, value: u16) {
        // SAFETY: same as `read`
        unsafe { core::ptr::write_volatile(self.ptr(reg), value) }
    }
}
