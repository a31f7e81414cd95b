//! Polled SCI (UART) driver for the F2833x
//!
//! Interrupt-free, blocking I/O over one SCI module. All waiting is a busy
//! poll on a FIFO status field with no timeout: a stalled or unplugged line
//! hangs the caller. Nothing here installs an interrupt handler.
//!
//! # Bring-up Order
//! A driver starts in the [`Held`] state, where it can only be configured.
//! [`Sci::configure`] programs the format and divisor while the module is in
//! software reset, releases it as its last write, and returns a [`Ready`]
//! driver. I/O methods exist only on `Sci<_, Ready>`, so touching the data
//! buffers of an unconfigured module does not compile.
//!
//! # Safety Considerations
//! - The driver itself contains no unsafe code
//! - MMIO access is confined to [`regs::Mmio`]

pub mod config;
pub mod port;
pub mod regs;

#[cfg(test)]
pub mod sim;

use core::fmt;
use core::marker::PhantomData;

use log::{debug, trace};

use self::config::{ClockProfile, LineFormat};
use self::regs::{Ctl1, Ctl2, FfRx, FfTx, Reg, SciRegisters};

/// Module is in software reset; only configuration is allowed.
#[derive(Debug)]
pub struct Held;

/// Module is configured and released; I/O is allowed.
#[derive(Debug)]
pub struct Ready;

/// SCIFFTX: SCI out of reset, FIFO enhancements on, TX FIFO out of reset,
/// TX FIFO interrupt flag cleared.
pub const FIFO_TX_INIT: FfTx = FfTx::SCIRST
    .union(FfTx::SCIFFENA)
    .union(FfTx::TXFIFOXRESET)
    .union(FfTx::TXFFINTCLR);

/// SCIFFRX: RX FIFO out of reset, RX FIFO interrupt flag cleared,
/// interrupt level 15.
pub const FIFO_RX_INIT: FfRx = FfRx::RXFIFORESET
    .union(FfRx::RXFFINTCLR)
    .union(FfRx::from_bits_retain(0x000F));

/// SCIFFCT: auto-baud off, no transmit delay.
pub const FIFO_CT_INIT: u16 = 0x0000;

/// SCICTL1 while held: TX and RX enabled, SWRESET low.
const CTL1_HELD: Ctl1 = Ctl1::TXENA.union(Ctl1::RXENA);

/// SCICTL2: TX and RX-break interrupt enables.
///
/// No handler is installed, so these bits have no observable effect. They
/// are kept set so an interrupt-driven driver can be layered on later.
const CTL2_INIT: Ctl2 = Ctl2::TXINTENA.union(Ctl2::RXBKINTENA);

/// One SCI module.
#[derive(Debug)]
pub struct Sci<R, S = Ready> {
    regs: R,
    _state: PhantomData<S>,
}

impl<R, S> Sci<R, S> {
    /// Underlying register block.
    pub fn registers(&self) -> &R {
        &self.regs
    }
}

impl<R: SciRegisters> Sci<R, Held> {
    /// Take ownership of a register block. The module is assumed to be in
    /// its reset state and is not touched until configured.
    pub const fn new(regs: R) -> Self {
        Self {
            regs,
            _state: PhantomData,
        }
    }

    /// Program the FIFO control registers with their fixed values.
    pub fn init_fifo(&mut self) {
        self.regs.write(Reg::FfTx, FIFO_TX_INIT.bits());
        self.regs.write(Reg::FfRx, FIFO_RX_INIT.bits());
        self.regs.write(Reg::FfCt, FIFO_CT_INIT);
        debug!(
            "sci: fifo tx={:#06x} rx={:#06x}",
            FIFO_TX_INIT.bits(),
            FIFO_RX_INIT.bits()
        );
    }

    /// Program line format and baud divisor, then release the module.
    ///
    /// Every register is written while SWRESET is low; the release is the
    /// final write.
    pub fn configure(self, format: LineFormat, profile: ClockProfile) -> Sci<R, Ready> {
        let divisor = profile.divisor();

        self.regs.write(Reg::Ccr, format.word());
        self.regs.write(Reg::Ctl1, CTL1_HELD.bits());
        self.regs.write(Reg::Ctl2, CTL2_INIT.bits());
        self.regs
            .modify(Reg::Ctl2, |v| v | Ctl2::TXINTENA.bits());
        self.regs
            .modify(Reg::Ctl2, |v| v | Ctl2::RXBKINTENA.bits());
        self.regs.write(Reg::HBaud, divisor.high);
        self.regs.write(Reg::LBaud, divisor.low);
        debug!(
            "sci: format={:#06x} profile={:?} brr={:#06x}",
            format.word(),
            profile,
            divisor.value()
        );

        self.regs
            .write(Reg::Ctl1, CTL1_HELD.union(Ctl1::SWRESET).bits());
        debug!("sci: released from reset");

        Sci {
            regs: self.regs,
            _state: PhantomData,
        }
    }
}

impl<R: SciRegisters> Sci<R, Ready> {
    /// Transmit one byte.
    ///
    /// Spins until the transmit FIFO is empty, then writes SCITXBUF.
    pub fn transmit_byte(&mut self, byte: u8) {
        while FfTx::from_bits_retain(self.regs.read(Reg::FfTx)).level() != 0 {
            core::hint::spin_loop();
        }
        self.regs.write(Reg::TxBuf, u16::from(byte));
    }

    /// Transmit bytes up to the first zero byte, which is not sent.
    ///
    /// A slice without a terminator is sent in full.
    pub fn transmit_str(&mut self, bytes: &[u8]) {
        for &byte in bytes.iter().take_while(|&&b| b != 0) {
            self.transmit_byte(byte);
        }
    }

    /// True when the receive FIFO holds at least one byte.
    ///
    /// Reads the status register only and consumes nothing.
    pub fn byte_ready(&self) -> bool {
        FfRx::from_bits_retain(self.regs.read(Reg::FfRx)).level() != 0
    }

    /// Read one byte from SCIRXBUF.
    ///
    /// Does not wait: the caller checks [`Sci::byte_ready`] first.
    pub fn receive_byte(&mut self) -> u8 {
        let byte = self.regs.read(Reg::RxBuf) as u8;
        trace!("sci: rx {:#04x}", byte);
        byte
    }
}

/// Formatted output. `\n` is sent as `\r\n` for terminal display.
impl<R: SciRegisters> fmt::Write for Sci<R, Ready> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.transmit_byte(b'\r');
            }
            self.transmit_byte(byte);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::sim::{Access, SimSci};
    use super::*;
    use core::fmt::Write;

    fn ready(sim: &SimSci) -> Sci<&SimSci, Ready> {
        let mut sci = Sci::new(sim);
        sci.init_fifo();
        let sci = sci.configure(LineFormat::ECHO, ClockProfile::Cpu150Mhz);
        sim.clear_accesses();
        sci
    }

    #[test]
    fn test_fifo_init_values() {
        let sim = SimSci::new();
        let mut sci = Sci::new(&sim);
        sci.init_fifo();
        assert_eq!(
            sim.accesses(),
            [
                Access::Write(Reg::FfTx, 0xE040),
                Access::Write(Reg::FfRx, 0x204F),
                Access::Write(Reg::FfCt, 0x0000),
            ]
        );
    }

    #[test]
    fn test_configure_sequence() {
        let sim = SimSci::new();
        let _sci = Sci::new(&sim).configure(LineFormat::ECHO, ClockProfile::Cpu100Mhz);

        let writes: Vec<_> = sim
            .accesses()
            .into_iter()
            .filter_map(|a| match a {
                Access::Write(reg, value) => Some((reg, value)),
                Access::Read(_) => None,
            })
            .collect();
        assert_eq!(
            writes,
            [
                (Reg::Ccr, 0x0007),
                (Reg::Ctl1, 0x0003),
                (Reg::Ctl2, 0x0003),
                (Reg::Ctl2, 0x0003),
                (Reg::Ctl2, 0x0003),
                (Reg::HBaud, 0x0001),
                (Reg::LBaud, 0x0044),
                (Reg::Ctl1, 0x0023),
            ]
        );
    }

    #[test]
    fn test_release_is_last_write() {
        let sim = SimSci::new();
        let _sci = Sci::new(&sim).configure(LineFormat::ECHO, ClockProfile::Cpu150Mhz);

        let accesses = sim.accesses();
        let release = accesses
            .iter()
            .position(|a| matches!(a, Access::Write(Reg::Ctl1, v) if v & Ctl1::SWRESET.bits() != 0))
            .unwrap();
        assert_eq!(release, accesses.len() - 1);
        assert_eq!(sim.register(Reg::LBaud), 0x0027);
    }

    #[test]
    fn test_transmit_str_stops_at_terminator() {
        let sim = SimSci::new();
        let mut sci = ready(&sim);
        sci.transmit_str(b"AB\0");
        assert_eq!(sim.transmitted(), b"AB");

        let tx_writes = sim
            .accesses()
            .iter()
            .filter(|a| matches!(a, Access::Write(Reg::TxBuf, _)))
            .count();
        assert_eq!(tx_writes, 2);
    }

    #[test]
    fn test_transmit_str_ignores_bytes_after_terminator() {
        let sim = SimSci::new();
        let mut sci = ready(&sim);
        sci.transmit_str(b"ok\0hidden");
        sci.transmit_str(b"");
        sci.transmit_str(b"\0");
        sci.transmit_str(b"!");
        assert_eq!(sim.transmitted(), b"ok!");
    }

    #[test]
    fn test_transmit_byte_waits_for_fifo() {
        let sim = SimSci::new();
        let mut sci = ready(&sim);
        sim.hold_tx_busy(3);
        sci.transmit_byte(b'Z');

        assert_eq!(
            sim.accesses(),
            [
                Access::Read(Reg::FfTx),
                Access::Read(Reg::FfTx),
                Access::Read(Reg::FfTx),
                Access::Read(Reg::FfTx),
                Access::Write(Reg::TxBuf, u16::from(b'Z')),
            ]
        );
    }

    #[test]
    fn test_transmit_byte_immediate_when_empty() {
        let sim = SimSci::new();
        let mut sci = ready(&sim);
        sci.transmit_byte(0xA5);
        assert_eq!(
            sim.accesses(),
            [Access::Read(Reg::FfTx), Access::Write(Reg::TxBuf, 0x00A5)]
        );
    }

    #[test]
    fn test_byte_ready_is_idempotent() {
        let sim = SimSci::new();
        let sci = ready(&sim);
        assert!(!sci.byte_ready());

        sim.receive(b"q");
        for _ in 0..5 {
            assert!(sci.byte_ready());
        }
        assert_eq!(sim.pending_rx(), 1);
        assert!(sim.accesses().iter().all(|a| *a == Access::Read(Reg::FfRx)));
        assert!(sim.transmitted().is_empty());
    }

    #[test]
    fn test_receive_byte_pops_fifo() {
        let sim = SimSci::new();
        let mut sci = ready(&sim);
        sim.receive(&[0x00, 0xFF]);
        assert_eq!(sci.receive_byte(), 0x00);
        assert!(sci.byte_ready());
        assert_eq!(sci.receive_byte(), 0xFF);
        assert!(!sci.byte_ready());
    }

    #[test]
    fn test_fmt_write_expands_newline() {
        let sim = SimSci::new();
        let mut sci = ready(&sim);
        write!(sci, "n={}\n", 7).unwrap();
        assert_eq!(sim.transmitted(), b"n=7\r\n");
    }
}
