//! Simulated SCI register block for host tests
//!
//! Records every register access in order, models the FIFO status fields,
//! and lets a test queue received bytes or hold the transmit FIFO busy for a
//! number of status polls.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::vec::Vec;

use super::regs::{FfRx, FfTx, Reg, SciRegisters, FIFO_LEVEL_SHIFT, REG_COUNT};

/// One observed register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(Reg),
    Write(Reg, u16),
}

impl Access {
    pub fn reg(self) -> Reg {
        match self {
            Access::Read(reg) | Access::Write(reg, _) => reg,
        }
    }
}

#[derive(Debug, Default)]
pub struct SimSci {
    regs: RefCell<[u16; REG_COUNT]>,
    accesses: RefCell<Vec<Access>>,
    rx: RefCell<VecDeque<u8>>,
    tx: RefCell<Vec<u8>>,
    tx_busy_polls: Cell<usize>,
}

impl SimSci {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes as if they arrived on the wire.
    pub fn receive(&self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes.iter().copied());
    }

    /// Report a non-empty transmit FIFO for the next `polls` SCIFFTX reads.
    pub fn hold_tx_busy(&self, polls: usize) {
        self.tx_busy_polls.set(polls);
    }

    /// Bytes written to SCITXBUF so far.
    pub fn transmitted(&self) -> Vec<u8> {
        self.tx.borrow().clone()
    }

    pub fn clear_transmitted(&self) {
        self.tx.borrow_mut().clear();
    }

    pub fn accesses(&self) -> Vec<Access> {
        self.accesses.borrow().clone()
    }

    pub fn clear_accesses(&self) {
        self.accesses.borrow_mut().clear();
    }

    /// Last value written to a control register.
    pub fn register(&self, reg: Reg) -> u16 {
        self.regs.borrow()[reg.offset()]
    }

    pub fn pending_rx(&self) -> usize {
        self.rx.borrow().len()
    }

    fn level_bits(level: usize) -> u16 {
        (level.min(0x1F) as u16) << FIFO_LEVEL_SHIFT
    }
}

impl SciRegisters for SimSci {
    fn read(&self, reg: Reg) -> u16 {
        self.accesses.borrow_mut().push(Access::Read(reg));
        let stored = self.regs.borrow()[reg.offset()];
        match reg {
            Reg::FfTx => {
                let busy = self.tx_busy_polls.get();
                let level = if busy > 0 {
                    self.tx_busy_polls.set(busy - 1);
                    1
                } else {
                    0
                };
                (stored & !FfTx::TXFFST.bits()) | Self::level_bits(level)
            }
            Reg::FfRx => (stored & !FfRx::RXFFST.bits()) | Self::level_bits(self.rx.borrow().len()),
            Reg::RxBuf => self.rx.borrow_mut().pop_front().map_or(0, u16::from),
            _ => stored,
        }
    }

    fn write(&self, reg: Reg, value: u16) {
        self.accesses.borrow_mut().push(Access::Write(reg, value));
        match reg {
            Reg::TxBuf => self.tx.borrow_mut().push(value as u8),
            Reg::RxBuf => {}
            _ => self.regs.borrow_mut()[reg.offset()] = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reflects_queues() {
        let sim = SimSci::new();
        assert_eq!(FfRx::from_bits_retain(sim.read(Reg::FfRx)).level(), 0);
        sim.receive(b"xy");
        assert_eq!(FfRx::from_bits_retain(sim.read(Reg::FfRx)).level(), 2);
        assert_eq!(sim.read(Reg::RxBuf), u16::from(b'x'));
        assert_eq!(sim.pending_rx(), 1);

        sim.hold_tx_busy(1);
        assert_eq!(FfTx::from_bits_retain(sim.read(Reg::FfTx)).level(), 1);
        assert_eq!(FfTx::from_bits_retain(sim.read(Reg::FfTx)).level(), 0);
    }
}
