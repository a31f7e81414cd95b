//! SCI echo-back application
//!
//! Prints a greeting, then forever prompts for a character, waits for it and
//! sends it back with an acknowledgement prefix.
//!
//! # States
//! ```text
//! init ──> Greeting ──> AwaitByte ──> EchoAck ─┐
//!                          ^───────────────────┘
//! ```
//! `init` is the constructor: an `EchoLoop` cannot exist before the platform
//! and the SCI are fully set up. There is no terminal state.

use log::{info, trace};

use crate::drivers::sci::config::{ClockProfile, LineFormat};
use crate::drivers::sci::port::SciPort;
use crate::drivers::sci::regs::SciRegisters;
use crate::drivers::sci::{Ready, Sci};
use crate::drivers::sysctrl::{PinMux, SystemControl};

/// SCI module the echo runs on.
pub const ECHO_PORT: SciPort = SciPort::C;

/// First greeting line.
pub const GREETING: &[u8] = b"\r\n\n\nHello World!\0";
/// Second greeting line.
pub const INTRO: &[u8] = b"\r\nYou will enter a character, and the DSP will echo it back! \n\0";
/// Sent before every wait for input.
pub const PROMPT: &[u8] = b"\r\nEnter a character: \0";
/// Sent before the echoed byte.
pub const ACK_PREFIX: &[u8] = b"  You sent: \0";

/// Counters watched from the debugger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EchoSession {
    loop_count: u16,
    error_count: u16,
}

impl EchoSession {
    pub const fn new() -> Self {
        Self {
            loop_count: 0,
            error_count: 0,
        }
    }

    /// Bytes echoed so far. Wraps at 16 bits.
    pub const fn loop_count(&self) -> u16 {
        self.loop_count
    }

    /// Reserved for a receive-error path. Never incremented.
    pub const fn error_count(&self) -> u16 {
        self.error_count
    }

    fn record_echo(&mut self) {
        self.loop_count = self.loop_count.wrapping_add(1);
    }
}

/// Next step the loop will take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoState {
    Greeting,
    AwaitByte,
    EchoAck { byte: u8 },
}

pub struct EchoLoop<R> {
    sci: Sci<R, Ready>,
    session: EchoSession,
    state: EchoState,
}

impl<R: SciRegisters> EchoLoop<R> {
    /// Bring up the platform and the SCI bound to `regs`.
    ///
    /// Order: system clocks, pin mux, interrupt table, FIFO, line format and
    /// release. `regs` is not touched before the pins are bound.
    pub fn init<P>(platform: &mut P, port: SciPort, regs: R) -> Self
    where
        P: SystemControl + PinMux,
    {
        platform.init_system_clocks();
        platform.bind_uart_pins(port);
        platform.init_interrupt_vector_table();

        let mut sci = Sci::new(regs);
        sci.init_fifo();
        let sci = sci.configure(LineFormat::ECHO, ClockProfile::SELECTED);

        Self::new(sci)
    }

    /// Start from an already configured SCI, with zeroed counters.
    pub fn new(sci: Sci<R, Ready>) -> Self {
        Self {
            sci,
            session: EchoSession::new(),
            state: EchoState::Greeting,
        }
    }

    pub fn session(&self) -> &EchoSession {
        &self.session
    }

    pub fn state(&self) -> EchoState {
        self.state
    }

    pub fn sci(&self) -> &Sci<R, Ready> {
        &self.sci
    }

    /// Run one state and return the next one.
    ///
    /// `AwaitByte` spins without bound until a byte arrives.
    pub fn step(&mut self) -> EchoState {
        self.state = match self.state {
            EchoState::Greeting => {
                self.sci.transmit_str(GREETING);
                self.sci.transmit_str(INTRO);
                info!("echo: greeting sent");
                EchoState::AwaitByte
            }
            EchoState::AwaitByte => {
                self.sci.transmit_str(PROMPT);
                while !self.sci.byte_ready() {
                    core::hint::spin_loop();
                }
                EchoState::EchoAck {
                    byte: self.sci.receive_byte(),
                }
            }
            EchoState::EchoAck { byte } => {
                self.sci.transmit_str(ACK_PREFIX);
                self.sci.transmit_byte(byte);
                self.session.record_echo();
                trace!("echo: {:#04x} (#{})", byte, self.session.loop_count());
                EchoState::AwaitByte
            }
        };
        self.state
    }

    /// Run forever.
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }
}
