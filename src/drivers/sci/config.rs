//! Line format and baud divisor selection
//!
//! The baud divisor is not computed at runtime. Each supported core clock
//! profile carries a precomputed (high, low) pair, and the profile in use is
//! fixed at build time by the `cpu-150mhz` / `cpu-100mhz` features.

use super::regs::Ccr;

#[cfg(all(feature = "cpu-150mhz", feature = "cpu-100mhz"))]
compile_error!("features `cpu-150mhz` and `cpu-100mhz` are mutually exclusive");

#[cfg(not(any(feature = "cpu-150mhz", feature = "cpu-100mhz")))]
compile_error!("select a core clock profile: enable `cpu-150mhz` or `cpu-100mhz`");

/// SCICCR image describing the character frame.
///
/// Kept as a single register word rather than itemized fields so that it
/// maps one-to-one onto the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormat(Ccr);

impl LineFormat {
    /// 8 data bits, 1 stop bit, no parity, idle-line mode, loopback off.
    pub const ECHO: Self = Self(Ccr::SCICHAR);

    /// Wrap a raw SCICCR word. Unknown bits are kept.
    pub const fn from_word(word: u16) -> Self {
        Self(Ccr::from_bits_retain(word))
    }

    /// Register word written to SCICCR.
    pub const fn word(self) -> u16 {
        self.0.bits()
    }

    pub const fn data_bits(self) -> u8 {
        (self.0.bits() & Ccr::SCICHAR.bits()) as u8 + 1
    }

    pub const fn stop_bits(self) -> u8 {
        if self.0.contains(Ccr::STOPBITS) {
            2
        } else {
            1
        }
    }

    pub const fn parity_enabled(self) -> bool {
        self.0.contains(Ccr::PARITYENA)
    }

    pub const fn loopback(self) -> bool {
        self.0.contains(Ccr::LOOPBKENA)
    }

    pub const fn idle_line_mode(self) -> bool {
        !self.0.contains(Ccr::ADDRIDLE_MODE)
    }
}

impl Default for LineFormat {
    fn default() -> Self {
        Self::ECHO
    }
}

/// Baud divisor as written to SCIHBAUD / SCILBAUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaudDivisor {
    pub high: u16,
    pub low: u16,
}

impl BaudDivisor {
    /// Combined 16-bit BRR value.
    pub const fn value(self) -> u16 {
        (self.high << 8) | (self.low & 0xFF)
    }
}

/// Supported core clock configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockProfile {
    /// SYSCLKOUT 150 MHz, LSPCLK 37.5 MHz.
    Cpu150Mhz,
    /// SYSCLKOUT 100 MHz, LSPCLK 25 MHz.
    Cpu100Mhz,
}

impl ClockProfile {
    /// Profile compiled into this build.
    #[cfg(feature = "cpu-150mhz")]
    pub const SELECTED: Self = Self::Cpu150Mhz;
    /// Profile compiled into this build.
    #[cfg(all(feature = "cpu-100mhz", not(feature = "cpu-150mhz")))]
    pub const SELECTED: Self = Self::Cpu100Mhz;

    /// Precomputed divisor for this profile.
    ///
    /// These are carried over as opaque constants. The effective rate has not
    /// been validated on hardware for either profile.
    pub const fn divisor(self) -> BaudDivisor {
        match self {
            ClockProfile::Cpu150Mhz => BaudDivisor {
                high: 0x0000,
                low: 0x0027,
            },
            ClockProfile::Cpu100Mhz => BaudDivisor {
                high: 0x0001,
                low: 0x0044,
            },
        }
    }
}
