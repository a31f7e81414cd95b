//! System control and pin mux collaborators
//!
//! Clock-tree bring-up, the PIE vector table and GPIO muxing are owned by the
//! device-support library, not by this crate. The echo program only needs to
//! call them once, in order, before touching the SCI, so they are modelled as
//! two small traits. On target, [`DeviceSupport`] forwards to the vendor
//! routines; tests substitute a recorder.

use super::sci::port::SciPort;

/// PLL, watchdog, peripheral clocks and interrupt table.
pub trait SystemControl {
    /// Bring up the PLL, disable the watchdog and enable peripheral clocks.
    fn init_system_clocks(&mut self);

    /// Put the PIE in its default state and fill the vector table with the
    /// default handlers.
    fn init_interrupt_vector_table(&mut self);
}

/// GPIO multiplexing.
pub trait PinMux {
    /// Route the RX/TX pins of `port` to the SCI function.
    fn bind_uart_pins(&mut self, port: SciPort);
}

#[cfg(feature = "dsp2833x")]
pub use self::device::DeviceSupport;

#[cfg(feature = "dsp2833x")]
mod device {
    use log::debug;

    use super::{PinMux, SciPort, SystemControl};

    extern "C" {
        fn InitSysCtrl();
        fn InitPieCtrl();
        fn InitPieVectTable();
        fn InitSciaGpio();
        fn InitScibGpio();
        fn InitScicGpio();
    }

    /// Vendor device-support library binding.
    ///
    /// CPU interrupts are left as the reset state leaves them (INTM set);
    /// nothing in this crate enables them.
    #[derive(Debug)]
    pub struct DeviceSupport {
        _private: (),
    }

    impl DeviceSupport {
        /// # Safety
        /// - The device-support library must be linked into the image
        /// - Only one instance may exist; its routines reprogram global state
        pub unsafe fn new() -> Self {
            Self { _private: () }
        }
    }

    impl SystemControl for DeviceSupport {
        fn init_system_clocks(&mut self) {
            // SAFETY: linked per `new`; runs once before any peripheral use
            unsafe { InitSysCtrl() };
            debug!("sysctrl: clocks up");
        }

        fn init_interrupt_vector_table(&mut self) {
            // SAFETY: linked per `new`; CPU interrupts are masked from reset
            unsafe {
                InitPieCtrl();
                InitPieVectTable();
            }
            debug!("sysctrl: pie vector table loaded");
        }
    }

    impl PinMux for DeviceSupport {
        fn bind_uart_pins(&mut self, port: SciPort) {
            // SAFETY: linked per `new`; only writes the GPIO mux of `port`
            unsafe {
                match port {
                    SciPort::A => InitSciaGpio(),
                    SciPort::B => InitScibGpio(),
                    SciPort::C => InitScicGpio(),
                }
            }
            debug!(
                "pinmux: sci-{:?} on gpio{}/gpio{}",
                port,
                port.rx_gpio(),
                port.tx_gpio()
            );
        }
    }
}
