//! On-target entry point
//!
//! Brings up the device, runs the SCI-C echo loop forever. With `log-scia`,
//! diagnostics from the `log` facade go out on SCI-A so the echo text on
//! SCI-C stays exactly as the host expects it.

#![no_std]
#![no_main]
#![deny(unsafe_op_in_unsafe_fn)]

use core::panic::PanicInfo;

use sci_echo::drivers::sysctrl::DeviceSupport;
use sci_echo::echo::{EchoLoop, ECHO_PORT};
use sci_echo::Mmio;

#[cfg(feature = "log-scia")]
mod diagnostics {
    use log::LevelFilter;

    use sci_echo::drivers::sysctrl::PinMux;
    use sci_echo::logger::{self, SinkLogger};
    use sci_echo::{ClockProfile, LineFormat, Mmio, Ready, Sci, SciPort};

    static LOGGER: SinkLogger<Sci<Mmio, Ready>> = SinkLogger::new(LevelFilter::Debug);

    /// Configure SCI-A and route `log` output to it.
    ///
    /// Must run after the system clocks are up.
    pub fn attach(pins: &mut impl PinMux) {
        pins.bind_uart_pins(SciPort::A);
        // SAFETY: SCI-A is used by nothing else in this image
        let mut sci = Sci::new(unsafe { Mmio::new(SciPort::A) });
        sci.init_fifo();
        LOGGER.attach(sci.configure(LineFormat::ECHO, ClockProfile::SELECTED));
        if logger::install(&LOGGER).is_err() {
            // Already installed; keep the existing backend.
            LOGGER.detach();
        }
    }
}

/// Entry point called by the C runtime after `_c_int00`.
#[no_mangle]
pub extern "C" fn main() -> ! {
    // SAFETY: the image links the device-support library and this is the
    // only instance.
    let mut platform = unsafe { DeviceSupport::new() };
    // SAFETY: SCI-C is owned by the echo loop alone.
    let regs = unsafe { Mmio::new(ECHO_PORT) };

    let echo = EchoLoop::init(&mut platform, ECHO_PORT, regs);

    #[cfg(feature = "log-scia")]
    diagnostics::attach(&mut platform);

    echo.run()
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    log::error!("panic: {}", info);
    loop {
        core::hint::spin_loop();
    }
}
