//! Status LED blinker task
//!
//! A leaf task with no inputs and no failure modes: toggle a digital output
//! at a fixed rate, forever. Runs concurrently with and independently of any
//! console session.

use core::time::Duration;

use crate::gpio::OutputPin;
use crate::kernel::Kernel;

/// Time spent in each half of the blink cycle.
pub const BLINK_HALF_PERIOD: Duration = Duration::from_millis(50);

/// Periodic LED blinker.
pub struct Blinker<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> Blinker<P> {
    /// Create a blinker driving `pin`.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// One full blink cycle: clear, sleep a half period, set, sleep again.
    pub fn cycle<K: Kernel>(&mut self, kernel: &K) {
        self.pin.clear();
        kernel.sleep(BLINK_HALF_PERIOD);
        self.pin.set();
        kernel.sleep(BLINK_HALF_PERIOD);
    }

    /// Blink forever. Terminates only at system reset.
    pub fn run<K: Kernel>(mut self, kernel: &K) -> ! {
        loop {
            self.cycle(kernel);
        }
    }
}
