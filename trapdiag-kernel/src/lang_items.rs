use core::panic::PanicInfo;

use log::error;

use crate::arch::Wfe;
use crate::uart::Pl011;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    error!("kernel panic: {:?}", info);
    trapdiag::panic::panic(&mut Pl011::new(), &mut Wfe)
}
