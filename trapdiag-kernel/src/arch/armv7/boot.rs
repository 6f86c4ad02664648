use core::arch::naked_asm;
use core::ptr::slice_from_raw_parts_mut;

use crate::kernel_main;

const MODE_MASK: u32 = 0x1f;
const MODE_HYP: u32 = 0x1a;
const MODE_SVC_MASKED: u32 = 0xd3; // SVC, IRQ and FIQ masked

#[unsafe(naked)]
#[unsafe(no_mangle)]
#[unsafe(link_section = ".text.boot")]
/// The entry point of the kernel.
pub unsafe extern "C" fn _start() -> ! {
    naked_asm!(
        ".arch_extension virt",
        // Secondary cores park.
        "mrc      p15, 0, r0, c0, c0, 5",
        "ands     r0, r0, #3",
        "bne      3f",
        // The firmware may start us in HYP; drop to SVC.
        "mrs      r0, cpsr",
        "and      r1, r0, #{mode_mask}",
        "cmp      r1, #{mode_hyp}",
        "bne      1f",
        "bic      r0, r0, #{mode_mask}",
        "orr      r0, r0, #{mode_svc}",
        "msr      spsr_hyp, r0",
        "adr      lr, 2f",
        "msr      elr_hyp, lr",
        "eret",
        "1:",
        "cpsid    if, #{mode_svc_bits}",
        "2:",
        "ldr      sp, =_stack_top",
        "bl       {clean_bss}",
        "bl       {entry}",
        "3:",
        "wfe",
        "b        3b",
        mode_mask = const MODE_MASK,
        mode_hyp = const MODE_HYP,
        mode_svc = const MODE_SVC_MASKED,
        mode_svc_bits = const MODE_SVC_MASKED & MODE_MASK,
        clean_bss = sym clean_bss,
        entry = sym kernel_main,
    )
}

extern "C" {
    fn _sbss();
    fn _ebss();
}

extern "C" fn clean_bss() {
    let start = _sbss as *const u8 as usize;
    let end = _ebss as *const u8 as usize;
    let bss = unsafe { &mut *slice_from_raw_parts_mut(start as *mut u8, end - start) };
    bss.fill(0);
}
