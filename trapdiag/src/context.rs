use core::fmt;

numeric_enum_macro::numeric_enum! {
    #[repr(usize)]
    #[derive(Debug, Eq, PartialEq, Copy, Clone)]
    /// Architectural register, in snapshot order.
    pub enum Reg {
        R0 = 0,
        R1 = 1,
        R2 = 2,
        R3 = 3,
        R4 = 4,
        R5 = 5,
        R6 = 6,
        R7 = 7,
        R8 = 8,
        R9 = 9,
        R10 = 10,
        R11 = 11,
        R12 = 12,
        Sp = 13,
        Lr = 14,
        Pc = 15,
    }
}

pub const NUM_REGS: usize = 16;

impl Reg {
    pub const ALL: [Reg; NUM_REGS] = [
        Reg::R0,
        Reg::R1,
        Reg::R2,
        Reg::R3,
        Reg::R4,
        Reg::R5,
        Reg::R6,
        Reg::R7,
        Reg::R8,
        Reg::R9,
        Reg::R10,
        Reg::R11,
        Reg::R12,
        Reg::Sp,
        Reg::Lr,
        Reg::Pc,
    ];

    /// Three-character, left-justified name used in register dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Reg::R0 => "r0 ",
            Reg::R1 => "r1 ",
            Reg::R2 => "r2 ",
            Reg::R3 => "r3 ",
            Reg::R4 => "r4 ",
            Reg::R5 => "r5 ",
            Reg::R6 => "r6 ",
            Reg::R7 => "r7 ",
            Reg::R8 => "r8 ",
            Reg::R9 => "r9 ",
            Reg::R10 => "r10",
            Reg::R11 => "r11",
            Reg::R12 => "r12",
            Reg::Sp => "sp ",
            Reg::Lr => "lr ",
            Reg::Pc => "pc ",
        }
    }
}

/// Registers saved when a trap occurs.
///
/// Laid out exactly as the vector stubs push them: r0..r12, then the
/// interrupted sp, lr and the faulting pc.
#[repr(C)]
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSnapshot {
    r: [u32; NUM_REGS],
}

impl RegisterSnapshot {
    pub const fn new(r: [u32; NUM_REGS]) -> Self {
        Self { r }
    }

    pub const fn zeroed() -> Self {
        Self { r: [0; NUM_REGS] }
    }

    pub fn with(mut self, reg: Reg, value: u32) -> Self {
        self.r[reg as usize] = value;
        self
    }

    pub const fn get(&self, reg: Reg) -> u32 {
        self.r[reg as usize]
    }

    pub const fn sp(&self) -> u32 {
        self.get(Reg::Sp)
    }

    pub const fn lr(&self) -> u32 {
        self.get(Reg::Lr)
    }

    pub const fn pc(&self) -> u32 {
        self.get(Reg::Pc)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Reg, u32)> + '_ {
        Reg::ALL.into_iter().map(move |reg| (reg, self.get(reg)))
    }
}

impl fmt::Debug for RegisterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (reg, value) in self.iter() {
            map.entry(&reg.name().trim_end(), &format_args!("{:#010x}", value));
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_three_chars_wide() {
        for reg in Reg::ALL {
            assert_eq!(reg.name().len(), 3, "{:?}", reg);
        }
        assert_eq!(Reg::R10.name(), "r10");
        assert_eq!(Reg::Pc.name(), "pc ");
    }

    #[test]
    fn all_matches_discriminants() {
        for (i, reg) in Reg::ALL.iter().enumerate() {
            assert_eq!(*reg as usize, i);
            assert_eq!(Reg::try_from(i), Ok(*reg));
        }
        assert!(Reg::try_from(NUM_REGS).is_err());
    }

    #[test]
    fn accessors_read_named_slots() {
        let regs = RegisterSnapshot::zeroed()
            .with(Reg::Sp, 0x8000)
            .with(Reg::Lr, 0x1004)
            .with(Reg::Pc, 0x1234);

        assert_eq!(regs.sp(), 0x8000);
        assert_eq!(regs.lr(), 0x1004);
        assert_eq!(regs.pc(), 0x1234);
        assert_eq!(regs.get(Reg::Pc), 0x1234);
        assert_eq!(regs.get(Reg::R0), 0);
    }

    #[test]
    fn iter_follows_dump_order() {
        let mut raw = [0u32; NUM_REGS];
        for (i, slot) in raw.iter_mut().enumerate() {
            *slot = i as u32 * 4;
        }
        let regs = RegisterSnapshot::new(raw);

        let seen: Vec<_> = regs.iter().collect();
        assert_eq!(seen.len(), NUM_REGS);
        assert_eq!(seen[0], (Reg::R0, 0));
        assert_eq!(seen[13], (Reg::Sp, 52));
        assert_eq!(seen[15], (Reg::Pc, 60));
    }

    #[test]
    fn snapshot_is_sixteen_words() {
        assert_eq!(core::mem::size_of::<RegisterSnapshot>(), NUM_REGS * 4);
    }
}
