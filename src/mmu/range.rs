//! Inclusive address intervals used to describe ownership of bus address space.

/// A closed interval `[from, to]` over the 16-bit address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressRange {
    pub from: u16,
    pub to: u16,
}

impl AddressRange {
    pub const fn new(from: u16, to: u16) -> Self {
        Self { from, to }
    }

    /// True when `addr` falls inside the interval, both ends inclusive.
    pub fn contains(&self, addr: u16) -> bool {
        addr >= self.from && addr <= self.to
    }

    /// Number of addresses covered. Widened to `u32` so a range ending at
    /// 0xFFFF reports its true size instead of wrapping.
    pub fn extent(&self) -> u32 {
        u32::from(self.to) - u32::from(self.from) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::AddressRange;

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = AddressRange::new(0x2000, 0x2007);

        assert!(range.contains(0x2000));
        assert!(range.contains(0x2003));
        assert!(range.contains(0x2007));
        assert!(!range.contains(0x1FFF));
        assert!(!range.contains(0x2008));
    }

    #[test]
    fn extent_counts_both_ends() {
        assert_eq!(AddressRange::new(0, 50).extent(), 51);
        assert_eq!(AddressRange::new(0x8000, 0x8000).extent(), 1);
    }

    #[test]
    fn extent_does_not_overflow_at_the_top_of_the_address_space() {
        assert_eq!(AddressRange::new(0x0000, 0xFFFF).extent(), 0x1_0000);
        assert_eq!(AddressRange::new(0x8000, 0xFFFF).extent(), 0x8000);
    }
}
