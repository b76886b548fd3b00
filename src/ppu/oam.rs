//! OAM sprite descriptors: 64 sprites × 4 bytes.

/// View over one 4-byte OAM entry: Y, tile id, attributes, X.
#[derive(Clone, Copy, Debug)]
pub struct OamEntry {
    pub y: u8,
    pub tile_id: u8,
    pub attributes: u8,
    pub x: u8,
}

impl OamEntry {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            y: bytes[0],
            tile_id: bytes[1],
            attributes: bytes[2],
            x: bytes[3],
        }
    }

    /// Sprite palette selector (0–3).
    pub fn palette_id(&self) -> u8 {
        self.attributes & 0b11
    }

    /// Priority bit: set = sprite renders behind the background.
    pub fn behind_background(&self) -> bool {
        self.attributes & (1 << 5) != 0
    }

    pub fn flip_horizontal(&self) -> bool {
        self.attributes & (1 << 6) != 0
    }

    pub fn flip_vertical(&self) -> bool {
        self.attributes & (1 << 7) != 0
    }

    /// Screen position of tile pixel (px, py) with flips applied.
    pub fn position(&self, px: usize, py: usize) -> (usize, usize) {
        let x = self.x as usize + if self.flip_horizontal() { 7 - px } else { px };
        let y = self.y as usize + if self.flip_vertical() { 7 - py } else { py };
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::OamEntry;

    #[test]
    fn decodes_attribute_bits() {
        let entry = OamEntry::from_bytes(&[0x10, 0x05, 0b1110_0010, 0x20]);

        assert_eq!(entry.palette_id(), 2);
        assert!(entry.behind_background());
        assert!(entry.flip_horizontal());
        assert!(entry.flip_vertical());
    }

    #[test]
    fn position_applies_flips() {
        let plain = OamEntry::from_bytes(&[10, 0, 0, 20]);
        assert_eq!(plain.position(1, 2), (21, 12));

        let flipped = OamEntry::from_bytes(&[10, 0, 0b1100_0000, 20]);
        assert_eq!(flipped.position(1, 2), (26, 15));
    }
}
