//! Frame palettes and the fixed 2C02 system color table.

/// NES 2C02 64-color system palette (0xAARRGGBB). Index 0 = backdrop grey.
pub const SYSTEM_PALETTE: [u32; 64] = [
    0xFF808080, 0xFF003DA6, 0xFF0012B0, 0xFF440096, 0xFFA1005E, 0xFFC70028, 0xFFBA0600, 0xFF8C1700,
    0xFF5C2F00, 0xFF104500, 0xFF054A00, 0xFF00472E, 0xFF004166, 0xFF000000, 0xFF050505, 0xFF050505,
    0xFFC7C7C7, 0xFF0077FF, 0xFF2155FF, 0xFF8237FA, 0xFFEB2FB5, 0xFFFF2950, 0xFFFF2200, 0xFFD63200,
    0xFFC46200, 0xFF358000, 0xFF058F00, 0xFF008A55, 0xFF0099CC, 0xFF212121, 0xFF090909, 0xFF090909,
    0xFFFFFFFF, 0xFF0FD7FF, 0xFF69A2FF, 0xFFD480FF, 0xFFFF45F3, 0xFFFF618B, 0xFFFF8833, 0xFFFF9C12,
    0xFFFABC20, 0xFF9FE30E, 0xFF2BF035, 0xFF0CF0A4, 0xFF05FBFF, 0xFF5E5E5E, 0xFF0D0D0D, 0xFF0D0D0D,
    0xFFFFFFFF, 0xFFA6FCFF, 0xFFB3ECFF, 0xFFDAABEB, 0xFFFFA8F9, 0xFFFFABB3, 0xFFFFD2B0, 0xFFFFEFA6,
    0xFFFFF79C, 0xFFD7E895, 0xFFA6EDAF, 0xFFA2F2DA, 0xFF99FFFC, 0xFFDDDDDD, 0xFF111111, 0xFF111111,
];

/// One resolved 4-color palette: indices into [`SYSTEM_PALETTE`]. Entry 0 is
/// the shared backdrop color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette(pub [u8; 4]);

impl Palette {
    /// The ARGB color for a 2-bit tile color id.
    pub fn color(&self, color_id: u8) -> u32 {
        SYSTEM_PALETTE[(self.0[color_id as usize] & 0x3F) as usize]
    }
}
