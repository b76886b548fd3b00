//! NES PPU: register state machine, scanline timing, and whole-frame rendering.
//!
//! Registers $2000–$2007 (mirrored through $3FFF on the CPU bus). Timing is
//! dot-counted: 341 dots per scanline, 262 scanlines per frame, vblank at
//! scanline 241. The frame is rendered in one pass at the pre-render scanline
//! and handed to the draw callback; mid-frame raster effects are out of scope.

use log::warn;

use crate::cartridge::cartridge::Cartridge;
use crate::cartridge::mapper::Mirroring;
use crate::ppu::oam::OamEntry;
use crate::ppu::palette::Palette;
use crate::ppu::registers::{Control, Mask, Status};
use crate::ppu::tile::Tile;

pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 240;

const DOTS_PER_SCANLINE: usize = 341;
const VBLANK_SCANLINE: usize = 241;
const FINAL_SCANLINE: usize = 262;

/// First sprite palette entry in palette RAM ($3F11).
const SPRITE_PALETTE_OFFSET: usize = 0x11;

/// Receives each finished 256×240 frame (0xAARRGGBB, row-major).
pub type DrawCallback = Box<dyn FnMut(&[u32]) + Send>;

/// PPU state: VRAM, OAM, palette RAM, registers, latches, and the dot/scanline
/// counters.
pub struct Ppu {
    /// 2 KiB of physical nametable RAM; the 4 logical tables fold onto it per
    /// the cartridge mirroring mode.
    pub nametables: [u8; 2048],
    /// Palette RAM $3F00–$3F1F.
    pub palettes: [u8; 32],
    /// 64 sprites × 4 bytes, written via $2003/$2004 or OAM DMA.
    pub oam: [u8; 256],
    pub control: Control,
    pub mask: Mask,
    pub status: Status,
    oam_addr: u8,
    addr: u16,
    /// $2006 latch: true = the next write supplies the high byte.
    addr_latch_high: bool,
    scroll_x: u8,
    scroll_y: u8,
    /// $2005 latch: true = the next write supplies the Y byte.
    scroll_latch_y: bool,
    /// One-behind buffer for $2007 reads of CHR/nametable space.
    read_buffer: u8,
    cycles: usize,
    scanline: usize,
    nmi_pending: bool,
    pub framebuffer: Vec<u32>,
    draw_callback: DrawCallback,
}

impl Ppu {
    pub fn new(draw_callback: DrawCallback) -> Self {
        Self {
            nametables: [0; 2048],
            palettes: [0; 32],
            oam: [0; 256],
            control: Control::empty(),
            mask: Mask::empty(),
            status: Status::empty(),
            oam_addr: 0,
            addr: 0,
            addr_latch_high: true,
            scroll_x: 0,
            scroll_y: 0,
            scroll_latch_y: false,
            read_buffer: 0,
            cycles: 0,
            scanline: 0,
            nmi_pending: false,
            framebuffer: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            draw_callback,
        }
    }

    /// Take the pending NMI signal; consuming it clears it.
    pub fn nmi_status(&mut self) -> bool {
        let pending = self.nmi_pending;
        self.nmi_pending = false;
        pending
    }

    /// Advance by `cpu_cycles` CPU cycles (3 dots each).
    pub fn tick(&mut self, cpu_cycles: usize, cart: &Cartridge) {
        self.cycles += 3 * cpu_cycles;

        while self.cycles >= DOTS_PER_SCANLINE {
            self.cycles -= DOTS_PER_SCANLINE;
            self.scanline += 1;

            if self.scanline == VBLANK_SCANLINE {
                self.enter_vblank();
            } else if self.scanline == FINAL_SCANLINE {
                self.finish_frame(cart);
            }
        }
    }

    fn enter_vblank(&mut self) {
        self.status.insert(Status::VBLANK);
        self.status.remove(Status::SPRITE_ZERO_HIT);
        if self.control.contains(Control::GENERATE_VBLANK_NMI) {
            self.nmi_pending = true;
        }
    }

    fn finish_frame(&mut self, cart: &Cartridge) {
        self.scanline = 0;
        self.nmi_pending = false;
        self.status.remove(Status::VBLANK | Status::SPRITE_ZERO_HIT);

        self.render_frame(cart);
        (self.draw_callback)(&self.framebuffer);
    }

    /// Handle a CPU read of $2000–$2007.
    pub fn register_read(&mut self, addr: u16, cart: &Cartridge) -> u8 {
        match addr {
            0x2002 => self.read_status(),
            0x2004 => self.read_oam_data(),
            0x2007 => self.read_data(cart),
            _ => {
                warn!("read from write-only PPU register {addr:#06X}");
                0
            }
        }
    }

    /// Handle a CPU write to $2000–$2007.
    pub fn register_write(&mut self, addr: u16, data: u8, cart: &mut Cartridge) {
        match addr {
            0x2000 => self.write_control(data),
            0x2001 => self.mask = Mask::from_bits_truncate(data),
            0x2002 => warn!("write to read-only PPU status register"),
            0x2003 => self.oam_addr = data,
            0x2004 => self.write_oam_data(data),
            0x2005 => self.write_scroll(data),
            0x2006 => self.write_addr(data),
            0x2007 => self.write_data(data, cart),
            _ => warn!("write to unknown PPU register {addr:#06X}"),
        }
    }

    fn write_control(&mut self, data: u8) {
        let was_enabled = self.control.contains(Control::GENERATE_VBLANK_NMI);
        self.control = Control::from_bits_truncate(data);

        // Enabling NMI while vblank is already active re-arms the signal.
        let now_enabled = self.control.contains(Control::GENERATE_VBLANK_NMI);
        if !was_enabled && now_enabled && self.status.contains(Status::VBLANK) {
            self.nmi_pending = true;
        }
    }

    fn read_status(&mut self) -> u8 {
        let value = self.status.bits();
        self.status.remove(Status::VBLANK);
        self.addr_latch_high = true;
        self.scroll_latch_y = false;
        value
    }

    fn read_oam_data(&self) -> u8 {
        // Reads do not advance the cursor; only writes do.
        self.oam[self.oam_addr as usize]
    }

    /// Store one byte at the OAM cursor and advance it.
    pub fn write_oam_data(&mut self, data: u8) {
        self.oam[self.oam_addr as usize] = data;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    fn write_scroll(&mut self, data: u8) {
        if self.scroll_latch_y {
            self.scroll_y = data;
        } else {
            self.scroll_x = data;
        }
        self.scroll_latch_y = !self.scroll_latch_y;
    }

    fn write_addr(&mut self, data: u8) {
        if self.addr_latch_high {
            self.addr = (u16::from(data) << 8) | (self.addr & 0x00FF);
        } else {
            self.addr = (self.addr & 0xFF00) | u16::from(data);
        }
        self.addr &= 0x3FFF;
        self.addr_latch_high = !self.addr_latch_high;
    }

    pub fn addr_register(&self) -> u16 {
        self.addr
    }

    fn increment_addr(&mut self) {
        let step = if self.control.contains(Control::LARGE_VRAM_INCREMENT) {
            32
        } else {
            1
        };
        self.addr = (self.addr + step) & 0x3FFF;
    }

    fn read_data(&mut self, cart: &Cartridge) -> u8 {
        let addr = self.addr;
        let value = match addr {
            // CHR and nametable reads are delayed one access behind.
            0x0000..=0x1FFF => self.buffered(cart.mapped_read_chr(addr)),
            0x2000..=0x3EFF => {
                let index = Self::normalize_nametable_addr(addr, cart.mirroring());
                self.buffered(self.nametables[index])
            }
            // Palette reads bypass the buffer.
            _ => self.palettes[Self::palette_index(addr)],
        };

        self.increment_addr();
        value
    }

    fn write_data(&mut self, data: u8, cart: &mut Cartridge) {
        let addr = self.addr;
        match addr {
            0x0000..=0x1FFF => cart.mapped_write_chr(addr, data),
            0x2000..=0x3EFF => {
                let index = Self::normalize_nametable_addr(addr, cart.mirroring());
                self.nametables[index] = data;
            }
            _ => self.palettes[Self::palette_index(addr)] = data,
        }

        self.increment_addr();
    }

    fn buffered(&mut self, incoming: u8) -> u8 {
        let previous = self.read_buffer;
        self.read_buffer = incoming;
        previous
    }

    /// Fold a logical nametable address ($2000–$3EFF, with $3000+ mirroring
    /// down) onto the 2 KiB of physical storage per the mirroring mode.
    fn normalize_nametable_addr(addr: u16, mirroring: Mirroring) -> usize {
        let offset = usize::from(addr & 0x2FFF) - 0x2000;
        let table = offset / 0x400;

        match (table, mirroring) {
            (0, _) => offset,
            (1, Mirroring::Horizontal) => offset - 0x400,
            (1, _) => offset,
            (2, Mirroring::Horizontal) => offset - 0x400,
            (2, Mirroring::Vertical) => offset - 0x800,
            (3, _) => offset - 0x800,
            // Four-screen table 2, and anything else: fold onto the 2 KiB
            // of physical storage that actually exists.
            _ => offset & 0x7FF,
        }
    }

    /// Palette RAM index for $3F00–$3FFF, with the four sprite-backdrop
    /// mirrors aliased down.
    fn palette_index(addr: u16) -> usize {
        let mut index = usize::from(addr & 0x1F);
        if matches!(index, 0x10 | 0x14 | 0x18 | 0x1C) {
            index -= 0x10;
        }
        index
    }

    // --- rendering ---

    fn render_frame(&mut self, cart: &Cartridge) {
        self.draw_background(cart);
        self.draw_sprites(cart);
    }

    fn draw_background(&mut self, cart: &Cartridge) {
        let bank = if self.control.contains(Control::BACKGROUND_PATTERN_TABLE) {
            0x1000
        } else {
            0x0000
        };

        // 32×30 tile cells; the last 64 bytes of the table hold attributes.
        for i in 0..(0x400 - 64) {
            let tile_id = self.nametables[i];
            let column = i % 32;
            let row = i / 32;

            let palette = self.background_palette(column, row);
            let tile = self.fetch_tile(cart, bank, tile_id);

            for py in 0..8 {
                for px in 0..8 {
                    let color_id = tile.color_id(px, py);
                    let pixel = (row * 8 + py) * SCREEN_WIDTH + column * 8 + px;
                    self.framebuffer[pixel] = palette.color(color_id);
                }
            }
        }
    }

    /// Resolve the 4-color palette for a background tile cell from its
    /// attribute byte (2 bits per 2×2-tile quadrant of a 4×4 block).
    fn background_palette(&self, column: usize, row: usize) -> Palette {
        let attr_id = row / 4 * 8 + column / 4;
        let attr = self.nametables[0x400 - 64 + attr_id];

        let mut shift = 0;
        if (column % 4) / 2 == 1 {
            shift += 2;
        }
        if (row % 4) / 2 == 1 {
            shift += 4;
        }

        let palette_start = 4 * usize::from((attr >> shift) & 0b11) + 1;
        Palette([
            self.palettes[0],
            self.palettes[palette_start],
            self.palettes[palette_start + 1],
            self.palettes[palette_start + 2],
        ])
    }

    fn draw_sprites(&mut self, cart: &Cartridge) {
        let bank = if self.control.contains(Control::SPRITE_PATTERN_TABLE) {
            0x1000
        } else {
            0x0000
        };

        // Paint back-to-front so OAM slot 0 ends up on top.
        for base in (0..self.oam.len()).step_by(4).rev() {
            let entry = OamEntry::from_bytes(&self.oam[base..base + 4]);
            let palette = self.sprite_palette(entry.palette_id());
            let tile = self.fetch_tile(cart, bank, entry.tile_id);

            for py in 0..8 {
                for px in 0..8 {
                    let color_id = tile.color_id(px, py);
                    if color_id == 0 {
                        continue;
                    }

                    let (x, y) = entry.position(px, py);
                    if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
                        continue;
                    }
                    self.framebuffer[y * SCREEN_WIDTH + x] = palette.color(color_id);
                }
            }
        }
    }

    fn sprite_palette(&self, palette_id: u8) -> Palette {
        let start = SPRITE_PALETTE_OFFSET + usize::from(palette_id) * 4;
        // Entry 0 is never painted (color id 0 is transparent for sprites).
        Palette([
            0,
            self.palettes[start],
            self.palettes[start + 1],
            self.palettes[start + 2],
        ])
    }

    fn fetch_tile(&self, cart: &Cartridge, bank: u16, tile_id: u8) -> Tile {
        let start = bank + u16::from(tile_id) * 16;
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = cart.mapped_read_chr(start + i as u16);
        }
        Tile { bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cart(mirroring: Mirroring) -> Cartridge {
        let mut data = vec![0u8; 16];
        data[0..4].copy_from_slice(b"NES\x1A");
        data[4] = 1;
        data[5] = 1;
        data.resize(16 + 16 * 1024 + 8 * 1024, 0);

        let mut cart = Cartridge::new();
        cart.load_raw_bytes(&data).unwrap();
        cart.set_mirroring(mirroring);
        cart
    }

    fn test_ppu() -> Ppu {
        Ppu::new(Box::new(|_| {}))
    }

    fn set_addr(ppu: &mut Ppu, cart: &mut Cartridge, addr: u16) {
        ppu.register_write(0x2006, (addr >> 8) as u8, cart);
        ppu.register_write(0x2006, (addr & 0xFF) as u8, cart);
    }

    #[test]
    fn data_write_lands_in_nametable_and_advances_addr() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();

        set_addr(&mut ppu, &mut cart, 0x2305);
        ppu.register_write(0x2007, 0x66, &mut cart);

        assert_eq!(ppu.nametables[0x0305], 0x66);
        assert_eq!(ppu.addr_register(), 0x2306);
    }

    #[test]
    fn nametable_reads_are_buffered_one_behind() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();
        ppu.nametables[0x0305] = 0x66;

        set_addr(&mut ppu, &mut cart, 0x2305);

        ppu.register_read(0x2007, &cart); // primes the buffer
        assert_eq!(ppu.addr_register(), 0x2306);
        // A second fetch returns the primed byte even though addr moved on.
        set_addr(&mut ppu, &mut cart, 0x2305);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x66);
    }

    #[test]
    fn buffered_reads_cross_pages() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();
        ppu.nametables[0x01FF] = 0x66;
        ppu.nametables[0x0200] = 0x77;

        set_addr(&mut ppu, &mut cart, 0x21FF);

        ppu.register_read(0x2007, &cart);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x66);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x77);
    }

    #[test]
    fn large_increment_steps_by_32() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();
        ppu.register_write(0x2000, 0b100, &mut cart);
        ppu.nametables[0x01FF] = 0x66;
        ppu.nametables[0x01FF + 32] = 0x77;
        ppu.nametables[0x01FF + 64] = 0x88;

        set_addr(&mut ppu, &mut cart, 0x21FF);

        ppu.register_read(0x2007, &cart);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x66);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x77);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x88);
    }

    #[test]
    fn chr_reads_are_buffered() {
        let mut cart = test_cart(Mirroring::Horizontal);
        cart.direct_write_chr(0x0010, 0x42);
        let mut ppu = test_ppu();

        set_addr(&mut ppu, &mut cart, 0x0010);

        ppu.register_read(0x2007, &cart);
        // addr has moved on, but the buffered byte is the one at 0x0010.
        assert_eq!(ppu.read_buffer, 0x42);
    }

    #[test]
    fn horizontal_mirroring_pairs_tables() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();

        set_addr(&mut ppu, &mut cart, 0x2405);
        ppu.register_write(0x2007, 0x66, &mut cart);
        set_addr(&mut ppu, &mut cart, 0x2805);
        ppu.register_write(0x2007, 0x77, &mut cart);

        set_addr(&mut ppu, &mut cart, 0x2005);
        ppu.register_read(0x2007, &cart);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x66);

        set_addr(&mut ppu, &mut cart, 0x2C05);
        ppu.register_read(0x2007, &cart);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x77);
    }

    #[test]
    fn vertical_mirroring_pairs_tables() {
        let mut cart = test_cart(Mirroring::Vertical);
        let mut ppu = test_ppu();

        set_addr(&mut ppu, &mut cart, 0x2005);
        ppu.register_write(0x2007, 0x66, &mut cart);
        set_addr(&mut ppu, &mut cart, 0x2C05);
        ppu.register_write(0x2007, 0x77, &mut cart);

        set_addr(&mut ppu, &mut cart, 0x2805);
        ppu.register_read(0x2007, &cart);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x66);

        set_addr(&mut ppu, &mut cart, 0x2405);
        ppu.register_read(0x2007, &cart);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x77);
    }

    #[test]
    fn addresses_above_0x3000_fold_onto_nametables() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();
        ppu.nametables[0x0305] = 0x66;

        set_addr(&mut ppu, &mut cart, 0x3305);

        ppu.register_read(0x2007, &cart);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x66);
    }

    #[test]
    fn palette_reads_skip_the_buffer_and_mirror() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();

        set_addr(&mut ppu, &mut cart, 0x3F10);
        ppu.register_write(0x2007, 0x2A, &mut cart);

        assert_eq!(ppu.palettes[0x00], 0x2A);
        set_addr(&mut ppu, &mut cart, 0x3F00);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x2A);
    }

    #[test]
    fn oam_reads_do_not_advance_the_cursor() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();

        ppu.register_write(0x2003, 0x10, &mut cart);
        ppu.register_write(0x2004, 0x66, &mut cart);
        ppu.register_write(0x2004, 0x77, &mut cart);

        ppu.register_write(0x2003, 0x10, &mut cart);
        assert_eq!(ppu.register_read(0x2004, &cart), 0x66);
        assert_eq!(ppu.register_read(0x2004, &cart), 0x66);

        ppu.register_write(0x2003, 0x11, &mut cart);
        assert_eq!(ppu.register_read(0x2004, &cart), 0x77);
    }

    #[test]
    fn status_read_clears_vblank_and_resets_latches() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();
        ppu.status.insert(Status::VBLANK);

        // Poison the addr latch with a stray first write.
        ppu.register_write(0x2006, 0x21, &mut cart);

        let value = ppu.register_read(0x2002, &cart);
        assert_eq!(value >> 7, 1);
        assert!(!ppu.status.contains(Status::VBLANK));

        // Latch is back to expecting the high byte.
        ppu.nametables[0x0305] = 0x66;
        set_addr(&mut ppu, &mut cart, 0x2305);
        ppu.register_read(0x2007, &cart);
        assert_eq!(ppu.register_read(0x2007, &cart), 0x66);
    }

    #[test]
    fn vblank_scanline_raises_nmi_when_enabled() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();
        ppu.register_write(0x2000, 0x80, &mut cart);

        // 241 scanlines × 341 dots, in CPU cycles.
        let cycles = (VBLANK_SCANLINE * DOTS_PER_SCANLINE).div_ceil(3);
        ppu.tick(cycles, &cart);

        assert!(ppu.status.contains(Status::VBLANK));
        assert!(ppu.nmi_status());
        assert!(!ppu.nmi_status());
    }

    #[test]
    fn nmi_without_enable_stays_quiet() {
        let cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();

        let cycles = (VBLANK_SCANLINE * DOTS_PER_SCANLINE).div_ceil(3);
        ppu.tick(cycles, &cart);

        assert!(ppu.status.contains(Status::VBLANK));
        assert!(!ppu.nmi_status());
    }

    #[test]
    fn enabling_nmi_during_vblank_rearms_it() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();

        let cycles = (VBLANK_SCANLINE * DOTS_PER_SCANLINE).div_ceil(3);
        ppu.tick(cycles, &cart);
        assert!(!ppu.nmi_status());

        ppu.register_write(0x2000, 0x80, &mut cart);
        assert!(ppu.nmi_status());
    }

    #[test]
    fn final_scanline_ends_the_frame_and_clears_flags() {
        let mut cart = test_cart(Mirroring::Horizontal);
        let mut ppu = test_ppu();
        ppu.register_write(0x2000, 0x80, &mut cart);

        let cycles = (FINAL_SCANLINE * DOTS_PER_SCANLINE).div_ceil(3);
        ppu.tick(cycles, &cart);

        assert!(!ppu.status.contains(Status::VBLANK));
        assert!(!ppu.nmi_status());
    }

    #[test]
    fn frame_is_delivered_through_the_draw_callback() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let frames = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&frames);
        let mut ppu = Ppu::new(Box::new(move |frame| {
            assert_eq!(frame.len(), SCREEN_WIDTH * SCREEN_HEIGHT);
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let cart = test_cart(Mirroring::Horizontal);

        let cycles = (FINAL_SCANLINE * DOTS_PER_SCANLINE).div_ceil(3);
        ppu.tick(cycles, &cart);

        assert_eq!(frames.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn background_tile_pixels_reach_the_framebuffer() {
        let mut cart = test_cart(Mirroring::Horizontal);
        // Tile 1: solid color id 1 (low plane all ones).
        for row in 0..8 {
            cart.direct_write_chr(16 + row, 0xFF);
        }
        let mut ppu = test_ppu();
        ppu.nametables[0] = 1; // top-left cell uses tile 1
        ppu.palettes[0] = 0x0F;
        ppu.palettes[1] = 0x21;

        let cycles = (FINAL_SCANLINE * DOTS_PER_SCANLINE).div_ceil(3);
        ppu.tick(cycles, &cart);

        let expected = crate::ppu::palette::SYSTEM_PALETTE[0x21];
        assert_eq!(ppu.framebuffer[0], expected);
        assert_eq!(ppu.framebuffer[7], expected);
        // The neighbouring cell still shows the backdrop.
        let backdrop = crate::ppu::palette::SYSTEM_PALETTE[0x0F];
        assert_eq!(ppu.framebuffer[8], backdrop);
    }

    #[test]
    fn sprite_slot_zero_wins_overlaps() {
        let mut cart = test_cart(Mirroring::Horizontal);
        for row in 0..8 {
            cart.direct_write_chr(16 + row, 0xFF); // tile 1: solid color 1
        }
        let mut ppu = test_ppu();
        ppu.palettes[SPRITE_PALETTE_OFFSET] = 0x21; // sprite palette 0
        ppu.palettes[SPRITE_PALETTE_OFFSET + 4] = 0x2A; // sprite palette 1

        // Two sprites at the same position, different palettes.
        ppu.oam[0..4].copy_from_slice(&[10, 1, 0b00, 10]);
        ppu.oam[4..8].copy_from_slice(&[10, 1, 0b01, 10]);

        let cycles = (FINAL_SCANLINE * DOTS_PER_SCANLINE).div_ceil(3);
        ppu.tick(cycles, &cart);

        let expected = crate::ppu::palette::SYSTEM_PALETTE[0x21];
        assert_eq!(ppu.framebuffer[10 * SCREEN_WIDTH + 10], expected);
    }
}
