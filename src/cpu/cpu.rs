//! 6502 instruction engine.
//!
//! One `step()` per instruction: service a pending NMI, fetch, dispatch
//! through an exhaustive 256-arm opcode table, and report the cycles consumed
//! so the caller can advance the PPU in lock-step. Addressing quirks are
//! faithful: zero-page index wraparound, the JMP-indirect page-wrap bug, and
//! the extra cycle on page-crossing indexed reads and taken branches.

use log::warn;

use crate::bus::Bus;
use crate::cpu::flags::{
    FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW,
    FLAG_UNUSED, FLAG_ZERO,
};

const NMI_VECTOR: u16 = 0xFFFA;
const RESET_VECTOR: u16 = 0xFFFC;
const IRQ_VECTOR: u16 = 0xFFFE;

const STACK_BASE: u16 = 0x0100;

/// PPU time charged for entering the NMI handler, in CPU cycles.
const NMI_ENTRY_CYCLES: usize = 2;

/// Magic constant for the unstable ANE opcode; matches the commonly observed
/// behavior of late NTSC chips.
const ANE_MAGIC: u8 = 0xEE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    IndirectX,
    IndirectY,
    Relative,
    JumpIndirect,
}

pub struct Cpu<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    pub cycles: usize,
    pub bus: B,
    /// Set by `operand_address` when indexing crossed a page boundary.
    page_crossed: bool,
}

impl<B: Bus> Cpu<B> {
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: FLAG_INTERRUPT_DISABLE | FLAG_UNUSED,
            cycles: 0,
            bus,
            page_crossed: false,
        }
    }

    /// Load PC from the reset vector.
    pub fn load_program_counter(&mut self) {
        self.pc = self.read_vector(RESET_VECTOR);
    }

    /// Execute one instruction (servicing a pending NMI first) and return the
    /// CPU cycles consumed. The bus is ticked by the same amount.
    pub fn step(&mut self) -> usize {
        if self.bus.poll_nmi() {
            self.handle_nmi();
        }

        let opcode = self.fetch_byte();
        let spent = self.execute_opcode(opcode);

        self.cycles += spent;
        self.bus.tick(spent);
        spent
    }

    fn handle_nmi(&mut self) {
        self.push_word(self.pc);
        self.push((self.status & !FLAG_BREAK) | FLAG_UNUSED);
        self.status |= FLAG_INTERRUPT_DISABLE;

        self.cycles += NMI_ENTRY_CYCLES;
        self.bus.tick(NMI_ENTRY_CYCLES);

        self.pc = self.read_vector(NMI_VECTOR);
    }

    fn read_vector(&mut self, addr: u16) -> u16 {
        let lo = u16::from(self.bus.read(addr));
        let hi = u16::from(self.bus.read(addr.wrapping_add(1)));
        (hi << 8) | lo
    }

    fn fetch_byte(&mut self) -> u8 {
        let byte = self.bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    fn fetch_word(&mut self) -> u16 {
        let lo = u16::from(self.fetch_byte());
        let hi = u16::from(self.fetch_byte());
        (hi << 8) | lo
    }

    /// Resolve the operand address for `mode`, tracking page crossings.
    fn operand_address(&mut self, mode: AddressingMode) -> u16 {
        self.page_crossed = false;

        match mode {
            AddressingMode::Immediate | AddressingMode::Relative => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                addr
            }
            AddressingMode::ZeroPage => u16::from(self.fetch_byte()),
            AddressingMode::ZeroPageX => u16::from(self.fetch_byte().wrapping_add(self.x)),
            AddressingMode::ZeroPageY => u16::from(self.fetch_byte().wrapping_add(self.y)),
            AddressingMode::Absolute => self.fetch_word(),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(u16::from(self.x));
                self.page_crossed = base & 0xFF00 != addr & 0xFF00;
                addr
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(u16::from(self.y));
                self.page_crossed = base & 0xFF00 != addr & 0xFF00;
                addr
            }
            AddressingMode::IndirectX => {
                let zp = self.fetch_byte().wrapping_add(self.x);
                let lo = u16::from(self.bus.read(u16::from(zp)));
                let hi = u16::from(self.bus.read(u16::from(zp.wrapping_add(1))));
                (hi << 8) | lo
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_byte();
                let lo = u16::from(self.bus.read(u16::from(zp)));
                let hi = u16::from(self.bus.read(u16::from(zp.wrapping_add(1))));
                let base = (hi << 8) | lo;
                let addr = base.wrapping_add(u16::from(self.y));
                self.page_crossed = base & 0xFF00 != addr & 0xFF00;
                addr
            }
            AddressingMode::JumpIndirect => {
                let ptr = self.fetch_word();
                let lo = u16::from(self.bus.read(ptr));
                // Hardware bug: the high byte wraps within the pointer's page.
                let hi_addr = if ptr & 0x00FF == 0x00FF {
                    ptr & 0xFF00
                } else {
                    ptr.wrapping_add(1)
                };
                let hi = u16::from(self.bus.read(hi_addr));
                (hi << 8) | lo
            }
            AddressingMode::Implicit | AddressingMode::Accumulator => {
                panic!("addressing mode {mode:?} has no operand address")
            }
        }
    }

    fn read_operand(&mut self, mode: AddressingMode) -> u8 {
        let addr = self.operand_address(mode);
        self.bus.read(addr)
    }

    fn page_cross_penalty(&self) -> usize {
        usize::from(self.page_crossed)
    }

    // --- stack ---

    fn push(&mut self, data: u8) {
        self.bus.write(STACK_BASE + u16::from(self.sp), data);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.bus.read(STACK_BASE + u16::from(self.sp))
    }

    fn push_word(&mut self, data: u16) {
        self.push((data >> 8) as u8);
        self.push((data & 0xFF) as u8);
    }

    fn pop_word(&mut self) -> u16 {
        let lo = u16::from(self.pop());
        let hi = u16::from(self.pop());
        (hi << 8) | lo
    }

    // --- flag helpers ---

    fn set_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    fn flag_set(&self, flag: u8) -> bool {
        self.status & flag != 0
    }

    fn update_zero_negative(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }

    // --- dispatch ---

    fn execute_opcode(&mut self, opcode: u8) -> usize {
        use AddressingMode::*;

        match opcode {
            // CPU lock-up: rewind PC so the same opcode refetches forever.
            0x02 | 0x12 | 0x22 | 0x32 | 0x42 | 0x52 | 0x62 | 0x72 | 0x92 | 0xB2 | 0xD2
            | 0xF2 => self.jam(),

            0x00 => self.brk(),
            0x40 => self.rti(),
            0x60 => self.rts(),
            0x20 => self.jsr(),
            0x4C => self.jmp(Absolute, 3),
            0x6C => self.jmp(JumpIndirect, 5),

            0xA9 => self.lda(Immediate, 2),
            0xA5 => self.lda(ZeroPage, 3),
            0xB5 => self.lda(ZeroPageX, 4),
            0xAD => self.lda(Absolute, 4),
            0xBD => self.lda(AbsoluteX, 4),
            0xB9 => self.lda(AbsoluteY, 4),
            0xA1 => self.lda(IndirectX, 6),
            0xB1 => self.lda(IndirectY, 5),

            0xA2 => self.ldx(Immediate, 2),
            0xA6 => self.ldx(ZeroPage, 3),
            0xB6 => self.ldx(ZeroPageY, 4),
            0xAE => self.ldx(Absolute, 4),
            0xBE => self.ldx(AbsoluteY, 4),

            0xA0 => self.ldy(Immediate, 2),
            0xA4 => self.ldy(ZeroPage, 3),
            0xB4 => self.ldy(ZeroPageX, 4),
            0xAC => self.ldy(Absolute, 4),
            0xBC => self.ldy(AbsoluteX, 4),

            0xA7 => self.lax(ZeroPage, 3),
            0xB7 => self.lax(ZeroPageY, 4),
            0xAF => self.lax(Absolute, 4),
            0xBF => self.lax(AbsoluteY, 4),
            0xA3 => self.lax(IndirectX, 6),
            0xB3 => self.lax(IndirectY, 5),

            0x85 => self.sta(ZeroPage, 3),
            0x95 => self.sta(ZeroPageX, 4),
            0x8D => self.sta(Absolute, 4),
            0x9D => self.sta(AbsoluteX, 5),
            0x99 => self.sta(AbsoluteY, 5),
            0x81 => self.sta(IndirectX, 6),
            0x91 => self.sta(IndirectY, 6),

            0x86 => self.stx(ZeroPage, 3),
            0x96 => self.stx(ZeroPageY, 4),
            0x8E => self.stx(Absolute, 4),

            0x84 => self.sty(ZeroPage, 3),
            0x94 => self.sty(ZeroPageX, 4),
            0x8C => self.sty(Absolute, 4),

            0x87 => self.sax(ZeroPage, 3),
            0x97 => self.sax(ZeroPageY, 4),
            0x8F => self.sax(Absolute, 4),
            0x83 => self.sax(IndirectX, 6),

            0xAA => self.set_x(self.a),
            0xA8 => self.set_y(self.a),
            0x8A => self.set_a(self.x),
            0x98 => self.set_a(self.y),
            0xBA => self.set_x(self.sp),
            // TXS is the one transfer that leaves the flags alone.
            0x9A => {
                self.sp = self.x;
                2
            }

            0x48 => self.pha(),
            0x08 => self.php(),
            0x68 => self.pla(),
            0x28 => self.plp(),

            0x29 => self.and(Immediate, 2),
            0x25 => self.and(ZeroPage, 3),
            0x35 => self.and(ZeroPageX, 4),
            0x2D => self.and(Absolute, 4),
            0x3D => self.and(AbsoluteX, 4),
            0x39 => self.and(AbsoluteY, 4),
            0x21 => self.and(IndirectX, 6),
            0x31 => self.and(IndirectY, 5),

            0x09 => self.ora(Immediate, 2),
            0x05 => self.ora(ZeroPage, 3),
            0x15 => self.ora(ZeroPageX, 4),
            0x0D => self.ora(Absolute, 4),
            0x1D => self.ora(AbsoluteX, 4),
            0x19 => self.ora(AbsoluteY, 4),
            0x01 => self.ora(IndirectX, 6),
            0x11 => self.ora(IndirectY, 5),

            0x49 => self.eor(Immediate, 2),
            0x45 => self.eor(ZeroPage, 3),
            0x55 => self.eor(ZeroPageX, 4),
            0x4D => self.eor(Absolute, 4),
            0x5D => self.eor(AbsoluteX, 4),
            0x59 => self.eor(AbsoluteY, 4),
            0x41 => self.eor(IndirectX, 6),
            0x51 => self.eor(IndirectY, 5),

            0x24 => self.bit(ZeroPage, 3),
            0x2C => self.bit(Absolute, 4),

            0x69 => self.adc(Immediate, 2),
            0x65 => self.adc(ZeroPage, 3),
            0x75 => self.adc(ZeroPageX, 4),
            0x6D => self.adc(Absolute, 4),
            0x7D => self.adc(AbsoluteX, 4),
            0x79 => self.adc(AbsoluteY, 4),
            0x61 => self.adc(IndirectX, 6),
            0x71 => self.adc(IndirectY, 5),

            0xE9 | 0xEB => self.sbc(Immediate, 2),
            0xE5 => self.sbc(ZeroPage, 3),
            0xF5 => self.sbc(ZeroPageX, 4),
            0xED => self.sbc(Absolute, 4),
            0xFD => self.sbc(AbsoluteX, 4),
            0xF9 => self.sbc(AbsoluteY, 4),
            0xE1 => self.sbc(IndirectX, 6),
            0xF1 => self.sbc(IndirectY, 5),

            0xC9 => self.compare(self.a, Immediate, 2),
            0xC5 => self.compare(self.a, ZeroPage, 3),
            0xD5 => self.compare(self.a, ZeroPageX, 4),
            0xCD => self.compare(self.a, Absolute, 4),
            0xDD => self.compare(self.a, AbsoluteX, 4),
            0xD9 => self.compare(self.a, AbsoluteY, 4),
            0xC1 => self.compare(self.a, IndirectX, 6),
            0xD1 => self.compare(self.a, IndirectY, 5),

            0xE0 => self.compare(self.x, Immediate, 2),
            0xE4 => self.compare(self.x, ZeroPage, 3),
            0xEC => self.compare(self.x, Absolute, 4),

            0xC0 => self.compare(self.y, Immediate, 2),
            0xC4 => self.compare(self.y, ZeroPage, 3),
            0xCC => self.compare(self.y, Absolute, 4),

            0xE6 => self.inc(ZeroPage, 5),
            0xF6 => self.inc(ZeroPageX, 6),
            0xEE => self.inc(Absolute, 6),
            0xFE => self.inc(AbsoluteX, 7),
            0xC6 => self.dec(ZeroPage, 5),
            0xD6 => self.dec(ZeroPageX, 6),
            0xCE => self.dec(Absolute, 6),
            0xDE => self.dec(AbsoluteX, 7),

            0xE8 => self.set_x(self.x.wrapping_add(1)),
            0xC8 => self.set_y(self.y.wrapping_add(1)),
            0xCA => self.set_x(self.x.wrapping_sub(1)),
            0x88 => self.set_y(self.y.wrapping_sub(1)),

            0x0A => self.asl(Accumulator, 2),
            0x06 => self.asl(ZeroPage, 5),
            0x16 => self.asl(ZeroPageX, 6),
            0x0E => self.asl(Absolute, 6),
            0x1E => self.asl(AbsoluteX, 7),

            0x4A => self.lsr(Accumulator, 2),
            0x46 => self.lsr(ZeroPage, 5),
            0x56 => self.lsr(ZeroPageX, 6),
            0x4E => self.lsr(Absolute, 6),
            0x5E => self.lsr(AbsoluteX, 7),

            0x2A => self.rol(Accumulator, 2),
            0x26 => self.rol(ZeroPage, 5),
            0x36 => self.rol(ZeroPageX, 6),
            0x2E => self.rol(Absolute, 6),
            0x3E => self.rol(AbsoluteX, 7),

            0x6A => self.ror(Accumulator, 2),
            0x66 => self.ror(ZeroPage, 5),
            0x76 => self.ror(ZeroPageX, 6),
            0x6E => self.ror(Absolute, 6),
            0x7E => self.ror(AbsoluteX, 7),

            0x90 => self.branch(!self.flag_set(FLAG_CARRY)),
            0xB0 => self.branch(self.flag_set(FLAG_CARRY)),
            0xD0 => self.branch(!self.flag_set(FLAG_ZERO)),
            0xF0 => self.branch(self.flag_set(FLAG_ZERO)),
            0x10 => self.branch(!self.flag_set(FLAG_NEGATIVE)),
            0x30 => self.branch(self.flag_set(FLAG_NEGATIVE)),
            0x50 => self.branch(!self.flag_set(FLAG_OVERFLOW)),
            0x70 => self.branch(self.flag_set(FLAG_OVERFLOW)),

            0x18 => self.set_flag_op(FLAG_CARRY, false),
            0x38 => self.set_flag_op(FLAG_CARRY, true),
            0x58 => self.set_flag_op(FLAG_INTERRUPT_DISABLE, false),
            0x78 => self.set_flag_op(FLAG_INTERRUPT_DISABLE, true),
            0xB8 => self.set_flag_op(FLAG_OVERFLOW, false),
            0xD8 => self.set_flag_op(FLAG_DECIMAL, false),
            0xF8 => self.set_flag_op(FLAG_DECIMAL, true),

            0xC7 => self.dcp(ZeroPage, 5),
            0xD7 => self.dcp(ZeroPageX, 6),
            0xCF => self.dcp(Absolute, 6),
            0xDF => self.dcp(AbsoluteX, 7),
            0xDB => self.dcp(AbsoluteY, 7),
            0xC3 => self.dcp(IndirectX, 8),
            0xD3 => self.dcp(IndirectY, 8),

            0xE7 => self.isc(ZeroPage, 5),
            0xF7 => self.isc(ZeroPageX, 6),
            0xEF => self.isc(Absolute, 6),
            0xFF => self.isc(AbsoluteX, 7),
            0xFB => self.isc(AbsoluteY, 7),
            0xE3 => self.isc(IndirectX, 8),
            0xF3 => self.isc(IndirectY, 8),

            0x07 => self.slo(ZeroPage, 5),
            0x17 => self.slo(ZeroPageX, 6),
            0x0F => self.slo(Absolute, 6),
            0x1F => self.slo(AbsoluteX, 7),
            0x1B => self.slo(AbsoluteY, 7),
            0x03 => self.slo(IndirectX, 8),
            0x13 => self.slo(IndirectY, 8),

            0x27 => self.rla(ZeroPage, 5),
            0x37 => self.rla(ZeroPageX, 6),
            0x2F => self.rla(Absolute, 6),
            0x3F => self.rla(AbsoluteX, 7),
            0x3B => self.rla(AbsoluteY, 7),
            0x23 => self.rla(IndirectX, 8),
            0x33 => self.rla(IndirectY, 8),

            0x47 => self.sre(ZeroPage, 5),
            0x57 => self.sre(ZeroPageX, 6),
            0x4F => self.sre(Absolute, 6),
            0x5F => self.sre(AbsoluteX, 7),
            0x5B => self.sre(AbsoluteY, 7),
            0x43 => self.sre(IndirectX, 8),
            0x53 => self.sre(IndirectY, 8),

            0x67 => self.rra(ZeroPage, 5),
            0x77 => self.rra(ZeroPageX, 6),
            0x6F => self.rra(Absolute, 6),
            0x7F => self.rra(AbsoluteX, 7),
            0x7B => self.rra(AbsoluteY, 7),
            0x63 => self.rra(IndirectX, 8),
            0x73 => self.rra(IndirectY, 8),

            0x0B | 0x2B => self.anc(),
            0x4B => self.alr(),
            0xCB => self.sbx(),
            0x8B => self.ane(),
            0xBB => self.las(),
            0x9F => self.sha(AbsoluteY, 5),
            0x93 => self.sha(IndirectY, 6),
            0x9E => self.shx(),
            0x9C => self.shy(),
            0x9B => self.tas(),
            // Unstable beyond useful approximation: consume the operand.
            0x6B | 0xAB => self.unhandled(opcode),

            0xEA | 0x1A | 0x3A | 0x5A | 0x7A | 0xDA | 0xFA => 2,
            0x80 | 0x82 | 0x89 | 0xC2 | 0xE2 => self.nop_read(Immediate, 2),
            0x04 | 0x44 | 0x64 => self.nop_read(ZeroPage, 3),
            0x14 | 0x34 | 0x54 | 0x74 | 0xD4 | 0xF4 => self.nop_read(ZeroPageX, 4),
            0x0C => self.nop_read(Absolute, 4),
            0x1C | 0x3C | 0x5C | 0x7C | 0xDC | 0xFC => self.nop_read(AbsoluteX, 4),
        }
    }

    // --- operations ---

    fn jam(&mut self) -> usize {
        self.pc = self.pc.wrapping_sub(1);
        2
    }

    fn unhandled(&mut self, opcode: u8) -> usize {
        let operand = self.read_operand(AddressingMode::Immediate);
        warn!("unstable opcode {opcode:#04X} treated as a no-op (operand {operand:#04X})");
        2
    }

    fn lda(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        self.a = self.read_operand(mode);
        self.update_zero_negative(self.a);
        cycles + self.page_cross_penalty()
    }

    fn ldx(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        self.x = self.read_operand(mode);
        self.update_zero_negative(self.x);
        cycles + self.page_cross_penalty()
    }

    fn ldy(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        self.y = self.read_operand(mode);
        self.update_zero_negative(self.y);
        cycles + self.page_cross_penalty()
    }

    fn lax(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let value = self.read_operand(mode);
        self.a = value;
        self.x = value;
        self.update_zero_negative(value);
        cycles + self.page_cross_penalty()
    }

    fn sta(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        self.bus.write(addr, self.a);
        cycles
    }

    fn stx(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        self.bus.write(addr, self.x);
        cycles
    }

    fn sty(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        self.bus.write(addr, self.y);
        cycles
    }

    fn sax(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        self.bus.write(addr, self.a & self.x);
        cycles
    }

    // Register transfers and increments share these Z/N-updating setters.

    fn set_a(&mut self, value: u8) -> usize {
        self.a = value;
        self.update_zero_negative(value);
        2
    }

    fn set_x(&mut self, value: u8) -> usize {
        self.x = value;
        self.update_zero_negative(value);
        2
    }

    fn set_y(&mut self, value: u8) -> usize {
        self.y = value;
        self.update_zero_negative(value);
        2
    }

    fn pha(&mut self) -> usize {
        self.push(self.a);
        3
    }

    fn php(&mut self) -> usize {
        self.push(self.status | FLAG_BREAK | FLAG_UNUSED);
        3
    }

    fn pla(&mut self) -> usize {
        self.a = self.pop();
        self.update_zero_negative(self.a);
        4
    }

    fn plp(&mut self) -> usize {
        self.status = (self.pop() & !FLAG_BREAK) | FLAG_UNUSED;
        4
    }

    fn and(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        self.a &= self.read_operand(mode);
        self.update_zero_negative(self.a);
        cycles + self.page_cross_penalty()
    }

    fn ora(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        self.a |= self.read_operand(mode);
        self.update_zero_negative(self.a);
        cycles + self.page_cross_penalty()
    }

    fn eor(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        self.a ^= self.read_operand(mode);
        self.update_zero_negative(self.a);
        cycles + self.page_cross_penalty()
    }

    fn bit(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let value = self.read_operand(mode);
        self.set_flag(FLAG_ZERO, self.a & value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
        self.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
        cycles
    }

    /// Add `value` (and the carry) into the accumulator, setting C/V/Z/N.
    /// Subtraction feeds the one's complement through the same path.
    fn add_to_accumulator(&mut self, value: u8) {
        let sum =
            u16::from(self.a) + u16::from(value) + u16::from(self.flag_set(FLAG_CARRY));
        let result = sum as u8;

        self.set_flag(FLAG_CARRY, sum > 0xFF);
        self.set_flag(
            FLAG_OVERFLOW,
            (value ^ result) & (self.a ^ result) & 0x80 != 0,
        );
        self.a = result;
        self.update_zero_negative(result);
    }

    fn adc(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let value = self.read_operand(mode);
        self.add_to_accumulator(value);
        cycles + self.page_cross_penalty()
    }

    fn sbc(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let value = self.read_operand(mode);
        self.add_to_accumulator(value ^ 0xFF);
        cycles + self.page_cross_penalty()
    }

    fn compare(&mut self, register: u8, mode: AddressingMode, cycles: usize) -> usize {
        let value = self.read_operand(mode);
        self.compare_value(register, value);
        cycles + self.page_cross_penalty()
    }

    fn compare_value(&mut self, register: u8, value: u8) {
        let diff = register.wrapping_sub(value);
        self.set_flag(FLAG_CARRY, register >= value);
        self.set_flag(FLAG_ZERO, register == value);
        self.set_flag(FLAG_NEGATIVE, diff & 0x80 != 0);
    }

    fn inc(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        let value = self.bus.read(addr).wrapping_add(1);
        self.bus.write(addr, value);
        self.update_zero_negative(value);
        cycles
    }

    fn dec(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        let value = self.bus.read(addr).wrapping_sub(1);
        self.bus.write(addr, value);
        self.update_zero_negative(value);
        cycles
    }

    /// Read the shift target (accumulator or memory) once, write it back once.
    fn shift_target(&mut self, mode: AddressingMode) -> (u8, Option<u16>) {
        if mode == AddressingMode::Accumulator {
            (self.a, None)
        } else {
            let addr = self.operand_address(mode);
            (self.bus.read(addr), Some(addr))
        }
    }

    fn write_shift_result(&mut self, target: Option<u16>, value: u8) {
        match target {
            Some(addr) => self.bus.write(addr, value),
            None => self.a = value,
        }
        self.update_zero_negative(value);
    }

    fn asl(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let (value, target) = self.shift_target(mode);
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        self.write_shift_result(target, value << 1);
        cycles
    }

    fn lsr(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let (value, target) = self.shift_target(mode);
        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        self.write_shift_result(target, value >> 1);
        cycles
    }

    fn rol(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let (value, target) = self.shift_target(mode);
        let carry_in = u8::from(self.flag_set(FLAG_CARRY));
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        self.write_shift_result(target, (value << 1) | carry_in);
        cycles
    }

    fn ror(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let (value, target) = self.shift_target(mode);
        let carry_in = u8::from(self.flag_set(FLAG_CARRY)) << 7;
        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        self.write_shift_result(target, (value >> 1) | carry_in);
        cycles
    }

    fn jmp(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        self.pc = self.operand_address(mode);
        cycles
    }

    fn jsr(&mut self) -> usize {
        // The saved address points at the last operand byte; RTS adds one.
        let target = self.fetch_word();
        self.push_word(self.pc.wrapping_sub(1));
        self.pc = target;
        6
    }

    fn rts(&mut self) -> usize {
        self.pc = self.pop_word().wrapping_add(1);
        6
    }

    fn brk(&mut self) -> usize {
        self.push_word(self.pc.wrapping_add(1));
        self.push(self.status | FLAG_BREAK | FLAG_UNUSED);
        self.status |= FLAG_INTERRUPT_DISABLE;
        self.pc = self.read_vector(IRQ_VECTOR);
        7
    }

    fn rti(&mut self) -> usize {
        self.status = (self.pop() & !FLAG_BREAK) | FLAG_UNUSED;
        self.pc = self.pop_word();
        6
    }

    fn branch(&mut self, take: bool) -> usize {
        let operand_addr = self.operand_address(AddressingMode::Relative);
        if !take {
            return 2;
        }

        let offset = self.bus.read(operand_addr) as i8;
        let target = self.pc.wrapping_add(offset as u16);
        let crossed = self.pc & 0xFF00 != target & 0xFF00;
        self.pc = target;

        3 + usize::from(crossed)
    }

    fn set_flag_op(&mut self, flag: u8, value: bool) -> usize {
        self.set_flag(flag, value);
        2
    }

    fn nop_read(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let _ = self.operand_address(mode);
        cycles + self.page_cross_penalty()
    }

    // --- illegal read-modify-write combinations ---

    fn dcp(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        let value = self.bus.read(addr).wrapping_sub(1);
        self.bus.write(addr, value);
        self.compare_value(self.a, value);
        cycles
    }

    fn isc(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        let value = self.bus.read(addr).wrapping_add(1);
        self.bus.write(addr, value);
        self.add_to_accumulator(value ^ 0xFF);
        cycles
    }

    fn slo(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        let value = self.bus.read(addr);
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        let shifted = value << 1;
        self.bus.write(addr, shifted);
        self.a |= shifted;
        self.update_zero_negative(self.a);
        cycles
    }

    fn rla(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        let value = self.bus.read(addr);
        let carry_in = u8::from(self.flag_set(FLAG_CARRY));
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        let rotated = (value << 1) | carry_in;
        self.bus.write(addr, rotated);
        self.a &= rotated;
        self.update_zero_negative(self.a);
        cycles
    }

    fn sre(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        let value = self.bus.read(addr);
        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        let shifted = value >> 1;
        self.bus.write(addr, shifted);
        self.a ^= shifted;
        self.update_zero_negative(self.a);
        cycles
    }

    fn rra(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        let value = self.bus.read(addr);
        let carry_in = u8::from(self.flag_set(FLAG_CARRY)) << 7;
        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        let rotated = (value >> 1) | carry_in;
        self.bus.write(addr, rotated);
        self.add_to_accumulator(rotated);
        cycles
    }

    // --- other illegal opcodes ---

    fn anc(&mut self) -> usize {
        self.a &= self.read_operand(AddressingMode::Immediate);
        self.update_zero_negative(self.a);
        self.set_flag(FLAG_CARRY, self.flag_set(FLAG_NEGATIVE));
        2
    }

    fn alr(&mut self) -> usize {
        self.a &= self.read_operand(AddressingMode::Immediate);
        self.set_flag(FLAG_CARRY, self.a & 0x01 != 0);
        self.a >>= 1;
        self.update_zero_negative(self.a);
        2
    }

    fn sbx(&mut self) -> usize {
        let value = self.read_operand(AddressingMode::Immediate);
        let masked = self.a & self.x;
        self.set_flag(FLAG_CARRY, masked >= value);
        self.x = masked.wrapping_sub(value);
        self.update_zero_negative(self.x);
        2
    }

    fn ane(&mut self) -> usize {
        let value = self.read_operand(AddressingMode::Immediate);
        self.a = (self.a | ANE_MAGIC) & self.x & value;
        self.update_zero_negative(self.a);
        2
    }

    fn las(&mut self) -> usize {
        let value = self.read_operand(AddressingMode::AbsoluteY) & self.sp;
        self.a = value;
        self.x = value;
        self.sp = value;
        self.update_zero_negative(value);
        4 + self.page_cross_penalty()
    }

    /// SHA/SHX/SHY store `reg & (high(addr) + 1)`: a deterministic stand-in
    /// for hardware bus-conflict behavior.
    fn unstable_store(&mut self, mode: AddressingMode, reg: u8, cycles: usize) -> usize {
        let addr = self.operand_address(mode);
        let value = reg & ((addr >> 8) as u8).wrapping_add(1);
        self.bus.write(addr, value);
        cycles
    }

    fn sha(&mut self, mode: AddressingMode, cycles: usize) -> usize {
        self.unstable_store(mode, self.a & self.x, cycles)
    }

    fn shx(&mut self) -> usize {
        self.unstable_store(AddressingMode::AbsoluteY, self.x, 5)
    }

    fn shy(&mut self) -> usize {
        self.unstable_store(AddressingMode::AbsoluteX, self.y, 5)
    }

    fn tas(&mut self) -> usize {
        self.sp = self.a & self.x;
        self.unstable_store(AddressingMode::AbsoluteY, self.sp, 5)
    }
}
