// Shared test fixtures
//
// A RAM-backed mapper lets CPU and bus tests place programs and vectors
// anywhere in cartridge space without going through an iNES image.

use crate::cartridge::{Mapper, Mirroring, NametableIndex};
use std::cell::RefCell;
use std::rc::Rc;

/// Mapper that exposes 64KB of RAM to the CPU and 8KB of CHR-RAM to the PPU,
/// claiming every cartridge-space access.
pub(crate) struct RamMapper {
    cpu_mem: Vec<u8>,
    chr_mem: Vec<u8>,
    mirroring: Mirroring,
}

impl RamMapper {
    pub(crate) fn new() -> Self {
        RamMapper {
            cpu_mem: vec![0; 0x10000],
            chr_mem: vec![0; 0x2000],
            mirroring: Mirroring::Horizontal,
        }
    }

    pub(crate) fn with_mirroring(mirroring: Mirroring) -> Self {
        RamMapper {
            mirroring,
            ..Self::new()
        }
    }
}

impl Mapper for RamMapper {
    fn cpu_read(&self, addr: u16) -> Option<u8> {
        Some(self.cpu_mem[addr as usize])
    }

    fn cpu_write(&mut self, addr: u16, data: u8) -> bool {
        self.cpu_mem[addr as usize] = data;
        true
    }

    fn ppu_read(&self, addr: u16) -> u8 {
        self.chr_mem[(addr & 0x1FFF) as usize]
    }

    fn ppu_write(&mut self, addr: u16, data: u8) {
        self.chr_mem[(addr & 0x1FFF) as usize] = data;
    }

    fn mirror_nametable(&self, addr: u16) -> NametableIndex {
        self.mirroring.nametable_index(addr)
    }
}

/// A RAM mapper wrapped in the shared-handle type the bus expects.
pub(crate) fn ram_mapper() -> Rc<RefCell<Box<dyn Mapper>>> {
    Rc::new(RefCell::new(Box::new(RamMapper::new()) as Box<dyn Mapper>))
}

/// A bus with a RAM mapper attached, ready to hold test programs.
pub(crate) fn ram_bus() -> crate::bus::Bus {
    let mut bus = crate::bus::Bus::new();
    bus.attach_mapper(ram_mapper());
    bus
}
