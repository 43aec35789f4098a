// PPU-side memory bus
//
// Routes the 14-bit PPU address space: pattern tables live on the cartridge,
// nametables live in the PPU's 2KB of VRAM behind the mapper's mirroring
// function, and palette RAM is PPU-internal with its own mirroring.
//
// ```text
// $0000-$1FFF: pattern tables (cartridge CHR)
// $2000-$2FFF: nametables (2KB internal VRAM, mapper-mirrored)
// $3000-$3EFF: mirror of $2000-$2EFF
// $3F00-$3FFF: palette RAM (32 bytes, mirrored)
// ```

use super::constants::NAMETABLE_SIZE;
use super::Ppu;
use crate::cartridge::{Mirroring, NametableIndex};

impl Ppu {
    /// Resolve a nametable address to a physical VRAM index.
    ///
    /// The mapper decides the mirroring arrangement; without a cartridge the
    /// PPU falls back to horizontal.
    fn nametable_vram_index(&self, addr: u16) -> usize {
        let NametableIndex { table, offset } = match &self.mapper {
            Some(mapper) => mapper.borrow().mirror_nametable(addr),
            None => Mirroring::Horizontal.nametable_index(addr),
        };
        table as usize * NAMETABLE_SIZE + offset as usize
    }

    /// Resolve a palette address to an index into the 32 bytes of palette
    /// RAM. $3F10/$3F14/$3F18/$3F1C mirror $3F00/$3F04/$3F08/$3F0C: sprite
    /// palette entry 0 is the shared background color.
    fn palette_index(&self, addr: u16) -> usize {
        let index = (addr & 0x001F) as usize;
        if index >= 16 && index % 4 == 0 {
            index - 16
        } else {
            index
        }
    }

    /// Read from the PPU address space.
    pub(crate) fn read_vram(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;

        match addr {
            // Pattern tables: cartridge CHR-ROM/RAM
            0x0000..=0x1FFF => match &self.mapper {
                Some(mapper) => mapper.borrow().ppu_read(addr),
                None => 0,
            },

            // Nametables
            0x2000..=0x2FFF => self.nametables[self.nametable_vram_index(addr)],

            // Nametable mirror
            0x3000..=0x3EFF => self.nametables[self.nametable_vram_index(addr - 0x1000)],

            // Palette RAM
            0x3F00..=0x3FFF => self.palette_ram[self.palette_index(addr)],

            _ => unreachable!(),
        }
    }

    /// Write to the PPU address space.
    pub(crate) fn write_vram(&mut self, addr: u16, data: u8) {
        let addr = addr & 0x3FFF;

        match addr {
            0x0000..=0x1FFF => {
                if let Some(mapper) = &self.mapper {
                    mapper.borrow_mut().ppu_write(addr, data);
                }
            }

            0x2000..=0x2FFF => {
                let index = self.nametable_vram_index(addr);
                self.nametables[index] = data;
            }

            0x3000..=0x3EFF => {
                let index = self.nametable_vram_index(addr - 0x1000);
                self.nametables[index] = data;
            }

            0x3F00..=0x3FFF => {
                let index = self.palette_index(addr);
                self.palette_ram[index] = data;
            }

            _ => unreachable!(),
        }
    }
}
