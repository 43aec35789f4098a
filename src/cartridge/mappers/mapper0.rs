// Mapper 0 (NROM) - the simplest NES mapper, no bank switching
//
// Memory layout:
// - CPU $8000-$BFFF: first 16KB of PRG-ROM
// - CPU $C000-$FFFF: last 16KB of PRG-ROM (mirror of the first for 16KB ROMs)
// - PPU $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
//
// Variants:
// - NROM-128: 16KB PRG-ROM, mirrored to fill the 32KB window
// - NROM-256: 32KB PRG-ROM, no mirroring

use crate::cartridge::{
    Cartridge, Mapper, MapperError, Mirroring, NametableIndex, CHR_BANK_SIZE, PRG_BANK_SIZE,
};

/// Mapper 0 implementation (NROM)
///
/// Used by early titles (Super Mario Bros., Donkey Kong, Balloon Fight) and
/// by the common CPU test ROMs. Mirroring is fixed by the cartridge header.
pub struct Mapper0 {
    /// PRG-ROM data (16KB or 32KB)
    prg_rom: Vec<u8>,
    /// CHR-ROM or CHR-RAM data (8KB)
    chr_mem: Vec<u8>,
    /// Whether CHR memory is writable
    chr_is_ram: bool,
    /// Fixed mirroring from the header
    mirroring: Mirroring,
}

impl Mapper0 {
    /// Build an NROM mapper from a loaded cartridge.
    ///
    /// # Errors
    /// `MapperError::InvalidConfiguration` if the PRG payload is not 16KB or
    /// 32KB, or the CHR payload is not 8KB.
    pub fn new(cartridge: Cartridge) -> Result<Self, MapperError> {
        let prg_len = cartridge.prg_rom.len();
        if prg_len != PRG_BANK_SIZE && prg_len != 2 * PRG_BANK_SIZE {
            return Err(MapperError::InvalidConfiguration(format!(
                "NROM requires 16KB or 32KB PRG-ROM, got {} bytes",
                prg_len
            )));
        }
        if cartridge.chr_rom.len() != CHR_BANK_SIZE {
            return Err(MapperError::InvalidConfiguration(format!(
                "NROM requires 8KB CHR memory, got {} bytes",
                cartridge.chr_rom.len()
            )));
        }

        Ok(Mapper0 {
            prg_rom: cartridge.prg_rom,
            chr_mem: cartridge.chr_rom,
            chr_is_ram: cartridge.chr_is_ram,
            mirroring: cartridge.header.mirroring,
        })
    }
}

impl Mapper for Mapper0 {
    fn cpu_read(&self, addr: u16) -> Option<u8> {
        match addr {
            0x8000..=0xFFFF => {
                // Modulo handles the 16KB mirror; for 32KB it is a no-op
                let index = (addr - 0x8000) as usize % self.prg_rom.len();
                Some(self.prg_rom[index])
            }
            _ => None,
        }
    }

    fn cpu_write(&mut self, addr: u16, _data: u8) -> bool {
        // NROM has no registers; claim writes into the ROM window so the
        // bus does not treat them as unmapped, but change nothing.
        (0x8000..=0xFFFF).contains(&addr)
    }

    fn ppu_read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.chr_mem[addr as usize],
            _ => 0,
        }
    }

    fn ppu_write(&mut self, addr: u16, data: u8) {
        if let 0x0000..=0x1FFF = addr {
            if self.chr_is_ram {
                self.chr_mem[addr as usize] = data;
            }
        }
    }

    fn mirror_nametable(&self, addr: u16) -> NametableIndex {
        self.mirroring.nametable_index(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::tests_support::build_cartridge;

    fn nrom(prg_size: usize, chr: Vec<u8>, mirroring: Mirroring) -> Mapper0 {
        let mut prg = vec![0u8; prg_size];
        for (i, b) in prg.iter_mut().enumerate() {
            *b = (i & 0xFF) as u8;
        }
        Mapper0::new(build_cartridge(prg, chr, 0, mirroring)).unwrap()
    }

    #[test]
    fn test_invalid_prg_size_rejected() {
        let cart = build_cartridge(
            vec![0; 8 * 1024],
            vec![0xBB; CHR_BANK_SIZE],
            0,
            Mirroring::Horizontal,
        );
        assert!(matches!(
            Mapper0::new(cart),
            Err(MapperError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_cpu_read_16kb_mirrors_upper_window() {
        let mapper = nrom(
            PRG_BANK_SIZE,
            vec![0xBB; CHR_BANK_SIZE],
            Mirroring::Horizontal,
        );

        assert_eq!(mapper.cpu_read(0x8000), Some(0x00));
        assert_eq!(mapper.cpu_read(0x8001), Some(0x01));
        // $C000-$FFFF mirrors $8000-$BFFF
        assert_eq!(mapper.cpu_read(0xC000), Some(0x00));
        assert_eq!(mapper.cpu_read(0xFFFF), mapper.cpu_read(0xBFFF));
    }

    #[test]
    fn test_cpu_read_32kb_no_mirror() {
        let mut prg = vec![0u8; 2 * PRG_BANK_SIZE];
        prg[0] = 0x11;
        prg[PRG_BANK_SIZE] = 0x22;
        let mapper = Mapper0::new(build_cartridge(
            prg,
            vec![0xBB; CHR_BANK_SIZE],
            0,
            Mirroring::Horizontal,
        ))
        .unwrap();

        assert_eq!(mapper.cpu_read(0x8000), Some(0x11));
        assert_eq!(mapper.cpu_read(0xC000), Some(0x22));
    }

    #[test]
    fn test_cpu_read_below_rom_window_unclaimed() {
        let mapper = nrom(
            PRG_BANK_SIZE,
            vec![0xBB; CHR_BANK_SIZE],
            Mirroring::Horizontal,
        );
        assert_eq!(mapper.cpu_read(0x4020), None);
        assert_eq!(mapper.cpu_read(0x7FFF), None);
    }

    #[test]
    fn test_cpu_write_rom_ignored_but_claimed() {
        let mut mapper = nrom(
            PRG_BANK_SIZE,
            vec![0xBB; CHR_BANK_SIZE],
            Mirroring::Horizontal,
        );
        let before = mapper.cpu_read(0x8000);
        assert!(mapper.cpu_write(0x8000, 0xFF));
        assert_eq!(mapper.cpu_read(0x8000), before);
        assert!(!mapper.cpu_write(0x5000, 0xFF));
    }

    #[test]
    fn test_ppu_read_chr_rom() {
        let mut chr = vec![0u8; CHR_BANK_SIZE];
        chr[0] = 0xAA;
        chr[0x1FFF] = 0xBB;
        let mapper = nrom(PRG_BANK_SIZE, chr, Mirroring::Horizontal);

        assert_eq!(mapper.ppu_read(0x0000), 0xAA);
        assert_eq!(mapper.ppu_read(0x1FFF), 0xBB);
    }

    #[test]
    fn test_ppu_write_chr_ram() {
        let mut mapper = nrom(
            PRG_BANK_SIZE,
            vec![0x00; CHR_BANK_SIZE],
            Mirroring::Horizontal,
        );
        assert!(mapper.chr_is_ram);

        mapper.ppu_write(0x0000, 0x42);
        assert_eq!(mapper.ppu_read(0x0000), 0x42);
    }

    #[test]
    fn test_ppu_write_chr_rom_ignored() {
        let mut mapper = nrom(
            PRG_BANK_SIZE,
            vec![0xBB; CHR_BANK_SIZE],
            Mirroring::Horizontal,
        );
        assert!(!mapper.chr_is_ram);

        mapper.ppu_write(0x0000, 0x42);
        assert_eq!(mapper.ppu_read(0x0000), 0xBB);
    }

    #[test]
    fn test_mirroring_from_header() {
        let mapper = nrom(
            PRG_BANK_SIZE,
            vec![0xBB; CHR_BANK_SIZE],
            Mirroring::Vertical,
        );
        assert_eq!(mapper.mirror_nametable(0x2000).table, 0);
        assert_eq!(mapper.mirror_nametable(0x2400).table, 1);
        assert_eq!(mapper.mirror_nametable(0x2800).table, 0);
    }
}
