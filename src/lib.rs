// NES emulator core
//
// Cycle-interleaved emulation of the 6502 CPU and 2C02 PPU sharing a
// memory-mapped bus and a mapper-controlled cartridge. The `Nes` driver
// owns all components and exposes cycle, instruction, and frame stepping.

// Public modules
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod nes;
pub mod ppu;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export main types for convenience
pub use bus::Bus;
pub use cartridge::{
    Cartridge, INesError, INesHeader, Mapper, MapperError, Mirroring, NametableIndex,
};
pub use cpu::Cpu;
pub use nes::{FrameSink, Nes, NesConfig, NesError, SaveState, SaveStateError};
pub use ppu::Ppu;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        // All core components can be instantiated standalone
        let _cpu = Cpu::new();
        let _ppu = Ppu::new();
        let _bus = Bus::new();
        let _nes = Nes::with_config(NesConfig::default());
    }
}
