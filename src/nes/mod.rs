// NES driver - owns every component and advances the master clock
//
// The driver holds the CPU, the CPU bus, and shared handles to the PPU and
// the cartridge mapper. One master tick clocks the PPU; every third tick
// clocks the CPU, which is how the 2C02 and 2A03 divide the master clock on
// real hardware. Within a tick the PPU always steps first, so a CPU read in
// the same tick sees the PPU's updated state.
//
// NMI: the PPU raises a pending flag at scanline 241, dot 1. The driver
// delivers it to the CPU at the next instruction boundary, before the next
// opcode fetch.

mod config;
mod save_state;

pub use config::NesConfig;
pub use save_state::{SaveState, SaveStateError};

use crate::bus::Bus;
use crate::cartridge::{create_mapper, Cartridge, INesError, Mapper, MapperError};
use crate::cpu::Cpu;
use crate::ppu::Ppu;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Sink for finished frames.
///
/// The embedding harness implements this; the driver calls it once per
/// frame at VBlank start with the 256x240 `0xRRGGBB` framebuffer.
pub trait FrameSink {
    fn present_frame(&mut self, frame: &[u32]);
}

/// Error type for driver initialization
#[derive(Debug)]
pub enum NesError {
    /// The ROM file could not be loaded or parsed
    Cartridge(INesError),
    /// The cartridge uses an unsupported or inconsistent mapper
    Mapper(MapperError),
}

impl std::fmt::Display for NesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NesError::Cartridge(e) => write!(f, "cartridge error: {}", e),
            NesError::Mapper(e) => write!(f, "mapper error: {}", e),
        }
    }
}

impl std::error::Error for NesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NesError::Cartridge(e) => Some(e),
            NesError::Mapper(e) => Some(e),
        }
    }
}

impl From<INesError> for NesError {
    fn from(e: INesError) -> Self {
        NesError::Cartridge(e)
    }
}

impl From<MapperError> for NesError {
    fn from(e: MapperError) -> Self {
        NesError::Mapper(e)
    }
}

/// The console: CPU, PPU, buses, cartridge, and the master clock.
pub struct Nes {
    cpu: Cpu,
    bus: Bus,
    ppu: Rc<RefCell<Ppu>>,
    mapper: Option<Rc<RefCell<Box<dyn Mapper>>>>,

    /// Master clock tick count; the CPU runs on every third tick
    system_clock: u64,

    config: NesConfig,
    frame_sink: Option<Box<dyn FrameSink>>,
}

impl Nes {
    /// Create a console with no cartridge inserted.
    pub fn new() -> Self {
        Self::with_config(NesConfig::load_or_default())
    }

    /// Create a console with explicit configuration.
    pub fn with_config(config: NesConfig) -> Self {
        let bus = Bus::new();
        let ppu = bus.ppu();
        let mut cpu = Cpu::new();
        cpu.log_illegal_opcodes = config.log_illegal_opcodes;

        Nes {
            cpu,
            bus,
            ppu,
            mapper: None,
            system_clock: 0,
            config,
            frame_sink: None,
        }
    }

    /// Load a ROM file, build its mapper, and power the console on.
    ///
    /// # Errors
    /// `NesError::Cartridge` for unreadable or malformed images,
    /// `NesError::Mapper` for unsupported mappers.
    pub fn insert_cartridge<P: AsRef<Path>>(&mut self, path: P) -> Result<(), NesError> {
        let cartridge = Cartridge::from_ines_file(path)?;
        self.insert_parsed_cartridge(cartridge)
    }

    /// Load a ROM from an in-memory iNES image.
    pub fn insert_cartridge_bytes(&mut self, data: &[u8]) -> Result<(), NesError> {
        let cartridge = Cartridge::from_ines_bytes(data)?;
        self.insert_parsed_cartridge(cartridge)
    }

    fn insert_parsed_cartridge(&mut self, cartridge: Cartridge) -> Result<(), NesError> {
        let mapper: Rc<RefCell<Box<dyn Mapper>>> = Rc::new(RefCell::new(create_mapper(cartridge)?));
        self.bus.attach_mapper(Rc::clone(&mapper));
        self.mapper = Some(mapper);

        self.power_on();
        Ok(())
    }

    /// Power-on sequence: both cores to their power-on state, then the
    /// reset vector is taken.
    fn power_on(&mut self) {
        self.system_clock = 0;
        self.ppu.borrow_mut().power_on();
        self.cpu.power_on(&mut self.bus);
        self.cpu.reset(&mut self.bus);
    }

    /// Reset signal, as from the console's reset button.
    pub fn reset(&mut self) {
        self.system_clock = 0;
        self.ppu.borrow_mut().reset();
        self.cpu.reset(&mut self.bus);
    }

    /// Provide a sink for finished frames.
    pub fn set_frame_sink(&mut self, sink: Box<dyn FrameSink>) {
        self.frame_sink = Some(sink);
    }

    // ========================================
    // Clocking primitives
    // ========================================

    /// Advance one master tick: the PPU clocks every tick, the CPU every
    /// third.
    pub fn clock_cycle(&mut self) {
        self.system_clock += 1;

        self.ppu.borrow_mut().clock();
        self.flush_frame_if_complete();

        if self.system_clock % 3 == 0 {
            // Pending NMIs are delivered at instruction boundaries, before
            // the next opcode fetch
            if self.cpu.is_instruction_boundary() && self.ppu.borrow_mut().take_nmi() {
                self.cpu.nmi(&mut self.bus);
            }

            if self.config.trace_cpu && self.cpu.is_instruction_boundary() {
                log::trace!("{}", self.cpu.trace(&self.bus));
            }

            self.cpu.clock(&mut self.bus);
        }
    }

    /// Clock until the CPU reports an instruction has executed.
    pub fn clock_instruction(&mut self) {
        loop {
            self.system_clock += 1;

            self.ppu.borrow_mut().clock();
            self.flush_frame_if_complete();

            if self.system_clock % 3 == 0 {
                if self.cpu.is_instruction_boundary() && self.ppu.borrow_mut().take_nmi() {
                    self.cpu.nmi(&mut self.bus);
                }

                if self.config.trace_cpu && self.cpu.is_instruction_boundary() {
                    log::trace!("{}", self.cpu.trace(&self.bus));
                }

                if self.cpu.clock(&mut self.bus) {
                    break;
                }
            }
        }
    }

    /// Clock until the PPU crosses into VBlank: the `(241, 0)` transition.
    pub fn clock_frame(&mut self) {
        loop {
            self.clock_cycle();
            let ppu = self.ppu.borrow();
            if ppu.scanline() == 241 && ppu.cycle() == 0 {
                break;
            }
        }
    }

    fn flush_frame_if_complete(&mut self) {
        if self.ppu.borrow_mut().take_frame_complete() {
            if let Some(sink) = &mut self.frame_sink {
                sink.present_frame(self.ppu.borrow().frame());
            }
        }
    }

    // ========================================
    // Diagnostics
    // ========================================

    /// CPU state, read-only.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// CPU state, mutable (test scaffolding and debuggers).
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Shared handle to the PPU.
    pub fn ppu(&self) -> Rc<RefCell<Ppu>> {
        Rc::clone(&self.ppu)
    }

    /// The CPU bus, mutable (test scaffolding and debuggers).
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// The CPU bus, read-only.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Master clock ticks since power-on.
    pub fn system_clock(&self) -> u64 {
        self.system_clock
    }

    /// Active configuration.
    pub fn config(&self) -> &NesConfig {
        &self.config
    }
}

impl Default for Nes {
    fn default() -> Self {
        Self::new()
    }
}
