// Save states - JSON snapshots of the complete core state
//
// A snapshot captures everything the guest can observe: CPU registers, work
// RAM, the PPU register file and memories, and the master clock. The PPU's
// per-tile pipeline latches are regenerated every scanline and are not part
// of a snapshot.

use super::Nes;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Error type for save-state operations
#[derive(Debug)]
pub enum SaveStateError {
    /// File could not be read or written
    Io(io::Error),
    /// Snapshot could not be encoded or decoded
    Format(serde_json::Error),
    /// Snapshot does not fit the running machine
    Incompatible(String),
}

impl std::fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveStateError::Io(e) => write!(f, "save state I/O error: {}", e),
            SaveStateError::Format(e) => write!(f, "save state format error: {}", e),
            SaveStateError::Incompatible(msg) => {
                write!(f, "incompatible save state: {}", msg)
            }
        }
    }
}

impl std::error::Error for SaveStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveStateError::Io(e) => Some(e),
            SaveStateError::Format(e) => Some(e),
            SaveStateError::Incompatible(_) => None,
        }
    }
}

impl From<io::Error> for SaveStateError {
    fn from(e: io::Error) -> Self {
        SaveStateError::Io(e)
    }
}

impl From<serde_json::Error> for SaveStateError {
    fn from(e: serde_json::Error) -> Self {
        SaveStateError::Format(e)
    }
}

/// CPU register snapshot
#[derive(Debug, Serialize, Deserialize)]
struct CpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: u8,
    cycles: u64,
    cycles_remaining: u32,
}

/// PPU snapshot: register file, scroll internals, memories, and timing
#[derive(Debug, Serialize, Deserialize)]
struct PpuState {
    ctrl: u8,
    mask: u8,
    status: u8,
    oam_addr: u8,
    v: u16,
    t: u16,
    fine_x: u8,
    write_latch: bool,
    read_buffer: u8,
    nametables: Vec<u8>,
    palette_ram: Vec<u8>,
    oam: Vec<u8>,
    scanline: i16,
    cycle: u16,
    even_frame: bool,
}

/// Complete core snapshot
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveState {
    cpu: CpuState,
    ram: Vec<u8>,
    ppu: PpuState,
    system_clock: u64,
}

impl SaveState {
    /// Capture the current state of a console.
    pub fn from_nes(nes: &Nes) -> Self {
        let ppu = nes.ppu.borrow();

        SaveState {
            cpu: CpuState {
                a: nes.cpu.a,
                x: nes.cpu.x,
                y: nes.cpu.y,
                sp: nes.cpu.sp,
                pc: nes.cpu.pc,
                status: nes.cpu.status,
                cycles: nes.cpu.cycles,
                cycles_remaining: nes.cpu.cycles_remaining,
            },
            ram: nes.bus.ram().to_vec(),
            ppu: PpuState {
                ctrl: ppu.ctrl,
                mask: ppu.mask,
                status: ppu.status,
                oam_addr: ppu.oam_addr,
                v: ppu.v,
                t: ppu.t,
                fine_x: ppu.fine_x,
                write_latch: ppu.write_latch,
                read_buffer: ppu.read_buffer,
                nametables: ppu.nametables.to_vec(),
                palette_ram: ppu.palette_ram.to_vec(),
                oam: ppu.oam.to_vec(),
                scanline: ppu.scanline,
                cycle: ppu.cycle,
                even_frame: ppu.even_frame,
            },
            system_clock: nes.system_clock,
        }
    }

    /// Restore this snapshot into a console.
    ///
    /// # Errors
    /// `SaveStateError::Incompatible` if any memory block has the wrong
    /// size.
    pub fn restore_to(&self, nes: &mut Nes) -> Result<(), SaveStateError> {
        let ram = nes.bus.ram_mut();
        if self.ram.len() != ram.len() {
            return Err(SaveStateError::Incompatible(format!(
                "RAM size {} != {}",
                self.ram.len(),
                ram.len()
            )));
        }
        ram.copy_from_slice(&self.ram);

        {
            let mut ppu = nes.ppu.borrow_mut();
            if self.ppu.nametables.len() != ppu.nametables.len()
                || self.ppu.palette_ram.len() != ppu.palette_ram.len()
                || self.ppu.oam.len() != ppu.oam.len()
            {
                return Err(SaveStateError::Incompatible(
                    "PPU memory sizes do not match".to_string(),
                ));
            }

            ppu.ctrl = self.ppu.ctrl;
            ppu.mask = self.ppu.mask;
            ppu.status = self.ppu.status;
            ppu.oam_addr = self.ppu.oam_addr;
            ppu.v = self.ppu.v;
            ppu.t = self.ppu.t;
            ppu.fine_x = self.ppu.fine_x;
            ppu.write_latch = self.ppu.write_latch;
            ppu.read_buffer = self.ppu.read_buffer;
            ppu.nametables.copy_from_slice(&self.ppu.nametables);
            ppu.palette_ram.copy_from_slice(&self.ppu.palette_ram);
            ppu.oam.copy_from_slice(&self.ppu.oam);
            ppu.scanline = self.ppu.scanline;
            ppu.cycle = self.ppu.cycle;
            ppu.even_frame = self.ppu.even_frame;
        }

        nes.cpu.a = self.cpu.a;
        nes.cpu.x = self.cpu.x;
        nes.cpu.y = self.cpu.y;
        nes.cpu.sp = self.cpu.sp;
        nes.cpu.pc = self.cpu.pc;
        nes.cpu.status = self.cpu.status;
        nes.cpu.cycles = self.cpu.cycles;
        nes.cpu.cycles_remaining = self.cpu.cycles_remaining;

        nes.system_clock = self.system_clock;

        Ok(())
    }

    /// Write the snapshot to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveStateError> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read a snapshot back from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SaveStateError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Nes {
    /// Snapshot the current state.
    pub fn save_state(&self) -> SaveState {
        SaveState::from_nes(self)
    }

    /// Restore a previously captured snapshot.
    pub fn load_state(&mut self, state: &SaveState) -> Result<(), SaveStateError> {
        state.restore_to(self)
    }
}
