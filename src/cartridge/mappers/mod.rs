// Mappers module - cartridge mapper implementations
//
// Contains the mapper factory and the individual mapper implementations.
// Each mapper decodes the cartridge portions of the CPU and PPU address
// spaces and controls nametable mirroring.

mod mapper0;

pub use mapper0::Mapper0;

use super::{Cartridge, Mapper};

/// Error type for mapper creation
#[derive(Debug)]
pub enum MapperError {
    /// The requested mapper number is not supported
    UnsupportedMapper(u8),
    /// Invalid cartridge configuration for the mapper
    InvalidConfiguration(String),
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperError::UnsupportedMapper(num) => {
                write!(f, "mapper {} is not supported", num)
            }
            MapperError::InvalidConfiguration(msg) => {
                write!(f, "invalid mapper configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for MapperError {}

/// Create a mapper for a loaded cartridge.
///
/// The mapper number comes from the iNES header. The cartridge is consumed:
/// its PRG/CHR payloads move into the mapper.
///
/// # Errors
/// `MapperError::UnsupportedMapper` for unimplemented mapper numbers,
/// `MapperError::InvalidConfiguration` if the payload sizes do not fit the
/// mapper.
pub fn create_mapper(cartridge: Cartridge) -> Result<Box<dyn Mapper>, MapperError> {
    match cartridge.header.mapper {
        0 => Ok(Box::new(Mapper0::new(cartridge)?)),
        num => Err(MapperError::UnsupportedMapper(num)),
    }
}
