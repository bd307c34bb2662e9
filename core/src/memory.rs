use crate::constants::{
    ADDRESS_MASK, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, SPRITE_SHEET_ADDR,
};
use crate::error::Chip8Error;

/// # Memory
/// 4096 bytes of flat address space.
///
/// ```text
/// 0x000-0x04F  sprite sheet (hexadecimal digits)
/// 0x050-0x1FF  unused, historically the interpreter itself
/// 0x200-0xFFF  program
/// ```
///
/// Accesses driven by the index register wrap around at 12 bits. Only
/// fetching an instruction can fail.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet preloaded
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let start = SPRITE_SHEET_ADDR as usize;
        bytes[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copy a program image into memory at `PROGRAM_START`.
    ///
    /// Images that wouldn't fit are rejected before anything is written.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), Chip8Error> {
        if image.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ImageTooLarge {
                size: image.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Read the two bytes of the instruction at `pc`
    pub fn fetch(&self, pc: u16) -> Result<[u8; 2], Chip8Error> {
        let addr = pc as usize;
        if addr + 1 >= MEMORY_SIZE {
            return Err(Chip8Error::OutOfProgram { pc });
        }
        Ok([self.bytes[addr], self.bytes[addr + 1]])
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDRESS_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & ADDRESS_MASK) as usize] = value;
    }

    /// Read `len` consecutive bytes starting at `addr`, wrapping at the top
    /// of memory
    pub fn read_range(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.read(addr.wrapping_add(offset as u16)))
            .collect()
    }

    /// Write `data` to consecutive addresses starting at `addr`, wrapping at
    /// the top of memory
    pub fn write_range(&mut self, addr: u16, data: &[u8]) {
        for (offset, value) in data.iter().enumerate() {
            self.write(addr.wrapping_add(offset as u16), *value);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
