/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored big-endian. Their behavior is cased on some
/// combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub raw: u16,
    pub nibbles: (u8, u8, u8, u8),
}

impl Instruction {
    /// Combine two fetched bytes, high byte first
    pub fn decode(bytes: [u8; 2]) -> Self {
        let [high, low] = bytes;
        Instruction {
            raw: u16::from(high) << 8 | u16::from(low),
            nibbles: (high >> 4, high & 0x0F, low >> 4, low & 0x0F),
        }
    }

    /// The Opcode's second nibble.
    /// `[_x__]`
    pub fn x(&self) -> u8 {
        self.nibbles.1
    }

    /// The Opcode's third nibble.
    /// `[__y_]`
    pub fn y(&self) -> u8 {
        self.nibbles.2
    }

    /// The Opcode's fourth nibble.
    /// `[___n]`
    pub fn n(&self) -> u8 {
        self.nibbles.3
    }

    /// The Opcode's least significant byte.
    /// `[__kk]`
    pub fn kk(&self) -> u8 {
        (self.raw & 0x00FF) as u8
    }

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    pub fn addr(&self) -> u16 {
        self.raw & 0x0FFF
    }
}

impl From<u16> for Instruction {
    fn from(raw: u16) -> Self {
        Instruction::decode(raw.to_be_bytes())
    }
}
