use crate::constants::{DISPLAY_WIDTH, FLAG_REGISTER, KEY_COUNT, SPRITE_SHEET_ADDR, SPRITE_SIZE};
use crate::instruction::{Effect, Outcome};
use crate::opcode::Instruction;
use crate::ports::Keyboard;
use crate::state::State;

/// clear
pub fn clr(_op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.frame_buffer.clear();
    Ok(Effect::Render)
}

/// PC = STACK.pop()
pub fn rts(_op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.pc = state.pop()?;
    Ok(Effect::Continue)
}

/// PC = addr
pub fn jump(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.pc = op.addr();
    Ok(Effect::Continue)
}

/// STACK.push(PC); PC = addr
pub fn call(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.push(state.pc)?;
    state.pc = op.addr();
    Ok(Effect::Continue)
}

/// Skip the next instruction if `condition` holds
fn skip_if(state: &mut State, condition: bool) -> Outcome {
    if condition {
        state.pc = state.pc.wrapping_add(0x2);
    }
    Ok(Effect::Continue)
}

/// if Vx == kk then pc += 2
pub fn ske(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let condition = state.vx(op.x()) == op.kk();
    skip_if(state, condition)
}

/// if Vx != kk then pc += 2
pub fn skne(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let condition = state.vx(op.x()) != op.kk();
    skip_if(state, condition)
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let condition = state.vx(op.x()) == state.vx(op.y());
    skip_if(state, condition)
}

/// Vx = kk
pub fn load(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.v[op.x() as usize] = op.kk();
    Ok(Effect::Continue)
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let x = op.x() as usize;
    state.v[x] = state.v[x].wrapping_add(op.kk());
    Ok(Effect::Continue)
}

/// Vx = Vy
pub fn mv(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.v[op.x() as usize] = state.vx(op.y());
    Ok(Effect::Continue)
}

/// Vx |= Vy
pub fn or(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.v[op.x() as usize] |= state.vx(op.y());
    Ok(Effect::Continue)
}

/// Vx &= Vy
pub fn and(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.v[op.x() as usize] &= state.vx(op.y());
    Ok(Effect::Continue)
}

/// Vx ^= Vy
pub fn xor(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.v[op.x() as usize] ^= state.vx(op.y());
    Ok(Effect::Continue)
}

// The flag is written before the result for all of the 8xy_ operations that
// set it, so with x == F the result wins.

/// Vx += Vy; VF = overflow
pub fn addr(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let (res, over) = state.vx(op.x()).overflowing_add(state.vx(op.y()));
    state.v[FLAG_REGISTER] = u8::from(over);
    state.v[op.x() as usize] = res;
    Ok(Effect::Continue)
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let (vx, vy) = (state.vx(op.x()), state.vx(op.y()));
    state.v[FLAG_REGISTER] = u8::from(vx > vy);
    state.v[op.x() as usize] = vx.wrapping_sub(vy);
    Ok(Effect::Continue)
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let vx = state.vx(op.x());
    state.v[FLAG_REGISTER] = vx & 0x1;
    state.v[op.x() as usize] = vx >> 1;
    Ok(Effect::Continue)
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let (vx, vy) = (state.vx(op.x()), state.vx(op.y()));
    state.v[FLAG_REGISTER] = u8::from(vy > vx);
    state.v[op.x() as usize] = vy.wrapping_sub(vx);
    Ok(Effect::Continue)
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let vx = state.vx(op.x());
    let flag_bit = if state.quirks.shift_left_bit3 { 3 } else { 7 };
    state.v[FLAG_REGISTER] = (vx >> flag_bit) & 0x1;
    state.v[op.x() as usize] = vx << 1;
    Ok(Effect::Continue)
}

/// if Vx != Vy then pc +=2
pub fn skrne(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let condition = state.vx(op.x()) != state.vx(op.y());
    skip_if(state, condition)
}

/// I = addr
pub fn loadi(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.i = op.addr();
    Ok(Effect::Continue)
}

/// PC = V0 + addr
pub fn jumpi(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.pc = op.addr() + u16::from(state.v[0x0]);
    Ok(Effect::Continue)
}

/// Vx = rand_byte & kk
pub fn rand(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let rand_byte: u8 = rand::random();
    state.v[op.x() as usize] = rand_byte & op.kk();
    Ok(Effect::Continue)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer.
/// The position wraps but the sprite itself is clipped at the edges.
/// Both coordinates wrap modulo the display width; a y past the bottom row
/// draws nothing.
/// Sets VF if any pixels were erased
pub fn draw(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let x = state.vx(op.x()) as usize % DISPLAY_WIDTH;
    let y = state.vx(op.y()) as usize % DISPLAY_WIDTH;
    let sprite = state.memory.read_range(state.i, op.n() as usize);

    let collision = state.frame_buffer.draw_sprite(x, y, &sprite);
    state.v[FLAG_REGISTER] = u8::from(collision);
    Ok(Effect::Render)
}

/// Whether the key named by Vx is held. Values outside the keypad never are.
fn key_down(op: &Instruction, state: &State, keyboard: &mut dyn Keyboard) -> bool {
    let key = state.vx(op.x());
    key < KEY_COUNT && keyboard.is_down(key)
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &Instruction, state: &mut State, keyboard: &mut dyn Keyboard) -> Outcome {
    let condition = key_down(op, state, keyboard);
    skip_if(state, condition)
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &Instruction, state: &mut State, keyboard: &mut dyn Keyboard) -> Outcome {
    let condition = !key_down(op, state, keyboard);
    skip_if(state, condition)
}

/// Vx = DT
pub fn moved(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.v[op.x() as usize] = state.delay_timer;
    Ok(Effect::Continue)
}

/// await keypress for Vx
/// Halts if the host goes away before a key arrives
pub fn keyd(op: &Instruction, state: &mut State, keyboard: &mut dyn Keyboard) -> Outcome {
    match keyboard.wait_for_key() {
        Some(key) => {
            state.v[op.x() as usize] = key;
            Ok(Effect::Continue)
        }
        None => Ok(Effect::Halt),
    }
}

/// DT = Vx
pub fn loads(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.delay_timer = state.vx(op.x());
    Ok(Effect::Continue)
}

/// ST = Vx
pub fn ld(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.sound_timer = state.vx(op.x());
    Ok(Effect::Continue)
}

/// I += Vx
pub fn addi(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    state.i = state.i.wrapping_add(u16::from(state.vx(op.x())));
    Ok(Effect::Continue)
}

/// I = Vx
/// Set I for the sprite for digit Vx. The sprite sheet sits at address 0, so
/// unless glyph addresses are scaled this is Vx itself.
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let digit = u16::from(state.vx(op.x()));
    state.i = if state.quirks.scaled_font_index {
        SPRITE_SHEET_ADDR + digit * SPRITE_SIZE
    } else {
        SPRITE_SHEET_ADDR + digit
    };
    Ok(Effect::Continue)
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let vx = state.vx(op.x());
    let bcd = [vx / 100, vx / 10 % 10, vx % 10];
    state.memory.write_range(state.i, &bcd);
    Ok(Effect::Continue)
}

/// mem[I..=I+x] = V0..=Vx
/// Fill memory starting at address i with V0..=Vx
pub fn stor(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let registers = &state.v[0x0..=op.x() as usize];
    state.memory.write_range(state.i, registers);
    Ok(Effect::Continue)
}

/// V0..=Vx = mem[I..=I+x]
/// Fill V0..=Vx with memory starting at address i
pub fn read(op: &Instruction, state: &mut State, _keyboard: &mut dyn Keyboard) -> Outcome {
    let count = op.x() as usize + 1;
    let bytes = state.memory.read_range(state.i, count);
    state.v[0x0..count].copy_from_slice(&bytes);
    Ok(Effect::Continue)
}
