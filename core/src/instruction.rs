use crate::error::Chip8Error;
use crate::opcode::Instruction;
use crate::operations::*;
use crate::ports::Keyboard;
use crate::state::State;

/// What the interpreter has to do once an operation has run
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Continue,
    /// The frame buffer changed
    Render,
    /// The host went away while the program was waiting on it
    Halt,
}

pub type Outcome = Result<Effect, Chip8Error>;

/// An operation mutates the state in place. The program counter has already
/// been moved past the instruction by the time it runs.
pub type Operation =
    fn(op: &Instruction, state: &mut State, keyboard: &mut dyn Keyboard) -> Outcome;

/// Selects the correct Operation for a given Instruction, or `None` if the
/// instruction isn't part of the instruction set
pub fn from_op(op: &Instruction) -> Option<Operation> {
    let operation: Operation = match op.nibbles {
        (0x0, 0x0, 0xE, 0x0) => clr,
        (0x0, 0x0, 0xE, 0xE) => rts,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, .., 0x0) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, .., 0x0) => mv,
        (0x8, .., 0x1) => or,
        (0x8, .., 0x2) => and,
        (0x8, .., 0x3) => xor,
        (0x8, .., 0x4) => addr,
        (0x8, .., 0x5) => sub,
        (0x8, .., 0x6) => shr,
        (0x8, .., 0x7) => subn,
        (0x8, .., 0xE) => shl,
        (0x9, .., 0x0) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rand,
        (0xD, ..) => draw,
        (0xE, _, 0x9, 0xE) => skpr,
        (0xE, _, 0xA, 0x1) => skup,
        (0xF, _, 0x0, 0x7) => moved,
        (0xF, _, 0x0, 0xA) => keyd,
        (0xF, _, 0x1, 0x5) => loads,
        (0xF, _, 0x1, 0x8) => ld,
        (0xF, _, 0x1, 0xE) => addi,
        (0xF, _, 0x2, 0x9) => ldspr,
        (0xF, _, 0x3, 0x3) => bcd,
        (0xF, _, 0x5, 0x5) => stor,
        (0xF, _, 0x6, 0x5) => read,
        _ => return None,
    };
    Some(operation)
}

#[cfg(test)]
mod test_instruction {
    use super::*;
    use crate::config::Quirks;
    use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

    /// A keypad with a fixed set of keys held and a fixed answer for waits
    struct Keypad {
        held: [bool; 16],
        next: Option<u8>,
    }

    impl Keypad {
        fn new() -> Self {
            Keypad {
                held: [false; 16],
                next: None,
            }
        }

        fn holding(key: u8) -> Self {
            let mut keypad = Keypad::new();
            keypad.held[key as usize] = true;
            keypad
        }
    }

    impl Keyboard for Keypad {
        fn is_down(&mut self, key: u8) -> bool {
            self.held[key as usize]
        }

        fn wait_for_key(&mut self) -> Option<u8> {
            self.next
        }
    }

    fn execute_with(op: u16, state: &mut State, keypad: &mut Keypad) -> Effect {
        let op = Instruction::from(op);
        let operation = from_op(&op).expect("opcode should be implemented");
        operation(&op, state, keypad).expect("operation should succeed")
    }

    fn execute(op: u16, state: &mut State) -> Effect {
        execute_with(op, state, &mut Keypad::new())
    }

    #[test]
    fn test_unknown_opcodes() {
        let ops: [u16; 11] = [
            0x0000, 0x0123, 0x00E1, 0x5121, 0x8128, 0x812F, 0x9121, 0xE19F, 0xE1A2, 0xF100, 0xF1FF,
        ];
        for op in ops {
            assert!(from_op(&Instruction::from(op)).is_none(), "{:04X}", op);
        }
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.frame_buffer.draw_sprite(0, 0, &[0x80]);
        let effect = execute(0x00E0, &mut state);
        assert!(state.frame_buffer.is_blank());
        assert_eq!(effect, Effect::Render);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::new();
        state.push(0xABC).unwrap();
        execute(0x00EE, &mut state);
        assert_eq!(state.sp, 0x0);
        assert_eq!(state.pc, 0xABC);
    }

    #[test]
    fn test_00ee_ret_empty_stack() {
        let mut state = State::new();
        let op = Instruction::from(0x00EE_u16);
        let result = from_op(&op).unwrap()(&op, &mut state, &mut Keypad::new());
        assert!(matches!(result, Err(Chip8Error::StackUnderflow { .. })));
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::new();
        execute(0x1ABC, &mut state);
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = State::new();
        state.pc = 0x0ABC;
        execute(0x2123, &mut state);
        assert_eq!(state.sp, 0x1);
        assert_eq!(state.stack[0], 0x0ABC);
        assert_eq!(state.pc, 0x0123);
    }

    #[test]
    fn test_2nnn_call_then_ret() {
        let mut state = State::new();
        state.pc = 0x0202;
        execute(0x2400, &mut state);
        execute(0x00EE, &mut state);
        assert_eq!(state.pc, 0x0202);
        assert_eq!(state.sp, 0x0);
    }

    #[test]
    fn test_3xkk_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        execute(0x3111, &mut state);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_3xkk_se_doesntskip() {
        let mut state = State::new();
        execute(0x3111, &mut state);
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_4xkk_sne_skips() {
        let mut state = State::new();
        execute(0x4111, &mut state);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_4xkk_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        execute(0x4111, &mut state);
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        execute(0x5120, &mut state);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        execute(0x5120, &mut state);
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_6xkk_ld() {
        let mut state = State::new();
        execute(0x6122, &mut state);
        assert_eq!(state.v[0x1], 0x22);
    }

    #[test]
    fn test_7xkk_add() {
        let mut state = State::new();
        state.v[0x1] = 0x1;
        execute(0x7122, &mut state);
        assert_eq!(state.v[0x1], 0x23);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        execute(0x7102, &mut state);
        assert_eq!(state.v[0x1], 0x01);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::new();
        state.v[0x2] = 0x1;
        execute(0x8120, &mut state);
        assert_eq!(state.v[0x1], 0x1);
    }

    #[test]
    fn test_8xy1_or() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        execute(0x8121, &mut state);
        assert_eq!(state.v[0x1], 0x7);
    }

    #[test]
    fn test_8xy2_and() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        execute(0x8122, &mut state);
        assert_eq!(state.v[0x1], 0x2);
    }

    #[test]
    fn test_8xy3_xor() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        execute(0x8123, &mut state);
        assert_eq!(state.v[0x1], 0x5);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = State::new();
        state.v[0x1] = 10;
        state.v[0x2] = 5;
        execute(0x8124, &mut state);
        assert_eq!(state.v[0x1], 15);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = State::new();
        state.v[0x1] = 250;
        state.v[0x2] = 10;
        execute(0x8124, &mut state);
        assert_eq!(state.v[0x1], 4);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x33;
        state.v[0x2] = 0x11;
        execute(0x8125, &mut state);
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = State::new();
        state.v[0x1] = 5;
        state.v[0x2] = 10;
        execute(0x8125, &mut state);
        assert_eq!(state.v[0x1], 251);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy5_sub_equal_clears_flag() {
        let mut state = State::new();
        state.v[0x1] = 7;
        state.v[0x2] = 7;
        state.v[0xF] = 1;
        execute(0x8125, &mut state);
        assert_eq!(state.v[0x1], 0);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy6_shr_lsb() {
        let mut state = State::new();
        state.v[0x1] = 0x5;
        execute(0x8106, &mut state);
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_nolsb() {
        let mut state = State::new();
        state.v[0x1] = 0x4;
        execute(0x8106, &mut state);
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy7_subn_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        execute(0x8127, &mut state);
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        execute(0x8127, &mut state);
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_msb() {
        let mut state = State::new();
        state.v[0x1] = 0x81;
        execute(0x810E, &mut state);
        assert_eq!(state.v[0x1], 0x02);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xye_shl_nomsb() {
        let mut state = State::new();
        state.v[0x1] = 0x08;
        execute(0x810E, &mut state);
        assert_eq!(state.v[0x1], 0x10);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_bit3_quirk() {
        let mut state = State::with_quirks(Quirks {
            shift_left_bit3: true,
            ..Quirks::default()
        });
        state.v[0x1] = 0x08;
        execute(0x810E, &mut state);
        assert_eq!(state.v[0x1], 0x10);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy4_flag_register_as_operand() {
        let mut state = State::new();
        state.v[0xF] = 0xFF;
        state.v[0x1] = 0x02;
        execute(0x8F14, &mut state);
        assert_eq!(state.v[0xF], 0x01);
    }

    #[test]
    fn test_9xy0_sne_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        execute(0x9120, &mut state);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_9xy0_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        execute(0x9120, &mut state);
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::new();
        execute(0xAABC, &mut state);
        assert_eq!(state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::new();
        state.v[0x0] = 0x2;
        execute(0xBABC, &mut state);
        assert_eq!(state.pc, 0xABE);
    }

    #[test]
    fn test_cxkk_rnd_masks() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        execute(0xC100, &mut state);
        assert_eq!(state.v[0x1], 0x00);
        execute(0xC10F, &mut state);
        assert_eq!(state.v[0x1] & 0xF0, 0x00);
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = State::new();
        state.v[0x0] = 0x1;
        // Draw the 0x0 sprite with a 1x 1y offset
        let effect = execute(0xD005, &mut state);
        assert_eq!(effect, Effect::Render);
        let mut expected = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        expected[1][1..5].copy_from_slice(&[1, 1, 1, 1]);
        expected[2][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[3][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[4][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[5][1..5].copy_from_slice(&[1, 1, 1, 1]);
        assert!(state
            .frame_buffer
            .rows()
            .zip(expected.iter())
            .all(|(a, b)| a[..] == b[..]));
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = State::new();
        state.frame_buffer.draw_sprite(0, 0, &[0x80]);
        execute(0xD001, &mut state);
        assert_eq!(state.v[0xF], 0x1)
    }

    #[test]
    fn test_dxyn_drw_twice_restores() {
        let mut state = State::new();
        state.v[0x4] = 30;
        state.v[0xA] = 12;
        state.i = 0x00A;
        execute(0xD4A3, &mut state);
        assert_eq!(state.v[0xF], 0x0);
        assert!(!state.frame_buffer.is_blank());
        execute(0xD4A3, &mut state);
        assert_eq!(state.v[0xF], 0x1);
        assert!(state.frame_buffer.is_blank());
    }

    #[test]
    fn test_dxyn_drw_wraps_position() {
        let mut state = State::new();
        state.v[0x0] = 66;
        state.v[0x1] = 3;
        execute(0xD011, &mut state);
        assert!(state.frame_buffer.pixel(2, 3));
    }

    #[test]
    fn test_dxyn_drw_clips_sprite() {
        let mut state = State::new();
        state.v[0x0] = 62;
        state.v[0x1] = 30;
        state.i = 0x300;
        state.memory.write_range(0x300, &[0xFF, 0xFF, 0xFF]);
        execute(0xD013, &mut state);
        assert!(state.frame_buffer.pixel(62, 30));
        assert!(state.frame_buffer.pixel(63, 31));
        assert!(!state.frame_buffer.pixel(0, 30));
        assert!(!state.frame_buffer.pixel(62, 0));
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut state = State::new();
        state.v[0x1] = 0xE;
        execute_with(0xE19E, &mut state, &mut Keypad::holding(0xE));
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_ex9e_skp_doesntskip() {
        let mut state = State::new();
        execute(0xE19E, &mut state);
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_ex9e_skp_ignores_keys_off_the_keypad() {
        let mut state = State::new();
        state.v[0x1] = 0x1E;
        execute_with(0xE19E, &mut state, &mut Keypad::holding(0xE));
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let mut state = State::new();
        execute(0xE1A1, &mut state);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_exa1_sknp_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0xE;
        execute_with(0xE1A1, &mut state, &mut Keypad::holding(0xE));
        assert_eq!(state.pc, 0x0200);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = State::new();
        state.delay_timer = 0xF;
        execute(0xF107, &mut state);
        assert_eq!(state.v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_ld_stores_key() {
        let mut state = State::new();
        let mut keypad = Keypad::new();
        keypad.next = Some(0x7);
        let effect = execute_with(0xF10A, &mut state, &mut keypad);
        assert_eq!(effect, Effect::Continue);
        assert_eq!(state.v[0x1], 0x7);
    }

    #[test]
    fn test_fx0a_ld_halts_when_host_closes() {
        let mut state = State::new();
        let effect = execute(0xF10A, &mut state);
        assert_eq!(effect, Effect::Halt);
        assert_eq!(state.v[0x1], 0x0);
    }

    #[test]
    fn test_fx15_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        execute(0xF115, &mut state);
        assert_eq!(state.delay_timer, 0xF);
    }

    #[test]
    fn test_fx18_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        execute(0xF118, &mut state);
        assert_eq!(state.sound_timer, 0xF);
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = State::new();
        state.i = 0x1;
        state.v[0x1] = 0x1;
        execute(0xF11E, &mut state);
        assert_eq!(state.i, 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::new();
        state.v[0x1] = 0x2;
        execute(0xF129, &mut state);
        assert_eq!(state.i, 0x2);
    }

    #[test]
    fn test_fx29_ld_scaled() {
        let mut state = State::with_quirks(Quirks {
            scaled_font_index: true,
            ..Quirks::default()
        });
        state.v[0x1] = 0x2;
        execute(0xF129, &mut state);
        assert_eq!(state.i, 0xA);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = State::new();
        state.v[0x1] = 234;
        state.i = 0x300;
        execute(0xF133, &mut state);
        assert_eq!(state.memory.read_range(0x300, 3), vec![2, 3, 4]);
    }

    #[test]
    fn test_fx_55_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.v[0x0..0x5].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        execute(0xF455, &mut state);
        assert_eq!(
            state.memory.read_range(0x300, 6),
            vec![0x1, 0x2, 0x3, 0x4, 0x5, 0x0]
        );
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx_65_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory.write_range(0x300, &[0x1, 0x2, 0x3, 0x4, 0x5, 0x6]);
        execute(0xF465, &mut state);
        assert_eq!(state.v[0x0..0x6], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
    }

    #[test]
    fn test_fx55_fx65_round_trip() {
        let mut state = State::new();
        let registers: [u8; 16] = [9, 250, 3, 0, 77, 128, 1, 2, 3, 4, 5, 6, 7, 8, 255, 42];
        state.v = registers;
        state.i = 0x400;
        execute(0xFF55, &mut state);
        state.v = [0; 16];
        execute(0xFF65, &mut state);
        assert_eq!(state.v, registers);
    }
}
