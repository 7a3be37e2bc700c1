//! Program Loader.
//!
//! This module turns assembly text into an [`InstructionMemory`]. It performs:
//! 1. **Tokenizing:** Strips `#` comments, lower-cases the line and splits it on
//!    spaces, tabs, commas and parentheses. A token ending in `:` is a label.
//! 2. **Decoding:** Checks operand counts and kinds per instruction format and
//!    range-checks immediates.
//! 3. **Label Resolution:** Replaces each branch or jump label with a PC-relative
//!    half-word offset once every label is known.
//!
//! The first instruction sits at PC 4; the whole program must stay below the
//! end of the code segment.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::constants::{INSTRUCTION_SIZE, IMM12_BITS, IMM20_BITS, NUM_REGS, fits_signed};
use crate::common::error::{LoadError, Result, SimError};
use crate::isa::{InstructionMemory, Instruction, OpType, Opcode};

/// Reads and parses a program file.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, or
/// [`SimError::Load`] if its contents are malformed.
pub fn load_program(path: impl AsRef<Path>, code_segment: u64) -> Result<InstructionMemory> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let program = parse_program(&text, code_segment)?;
    debug!(
        path = %path.display(),
        instructions = program.instructions().len(),
        "program loaded"
    );
    Ok(program)
}

/// Reads a whole text file, tagging I/O failures with the path.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses program text into an instruction table.
///
/// # Examples
///
/// ```
/// use pipesim_core::isa::{InstructionSource, Opcode};
/// use pipesim_core::sim::loader::parse_program;
///
/// let program = parse_program(
///     "loop: addi x1, x1, -1   # count down\n\
///      bne x1, x0, loop\n",
///     1024,
/// )
/// .unwrap();
///
/// let bne = program.read(8).unwrap();
/// assert_eq!(bne.opcode, Opcode::Bne);
/// assert_eq!(bne.imm, -2);
/// ```
///
/// # Errors
///
/// Returns the first [`LoadError`] found, tagged with its 1-based line number.
pub fn parse_program(text: &str, code_segment: u64) -> Result<InstructionMemory, LoadError> {
    let mut parser = Parser::new(code_segment);
    for (idx, raw) in text.lines().enumerate() {
        parser.parse_line(raw, idx + 1)?;
    }
    parser.finish()
}

/// Splits a line into operand tokens.
///
/// Separators are dropped; a `:` is kept on the token it terminates.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in line.chars() {
        match c {
            ' ' | '\t' | ',' | '(' | ')' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            ':' => {
                current.push(c);
                tokens.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Parses `x0`..`x31`.
fn parse_register(token: &str) -> Option<usize> {
    let digits = token.strip_prefix('x')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<usize>().ok().filter(|&idx| idx < NUM_REGS)
}

/// Returns `true` for an optionally negative run of decimal digits.
fn is_integer(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Outcome of reading an immediate operand.
enum Imm {
    Value(i64),
    NotANumber,
    Overflow,
}

fn parse_imm(token: &str) -> Imm {
    if !is_integer(token) {
        return Imm::NotANumber;
    }
    token.parse::<i64>().map_or(Imm::Overflow, Imm::Value)
}

/// Program parse state carried across lines.
struct Parser {
    code_segment: u64,
    program: Vec<(Instruction, usize)>,
    labels: HashMap<String, u64>,
}

impl Parser {
    fn new(code_segment: u64) -> Self {
        Self {
            code_segment,
            program: Vec::new(),
            labels: HashMap::new(),
        }
    }

    /// PC of the next instruction appended to the program.
    fn next_pc(&self) -> u64 {
        (self.program.len() as u64 + 1) * INSTRUCTION_SIZE
    }

    fn parse_line(&mut self, raw: &str, line: usize) -> Result<(), LoadError> {
        let code = raw.split('#').next().unwrap_or_default().trim();
        if code.is_empty() {
            return Ok(());
        }
        let code = code.to_lowercase();
        let mut args = tokenize(&code);

        if let Some(label) = args.first().and_then(|t| t.strip_suffix(':')) {
            let pc = self.next_pc();
            let _ = self.labels.entry(label.to_string()).or_insert(pc);
            let _ = args.remove(0);
        }
        if args.is_empty() {
            return Ok(());
        }

        let pc = self.next_pc();
        if pc >= self.code_segment {
            return Err(LoadError::ProgramTooLarge { line });
        }

        let mut inst = decode(&args, &code, line)?;
        inst.pc = pc;
        self.program.push((inst, line));
        Ok(())
    }

    /// Resolves labels and builds the instruction table.
    fn finish(mut self) -> Result<InstructionMemory, LoadError> {
        for (inst, line) in &mut self.program {
            let bits = match inst.opcode.op_type() {
                OpType::Sb => IMM12_BITS,
                OpType::Uj => IMM20_BITS,
                _ => continue,
            };
            let label = inst.label.clone().unwrap_or_default();
            let target = self
                .labels
                .get(&label)
                .copied()
                .ok_or_else(|| LoadError::UnknownLabel {
                    label: label.clone(),
                    line: *line,
                })?;
            let imm = (target as i64 - inst.pc as i64) >> 1;
            if !fits_signed(imm, bits) {
                return Err(LoadError::BranchTooFar { label, line: *line });
            }
            inst.imm = imm;
        }
        Ok(InstructionMemory::new(
            self.program.into_iter().map(|(inst, _)| inst),
        ))
    }
}

/// Decodes one tokenized instruction. Labels are left unresolved.
fn decode(args: &[String], text: &str, line: usize) -> Result<Instruction, LoadError> {
    let opcode = Opcode::from_mnemonic(&args[0]).ok_or_else(|| LoadError::UnknownOpcode {
        opcode: args[0].clone(),
        line,
    })?;

    let incomplete = || LoadError::IncompleteInstruction {
        text: text.to_string(),
        line,
    };
    let invalid = || LoadError::InvalidFormat {
        text: text.to_string(),
        line,
    };
    let reg = |token: &str| parse_register(token).ok_or_else(invalid);
    let imm = |token: &str, bits: u32| match parse_imm(token) {
        Imm::Value(v) if fits_signed(v, bits) => Ok(v),
        Imm::Value(_) | Imm::Overflow => Err(LoadError::ImmediateOutOfRange {
            text: text.to_string(),
            line,
        }),
        Imm::NotANumber => Err(invalid()),
    };

    let expected = match opcode.op_type() {
        OpType::None => 1,
        OpType::U | OpType::Uj => 3,
        _ => 4,
    };
    if args.len() != expected {
        return Err(incomplete());
    }

    let mut inst = Instruction::new(opcode);
    match opcode.op_type() {
        OpType::None => {}
        OpType::R => {
            inst.rd = reg(&args[1])?;
            inst.rs1 = reg(&args[2])?;
            inst.rs2 = reg(&args[3])?;
        }
        OpType::I if matches!(opcode, Opcode::Ld | Opcode::Jalr) => {
            inst.rd = reg(&args[1])?;
            inst.rs1 = reg(&args[3])?;
            inst.imm = imm(&args[2], IMM12_BITS)?;
        }
        OpType::I => {
            inst.rd = reg(&args[1])?;
            inst.rs1 = reg(&args[2])?;
            inst.imm = imm(&args[3], IMM12_BITS)?;
        }
        OpType::S => {
            inst.rs2 = reg(&args[1])?;
            inst.rs1 = reg(&args[3])?;
            inst.imm = imm(&args[2], IMM12_BITS)?;
        }
        OpType::Sb => {
            inst.rs1 = reg(&args[1])?;
            inst.rs2 = reg(&args[2])?;
            inst.label = Some(args[3].clone());
        }
        OpType::U => {
            inst.rd = reg(&args[1])?;
            inst.imm = imm(&args[2], IMM20_BITS)?;
        }
        OpType::Uj => {
            inst.rd = reg(&args[1])?;
            inst.label = Some(args[2].clone());
        }
    }
    Ok(inst)
}
