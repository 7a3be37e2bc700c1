//! Instruction Decode (ID) Stage.
//!
//! Resolves source operands through the hazard-tracking register file and
//! redirects the PC for unconditional jumps, whose targets are known here.

use tracing::trace;

use crate::core::Cpu;
use crate::isa::opcode::Opcode;

/// Executes the decode stage of the pipeline.
///
/// The instruction in IF/ID moves to ID/EX only when ID/EX is free and its
/// dependency check passes; otherwise it stays put and is retried next tick.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
pub fn decode_stage(cpu: &mut Cpu) {
    if !cpu.latches.id_ex.is_free() {
        return;
    }
    let Some(pending) = cpu.latches.if_id.peek_mut() else {
        return;
    };
    if cpu.regs.dep_check(pending) {
        if cpu.trace {
            trace!(tick = cpu.ticks, "decode: stall {}", pending);
        }
        return;
    }
    let Some(inst) = cpu.latches.if_id.take() else {
        return;
    };

    match inst.opcode {
        Opcode::Jalr => cpu.pc = (inst.rs1_val.wrapping_add(inst.imm) as u64) & !1,
        Opcode::Jal => cpu.pc = inst.relative_target(),
        _ => {}
    }

    if cpu.trace {
        trace!(tick = cpu.ticks, "decode : {}", inst.detailed());
    }
    cpu.latches.id_ex.write(inst);
}
