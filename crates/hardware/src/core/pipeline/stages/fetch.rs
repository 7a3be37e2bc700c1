//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! It reads the instruction at the current Program Counter, tags it, and
//! chooses the next PC: sequential, predicted, or blocked until a
//! conditional branch resolves.

use tracing::trace;

use crate::core::Cpu;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Behavior
///
/// - Counts a stall and does nothing if the IF/ID latch is still occupied
/// - Does nothing if the PC names no instruction (end of program, or blocked)
/// - Advances the PC by one instruction
/// - At a conditional branch, follows the branch unit's prediction when
///   speculating, else records a not-taken guess and blocks fetch
pub fn fetch_stage(cpu: &mut Cpu) {
    if !cpu.latches.if_id.is_free() {
        cpu.stats.stalls += 1;
        return;
    }
    let Some(mut inst) = cpu.program.read(cpu.pc) else {
        return;
    };

    inst.tag = cpu.alloc_tag();
    cpu.pc = inst.fall_through();

    if inst.opcode.is_branch() {
        if cpu.speculates() {
            let prediction = cpu.branch_unit.predict(inst.pc);
            inst.pred_taken = prediction.taken;
            inst.pred_target = prediction.target;
            cpu.pc = prediction.target;
        } else {
            inst.pred_taken = false;
            inst.pred_target = inst.fall_through();
            cpu.pc = 0;
        }
    }

    if cpu.trace {
        trace!(tick = cpu.ticks, "fetch : {}", inst.detailed());
    }
    cpu.latches.if_id.write(inst);
}
