//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It commits results to the register file, retires the instruction, and
//! resolves conditional branches: training the branch unit, counting
//! mispredictions, and flushing when the fetched path was wrong.

use tracing::{debug, trace};

use crate::core::Cpu;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Behavior
///
/// - Writes `rd_val` to `rd` (never `x0`) and counts the retirement
/// - For a resolved conditional branch, updates the predictor and, if
///   taken, the BTB
/// - If fetch followed a different path than the resolved target, flushes
///   the pipeline and restarts fetch at the target
/// - Without speculation, always restarts fetch at the resolved target
pub fn wb_stage(cpu: &mut Cpu) {
    let Some(inst) = cpu.latches.mem_wb.take() else {
        return;
    };

    cpu.stats.instructions_retired += 1;
    if inst.writes_rd() {
        cpu.regs.write(inst.tag, inst.rd, inst.rd_val);
    }
    if cpu.trace {
        trace!(tick = cpu.ticks, "writeback : {}", inst.detailed());
    }

    let Some(target) = inst.branch_target else {
        return;
    };
    cpu.stats.branch_predictions += 1;
    let taken = target != inst.fall_through();
    cpu.branch_unit.update(inst.pc, taken, target);

    if inst.pred_target != target {
        if inst.pred_taken != taken {
            cpu.stats.branch_mispredictions += 1;
        }
        cpu.flush();
        cpu.pc = target;
        debug!(tick = cpu.ticks, pc = target, "restart after branch");
    } else if !cpu.speculates() {
        cpu.pc = target;
    }
}
