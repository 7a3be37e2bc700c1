//! Execute (EX) Stage.
//!
//! Feeds the functional unit from ID/EX and drains finished results into
//! EX/MEM, publishing forwardable results to the register file.

use tracing::trace;

use crate::core::Cpu;

/// Executes the execute stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Behavior
///
/// - Does nothing while EX/MEM is occupied
/// - Starts the ID/EX instruction if the functional unit is idle
/// - Moves a finished instruction to EX/MEM; a one-cycle operation started
///   this tick finishes this tick
pub fn execute_stage(cpu: &mut Cpu) {
    if !cpu.latches.ex_mem.is_free() {
        return;
    }
    if cpu.alu.is_free() {
        if let Some(inst) = cpu.latches.id_ex.take() {
            cpu.alu.run(inst, cpu.ticks);
        }
    }

    let forward = cpu.forwards();
    if let Some(inst) = cpu.alu.get_output(cpu.ticks, forward) {
        if inst.rd_ready {
            cpu.regs.publish(inst.tag, inst.rd, inst.rd_val);
        }
        if cpu.trace {
            trace!(tick = cpu.ticks, "execute : {}", inst.detailed());
        }
        cpu.latches.ex_mem.write(inst);
    }
}
