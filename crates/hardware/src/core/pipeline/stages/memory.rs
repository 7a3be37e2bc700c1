//! Memory Access (MEM) Stage.
//!
//! Issues loads and stores to the data cache exactly once, on the tick they
//! arrive, and then advances the cache every tick until it releases the
//! access. Other instructions pass straight through.

use tracing::trace;

use crate::common::error::Result;
use crate::core::Cpu;
use crate::isa::opcode::Opcode;

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Errors
///
/// Returns a fatal error for a misaligned or out-of-range data address.
pub fn mem_stage(cpu: &mut Cpu) -> Result<()> {
    if !cpu.latches.mem_wb.is_free() {
        return Ok(());
    }

    let tick = cpu.ticks;
    let mut done = None;
    if cpu.cache.is_free() {
        if let Some(inst) = cpu.latches.ex_mem.take() {
            done = match inst.opcode {
                Opcode::Ld => cpu.cache.read(inst, tick)?,
                Opcode::Sd => cpu.cache.write(inst, tick)?,
                _ => Some(inst),
            };
        }
    }
    if let Some(inst) = cpu.cache.run(tick)? {
        done = Some(inst);
    }

    let Some(mut inst) = done else {
        return Ok(());
    };
    if inst.opcode == Opcode::Ld && inst.writes_rd() && cpu.forwards() {
        inst.rd_ready = true;
        cpu.regs.publish(inst.tag, inst.rd, inst.rd_val);
    }
    if cpu.trace {
        trace!(tick, "memory : {}", inst.detailed());
    }
    cpu.latches.mem_wb.write(inst);
    Ok(())
}
