// src/trace.rs
//
// Diagnostic observer hook: an implementation-internal callback for
// structured debug tracing that must not affect outputs. Independent of
// this, the orchestrator also logs through the `log` facade.

use num::BigInt;

#[derive(Debug, Clone)]
pub enum SieveEvent {
    PolynomialSwitched { a: BigInt, poly_index: u32 },
    RelationsHarvested { total: usize },
    Widened { new_bound: u64, new_half_width: u64 },
}

pub type Observer = Box<dyn Fn(&SieveEvent)>;
