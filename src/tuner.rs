// src/tuner.rs
//
// Auto-tuner: derives (B, m, k, h) from the digit count of n. A free
// function rather than a method on any stateful type, so bit-identical
// output for equal n holds by construction rather than by convention.

use num::BigInt;

use crate::config::MpqsConfig;
use crate::numeric::{integer_log_10, integer_log_2, integer_square_root};

/// Deterministic function of `n` only; never touches the filesystem or
/// environment (callers wanting overrides layer `MpqsConfig::load`
/// explicitly over this result).
pub fn auto_config(n: &BigInt) -> MpqsConfig {
    let l = integer_log_10(n) as f64;
    let l_e = l * 10f64.ln();

    let b: BigInt = if l < 4.0 {
        n / 2
    } else if l < 8.0 {
        integer_square_root(n)
    } else {
        let factor = (41.0 - l).max(1.0);
        let exponent = 0.5 * (l_e * l_e.ln()).sqrt();
        let magnitude = (factor * exponent.exp()).floor().max(1.0);
        BigInt::from(magnitude as u64)
    };

    let b_u64 = num::ToPrimitive::to_u64(&b).unwrap_or(u64::MAX);
    let k = ((l / 10.0).floor().max(0.0)) as u32;
    let h = integer_log_2(&b.max(BigInt::from(2))) + 6;

    MpqsConfig {
        factor_base_bound: b_u64.max(2),
        sieving_half_width: b_u64.max(2),
        polynomial_exponent: k,
        log_threshold: h as u64,
    }
}
