#![deny(missing_docs)]

//! Built-in inverse pairs for elementary functions.
//!
//! Every pair is registered symmetrically:
//!
//! | function    | inverse     |
//! |-------------|-------------|
//! | `identity`  | `identity`  |
//! | `inv`       | `inv`       |
//! | `adjoint`   | `adjoint`   |
//! | `transpose` | `transpose` |
//! | `exp`       | `log`       |
//! | `exp2`      | `log2`      |
//! | `exp10`     | `log10`     |
//! | `expm1`     | `log1p`     |
//! | `sqrt`      | `square`    |

use std::sync::Once;

use invfn_core::{Function, InverseRegistry};
use tracing::debug;

mod elementary;
mod linalg;

pub use elementary::{exp, exp10, exp2, expm1, log, log10, log1p, log2, sqrt, square};
pub use linalg::{adjoint, identity, inv, invert_matrix, transpose};

/// All built-in pairs as `(function, inverse)`.
pub fn pairs() -> Vec<(Function, Function)> {
    vec![
        (identity(), identity()),
        (inv(), inv()),
        (adjoint(), adjoint()),
        (transpose(), transpose()),
        (exp(), log()),
        (exp2(), log2()),
        (exp10(), log10()),
        (expm1(), log1p()),
        (sqrt(), square()),
    ]
}

/// Registers every built-in pair into `registry`.
pub fn install(registry: &InverseRegistry) {
    for (f, g) in pairs() {
        registry.register_pair(&f, &g);
    }
    debug!(entries = registry.len(), "installed built-in inverses");
}

/// Installs the built-ins into the process-wide registry exactly once.
pub fn install_global() -> &'static InverseRegistry {
    static INSTALLED: Once = Once::new();
    let registry = invfn_core::global();
    INSTALLED.call_once(|| install(registry));
    registry
}
