use sha2::{Digest, Sha256};

use crate::errors::InvError;
use crate::invertible::{Invertible, Shape};

/// Computes the canonical structural hash of an invertible.
///
/// Two invertibles with equal shapes hash identically regardless of the
/// closures behind their leaves.
pub fn canonical_hash(f: &Invertible) -> Result<String, InvError> {
    shape_hash(&f.shape())
}

/// Computes the canonical hash of a structural descriptor.
pub fn shape_hash(shape: &Shape) -> Result<String, InvError> {
    let json = serde_json::to_vec(shape).map_err(|err| InvError::serde("shape-serialize", err))?;
    let mut hasher = Sha256::new();
    hasher.update(json);
    Ok(format!("{:x}", hasher.finalize()))
}
