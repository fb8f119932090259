//! Gaussian basis functions, from single primitives up to the basis set of a
//! whole system.
//!
//! The views here nest three levels deep (shell, contracted Gaussian, primitive,
//! each carrying a center point view), all sharing one access mode, so a read-only
//! [`ShellView`] can only ever hand out read-only primitives. An [`AOBasisSet`]
//! adds one more level on top: one [`AtomicBasisSet`] per center, with shells and
//! primitives also reachable by flat index across centers.

use serde::{Deserialize, Serialize};

pub mod ao_basis_set;
pub mod atomic_basis_set;
pub mod contracted_gaussian;
pub mod primitive;
pub mod shell;

pub use ao_basis_set::{AOBasisSet, AOBasisSetView, BasisCenterView};
pub use atomic_basis_set::{AtomicBasisSet, AtomicBasisSetView};
pub use contracted_gaussian::{ContractedGaussian, ContractedGaussianView};
pub use primitive::{Primitive, PrimitiveView};
pub use shell::{Shell, ShellView};

/// Whether a shell uses Cartesian or pure (spherical) angular functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellType {
    Cartesian,
    #[default]
    Pure,
}

impl ShellType {
    /// Number of atomic orbitals a shell of angular momentum `l` contributes.
    pub fn n_aos(self, l: u32) -> usize {
        let l = l as usize;
        match self {
            ShellType::Cartesian => (l + 1) * (l + 2) / 2,
            ShellType::Pure => 2 * l + 1,
        }
    }
}
