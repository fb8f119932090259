//! Splitting a set of nuclei into fragments that alias it, and capping the bonds
//! the split breaks.

pub mod cap;
pub mod cap_set;
pub mod fragmented_nuclei;

pub use cap::Cap;
pub use cap_set::CapSet;
pub use fragmented_nuclei::FragmentedNuclei;
