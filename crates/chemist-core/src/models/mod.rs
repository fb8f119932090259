//! # Models Module
//!
//! The chemical entities. Each comes as three pieces:
//!
//! - an owned record ([`Point`](point::Point), [`Nucleus`](nucleus::Nucleus), ...),
//! - a view aliasing one record's fields wherever they live
//!   ([`PointView`](point::PointView), [`NucleusView`](nucleus::NucleusView), ...),
//! - a structure-of-arrays [`FieldStorage`](crate::view::FieldStorage) holding many
//!   records ([`PointSet`](point::PointSet), [`Nuclei`](nucleus::Nuclei), ...).
//!
//! Composite views nest the views of their parts, so a nucleus view holds a point
//! charge view which holds a point view, all with the same access mode.
//!
//! In [`basis`], an [`AtomicBasisSet`](basis::AtomicBasisSet) stores one shell per
//! row, and each shell's primitives are packed into shared arrays reached through
//! sub-slice views. An [`AOBasisSet`](basis::AOBasisSet) stores one atomic basis
//! set per row the same way, one level further out.

pub mod basis;
pub mod nucleus;
pub mod point;
pub mod point_charge;
