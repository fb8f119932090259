//! # Chemist Core Library
//!
//! Chemical entities (points, point charges, nuclei, Gaussian basis sets) for a
//! quantum-chemistry toolkit, stored structure-of-arrays and accessed through
//! lightweight views that alias the stored scalars instead of copying them.
//!
//! ## Architectural Philosophy
//!
//! - **[`view`]: The Foundation.** The generic aliasing machinery. A [`FieldStorage`]
//!   owns one array per field; a [`RecordView`] aliases one row of it; a
//!   [`CollectionView`] presents list access over either the whole storage or an
//!   index-filtered subset of it. A single [`Access`] parameter ([`ReadOnly`] or
//!   [`ReadWrite`]) decides at compile time whether any of it can be written.
//!
//! - **[`models`]: The Entities.** Owned records, their views and their
//!   structure-of-arrays sets, built on the [`view`] layer.
//!
//! - **[`fragmenting`]: The Consumers.** Fragments of a set of nuclei expressed as
//!   subset views of the supersystem, plus the caps that close broken bonds.
//!
//! - **[`data`]: The Configuration.** Element data, built in or loaded from TOML.
//!
//! ## Example
//!
//! ```
//! use chemist::{FieldStorage, Nuclei, Nucleus, Point, RecordView};
//!
//! let mut nuclei = Nuclei::from_records([
//!     Nucleus::new("H", 1, 1.0, Point::new(0.0, 0.0, 0.0)),
//!     Nucleus::new("He", 2, 4.0, Point::new(1.0, 0.0, 0.0)),
//!     Nucleus::new("Li", 3, 7.0, Point::new(2.0, 0.0, 0.0)),
//! ])?;
//!
//! let subset = nuclei.view().subset([2, 0])?;
//! assert_eq!(subset.len(), 2);
//! assert_eq!(subset.at(0)?.name()?, "Li");
//!
//! nuclei.at_mut(0)?.set_mass(1.008)?;
//! assert_eq!(nuclei.at(0)?.materialize()?.mass, 1.008);
//! # Ok::<(), chemist::ChemistError>(())
//! ```

pub mod data;
pub mod error;
pub mod fragmenting;
pub mod models;
pub mod view;

pub use error::{ChemistError, Result};
pub use models::basis::{
    AOBasisSet, AOBasisSetView, AtomicBasisSet, AtomicBasisSetView, BasisCenterView,
    ContractedGaussian, ContractedGaussianView, Primitive, PrimitiveView, Shell, ShellType,
    ShellView,
};
pub use models::nucleus::{AtomicNumber, Nuclei, NucleiView, Nucleus, NucleusView};
pub use models::point::{Point, PointSet, PointSetView, PointView};
pub use models::point_charge::{Charges, ChargesView, PointCharge, PointChargeView};
pub use view::{
    Access, CollectionView, Contiguous, FieldStorage, Layout, ReadOnly, ReadWrite, RecordView,
    Subset,
};
