//! # View Module
//!
//! The aliasing layer shared by every entity in the crate. Records are stored as
//! structure-of-arrays in a [`FieldStorage`], and callers reach them through views
//! that alias the stored scalars instead of copying them.
//!
//! ## Key Components
//!
//! - [`access`] - The [`ReadOnly`] / [`ReadWrite`] markers that decide, once per view
//!   type, whether every aliased field (nested ones included) can be written
//! - [`traits`] - The [`FieldStorage`] and [`RecordView`] contracts entities implement
//! - [`layout`] - Index-only backends: a contiguous run of rows or a subset of a
//!   shared supersystem
//! - [`collection`] - [`CollectionView`], the list-like handle over a storage and a layout
//!
//! ## Lifetimes
//!
//! Every view borrows the storage it aliases, so the borrow checker guarantees that
//! no view outlives its data and that read/write views never overlap. A subset keeps
//! its supersystem layout alive through a reference-counted handle.

pub mod access;
pub mod collection;
pub mod layout;
pub mod traits;

pub use access::{Access, ReadOnly, ReadWrite};
pub use collection::CollectionView;
pub use layout::{Contiguous, Layout, Subset};
pub use traits::{FieldStorage, RecordView};
