//! Request grouping types

mod group;

pub use group::Group;
