pub mod extent;
pub mod extents;
pub mod mapping;
pub mod strides;
pub mod view;

pub mod error;
