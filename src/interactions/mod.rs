mod interactions_2d;

pub use interactions_2d::*;
