//! Kannada Code Generation - C source and three-address code

pub mod c;
pub mod tac;

pub use c::generate as generate_c;
pub use tac::generate as generate_tac;
