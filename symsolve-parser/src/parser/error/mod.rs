pub mod kind;

pub use symsolve_error::Error;
