pub mod profile;
pub mod rings;
pub mod spec;

pub use profile::*;
pub use rings::*;
pub use spec::*;
