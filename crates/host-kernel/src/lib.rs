pub mod extrude;
pub mod mock_host;
pub mod pipe;
pub mod tessellation;
pub mod traits;
pub mod types;

pub use mock_host::{HostCall, MockHost, MockHostConfig};
pub use traits::*;
pub use types::*;
