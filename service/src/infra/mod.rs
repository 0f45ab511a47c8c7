//! Infrastructure layer.

pub mod remote;

pub use self::remote::Remote;
#[cfg(feature = "http")]
pub use self::remote::{http, Http};
#[cfg(any(test, feature = "memory"))]
pub use self::remote::{memory, Memory};
