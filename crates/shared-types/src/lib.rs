pub mod error;
pub mod feature_flags;
pub mod requests;

pub mod access;
pub mod dashboard;
pub mod guard;
pub mod profile;
pub mod role;
pub mod session;

pub use error::*;
pub use feature_flags::*;
pub use requests::*;

pub use access::*;
pub use dashboard::*;
pub use guard::*;
pub use profile::*;
pub use role::*;
pub use session::*;
