pub mod error;
mod http;
pub mod ip;
pub mod overpass;
pub mod service;
pub mod session;

pub use error::{FailureKind, LocatorError};
pub use ip::{should_adopt_ip_fallback, IpLocation, IpLocator};
pub use overpass::{overpass_query, OverpassClient};
pub use service::{LocateOptions, LocatorView, ResourceLocator, ViewError};
pub use session::{LocationUpdate, LocatorSession, SessionEvent};
