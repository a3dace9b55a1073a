mod auth;
mod configure;
mod devices;

pub use auth::*;
pub use configure::*;
pub use devices::*;
