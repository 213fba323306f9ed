mod chrome_finder;
mod error;
mod launcher;
mod profile;
mod session;
mod storefront;

pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use launcher::{ChromeLauncher, DEFAULT_DEBUGGING_PORT};
pub use profile::{DEFAULT_PROFILE, ProfileManager};
pub use session::BrowserSession;
pub use storefront::{CdpStorefront, Locator, Storefront};
