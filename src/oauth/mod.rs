pub mod exchange;
pub mod profile;

pub use exchange::{AccessToken, ExchangeError, OAuthExchanger};
pub use profile::{FetchError, Profile, ProfileFetcher};
