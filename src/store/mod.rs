pub mod users;

pub use users::{User, UserStore};
