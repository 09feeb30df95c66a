pub mod session;
pub mod token;
pub mod user;

pub use session::{Session, SessionUser};
pub use token::Token;
pub use user::{AuthUser, StoredUserRecord};
