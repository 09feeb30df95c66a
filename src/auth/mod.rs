pub mod google;
pub mod jwt;
pub mod reconciler;
pub mod redirect;
pub mod session;

// Re-export the flow pieces so we can do "use crate::auth::*;"
pub use google::{GoogleConfig, GoogleProvider};
pub use reconciler::IdentityReconciler;
pub use redirect::on_redirect;
pub use session::materialize;
