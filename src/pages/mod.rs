//! Page Data
//!
//! View models for the routed pages and the loaders that build them.
//!
//! Each loader moves through `loading → success` or `loading → error`:
//! a 404 from the proxy route becomes [`PageError::NotFound`], any other
//! non-2xx becomes [`PageError::LoadFailed`] carrying that status.

mod error;
mod loaders;

pub use error::{PageError, PageErrorBody};
pub use loaders::{EventPage, HomePage, JoinPage, MyStatusPage, PageLoader, RegisterPage};
