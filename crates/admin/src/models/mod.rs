//! Domain models for admin.

pub mod admin_user;
pub mod flash;
pub mod session;

pub use admin_user::AdminUser;
pub use flash::{Notice, NoticeKind, push_flash, take_flashes};
pub use session::{CurrentAdmin, keys as session_keys};
