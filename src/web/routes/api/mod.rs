pub mod waitlist;
pub mod welcome;

pub use waitlist::waitlist;
pub use welcome::{method_not_allowed, send_welcome_email};
