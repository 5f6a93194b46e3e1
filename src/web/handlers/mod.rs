//! HTTP handlers for the web pages, redirects and health check.

pub mod health;
pub mod home;
pub mod login;
pub mod logout;
pub mod redirect;
pub mod register;
pub mod shorten;

pub use health::health_handler;
pub use home::home_handler;
pub use login::{login_handler, login_page};
pub use logout::logout_handler;
pub use redirect::redirect_handler;
pub use register::{register_handler, register_page};
pub use shorten::shorten_handler;
