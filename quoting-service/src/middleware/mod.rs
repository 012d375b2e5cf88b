mod admin;

pub use admin::AdminGuard;
