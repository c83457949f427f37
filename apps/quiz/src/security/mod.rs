pub mod admin_session;
pub mod tokens;

pub use admin_session::{
    check_credentials, is_localhost, make_admin_session, verify_admin_session, AdminCredentials,
};
pub use tokens::{
    expires_at, expiry_from_choice, hash_token, new_resume_code, new_url_token, ExpiryChoice,
};
