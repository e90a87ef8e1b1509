//! Local accounts and password hashing.

mod accounts;
mod password;

pub use accounts::{AccountService, MIN_PASSWORD_LEN};
pub use password::{
    hash_password, hash_password_blocking, prepare_decoy, prepare_decoy_blocking, verify_decoy,
    verify_decoy_blocking, verify_password, verify_password_blocking,
};
