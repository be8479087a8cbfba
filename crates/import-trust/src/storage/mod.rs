//! Storage for account signing keys.
//!
//! - [`key_file`]: `.akey` save/load with passphrase sealing.

pub mod key_file;

pub use key_file::{load_account_key, read_account_id, save_account_key, AkeyFile};
