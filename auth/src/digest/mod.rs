pub mod sha256;

pub use sha256::constant_time_eq;
pub use sha256::Sha256Hasher;
pub use sha256::DIGEST_HEX_LEN;
pub use sha256::DIGEST_LEN;
