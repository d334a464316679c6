/// Maximum bio length in characters
pub const MAX_BIO_CHARS: usize = 500;

/// Upper bound for user and review ratings (inclusive)
pub const MAX_RATING: u8 = 5;

/// Key under which the marketplace snapshot document is stored
pub const SNAPSHOT_KEY: &str = "sueahhahn.snapshot";

/// Bio given to freshly registered users who leave it blank
pub const DEFAULT_BIO: &str = "สวัสดี! ฉันเป็นสมาชิกใหม่ของ Sue AhHahn";

/// Argon2 defaults (the argon2 crate's recommended Argon2id parameters)
pub const ARGON2_DEFAULT_MEMORY_KIB: u32 = 19_456;
pub const ARGON2_DEFAULT_TIME_COST: u32 = 2;
pub const ARGON2_DEFAULT_PARALLELISM: u32 = 1;
