// Error codes implementation
// Stable codes printed alongside error messages so operators can grep for them.

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
}

pub mod crypto {
    pub const DECRYPTION_FAILED: &str = "CRYPTO_2001";
}

pub mod configuration {
    pub const INVALID_CONFIGURATION: &str = "CONFIG_3001";
}

pub mod storage {
    pub const STORAGE_FAILED: &str = "STORAGE_4001";
}

pub mod system {
    pub const INTERNAL: &str = "SYSTEM_5001";
}
