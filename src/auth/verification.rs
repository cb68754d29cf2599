// Email verification codes

use rand::RngCore;

/// Six lowercase hex characters from three random bytes
pub fn generate_code() -> String {
    let mut bytes = [0u8; 3];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
