use rand::RngCore;
use sha2::{Digest, Sha256};

const TOKEN_LEN: usize = 32;

/// A new random token, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// The SHA-256 hash of a plain token, hex encoded.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_random() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_eq!(t1.len(), 2 * TOKEN_LEN);
        assert_ne!(t1, t2);
    }

    #[test]
    fn hashes_are_stable() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_ne!(hash_token("abc"), hash_token("abd"));
    }
}
