use argon2_kdf::{Algorithm, Hash, Hasher, Secret};
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct HashParams {
    pub salt_length: u32,
    pub hash_length: u32,
    pub iterations: u32,
    // Must be a power of two and at least 128
    pub memory_cost_kib: u32,
    pub threads: u32,
}

pub fn hash_password(password: &str, hash_params: &HashParams, hashing_key: &[u8]) -> String {
    Hasher::default()
        .algorithm(Algorithm::Argon2id)
        .salt_length(hash_params.salt_length)
        .hash_length(hash_params.hash_length)
        .iterations(hash_params.iterations)
        .memory_cost_kib(hash_params.memory_cost_kib)
        .threads(hash_params.threads)
        .secret(Secret::using(hashing_key))
        .hash(password.as_bytes())
        .expect("Failed to hash password")
        .to_string()
}

pub fn verify_hash(password: &str, hash: &str, hashing_key: &[u8]) -> bool {
    let hash = match Hash::from_str(hash) {
        Ok(h) => h,
        Err(_) => {
            log::error!("Hash passed to verifier was invalid");
            return false;
        }
    };

    hash.verify_with_secret(password.as_bytes(), Secret::using(hashing_key))
}
