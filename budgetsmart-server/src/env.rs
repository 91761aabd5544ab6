use base64::engine::general_purpose::STANDARD as b64;
use base64::Engine;
use budgetsmart_common::password_hasher::HashParams;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::sync::RwLock;
use std::time::Duration;
use zeroize::{Zeroize, ZeroizeOnDrop};

const HASHING_KEY_SIZE: usize = 32;
const TOKEN_SIGNING_KEY_SIZE: usize = 64;

pub struct Conf {
    pub connections: Connections,
    pub hashing: Hashing,
    pub keys: Keys,
    pub lifetimes: Lifetimes,
    pub bounds: Bounds,
    pub workers: Workers,
}

#[derive(Deserialize, Serialize)]
pub struct RawConf {
    pub connections: Connections,
    pub hashing: Hashing,
    pub keys: RawKeys,
    pub lifetimes: RawLifetimes,
    pub bounds: Bounds,
    pub workers: Workers,
}

#[derive(Deserialize, Serialize)]
pub struct Connections {
    pub database_uri: String,
    pub max_db_connections: Option<u32>,
}

#[derive(Deserialize, Serialize)]
pub struct Hashing {
    pub hash_length: u32,
    pub hash_iterations: u32,
    // Must be a power of two and at least 128
    pub hash_mem_cost_kib: u32,
    pub hash_threads: u32,
    pub salt_length: u32,
}

impl Hashing {
    pub fn hash_params(&self) -> HashParams {
        HashParams {
            salt_length: self.salt_length,
            hash_length: self.hash_length,
            iterations: self.hash_iterations,
            memory_cost_kib: self.hash_mem_cost_kib,
            threads: self.hash_threads,
        }
    }
}

#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Keys {
    pub hashing_key: [u8; HASHING_KEY_SIZE],
    pub token_signing_key: [u8; TOKEN_SIGNING_KEY_SIZE],
}

#[derive(Deserialize, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct RawKeys {
    pub hashing_key_b64: String,
    pub token_signing_key_b64: String,
}

pub struct Lifetimes {
    pub access_token_lifetime: Duration,
    pub password_reset_token_lifetime: Duration,
}

#[derive(Deserialize, Serialize)]
pub struct RawLifetimes {
    pub access_token_lifetime_days: u64,
    pub password_reset_token_lifetime_mins: u64,
}

#[derive(Deserialize, Serialize)]
pub struct Bounds {
    pub min_budget_year: i32,
    pub max_budget_year: i32,
}

#[derive(Deserialize, Serialize)]
pub struct Workers {
    pub actix_workers: Option<usize>,
}

lazy_static! {
    static ref CONF_FILE_PATH: RwLock<String> = RwLock::new(String::from("conf/server-conf.toml"));
    pub static ref CONF: Conf = match build_conf() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("CONFIGURATION ERROR: {e}");
            std::process::exit(1);
        }
    };
}

fn build_conf() -> Result<Conf, String> {
    let conf_file_path = CONF_FILE_PATH.read().expect("Lock was poisoned");

    let mut conf_file = match File::open::<&str>(conf_file_path.as_ref()) {
        Ok(f) => f,
        Err(e) => {
            return Err(format!(
                "Couldn't open configuration file at '{conf_file_path}': {e}"
            ))
        }
    };

    let mut contents = String::new();
    if conf_file.read_to_string(&mut contents).is_err() {
        return Err(format!(
            "Configuration file at '{conf_file_path}' should be a text file in the TOML format"
        ));
    }

    let raw_conf = match toml::from_str::<RawConf>(&contents) {
        Ok(t) => t,
        Err(e) => return Err(format!("Parsing '{conf_file_path}' failed: {e}")),
    };

    if !raw_conf.hashing.hash_mem_cost_kib.is_power_of_two() {
        return Err(format!(
            "hash_mem_cost_kib in '{conf_file_path}' must be a power of two"
        ));
    }

    if raw_conf.bounds.min_budget_year > raw_conf.bounds.max_budget_year {
        return Err(format!(
            "min_budget_year is greater than max_budget_year in '{conf_file_path}'"
        ));
    }

    let hashing_key = match b64.decode(&raw_conf.keys.hashing_key_b64) {
        Ok(k) => k,
        Err(e) => {
            return Err(format!(
                "Failed to base64 decode hashing_key_b64 from '{conf_file_path}': {e}"
            ))
        }
    };

    let hashing_key: [u8; HASHING_KEY_SIZE] = match hashing_key.try_into() {
        Ok(k) => k,
        Err(_) => {
            return Err(format!(
                "hashing_key_b64 in '{conf_file_path}' must have a size of {HASHING_KEY_SIZE} bytes"
            ))
        }
    };

    let token_signing_key = match b64.decode(&raw_conf.keys.token_signing_key_b64) {
        Ok(k) => k,
        Err(e) => {
            return Err(format!(
                "Failed to base64 decode token_signing_key_b64 from '{conf_file_path}': {e}"
            ))
        }
    };

    let token_signing_key: [u8; TOKEN_SIGNING_KEY_SIZE] = match token_signing_key.try_into() {
        Ok(k) => k,
        Err(_) => {
            return Err(format!(
            "token_signing_key_b64 in '{conf_file_path}' must have a size of {TOKEN_SIGNING_KEY_SIZE} bytes"
            ))
        }
    };

    Ok(Conf {
        connections: raw_conf.connections,
        hashing: raw_conf.hashing,
        keys: Keys {
            hashing_key,
            token_signing_key,
        },
        lifetimes: Lifetimes {
            access_token_lifetime: Duration::from_secs(
                raw_conf.lifetimes.access_token_lifetime_days * 24 * 60 * 60,
            ),
            password_reset_token_lifetime: Duration::from_secs(
                raw_conf.lifetimes.password_reset_token_lifetime_mins * 60,
            ),
        },
        bounds: raw_conf.bounds,
        workers: raw_conf.workers,
    })
}


pub fn initialize(conf_file_path: &str) {
    *CONF_FILE_PATH.write().expect("Lock was poisoned") = String::from(conf_file_path);

    // Forego lazy initialization in order to validate the conf file
    lazy_static::initialize(&crate::env::CONF);
}
