// src/utils/mod.rs

pub mod access_code;
