// src/services/mod.rs

pub mod bedrock;
pub mod generator;
pub mod model;
