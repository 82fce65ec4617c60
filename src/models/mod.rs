// src/models/mod.rs

pub mod dashboard;
pub mod group;
pub mod study_activity;
pub mod study_session;
pub mod vocabulary;
pub mod word;
