// src/portal/mod.rs

//! Terminal rendition of the lang-portal single-page client.

pub mod client;
pub mod generate;
pub mod launch;
pub mod nav;
pub mod notify;
pub mod pages;
pub mod pagination;
pub mod query;
pub mod reset;
pub mod shell;
pub mod view;

pub use client::{ApiClient, ClientError};
pub use shell::{Command, Flow, Portal};
