//! Client for the ZEGA text-generation service.
//!
//! The service exposes three endpoints:
//! - `POST /predict` `{user_id, context, instruction, mode}` → `{content | response}`
//! - `POST /learn` `{user_id, text, rating}`
//! - `GET /health` → `{status, version}`

mod client;

pub use client::{UPSTREAM_BODY_LIMIT, ZegaClient};
