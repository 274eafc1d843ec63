//! voxkit - convert text to speech with the OpenAI API, play it back,
//! save it to disk.
//!
//! The core is display-agnostic: `request` validates and builds synthesis
//! requests, `client` performs the provider call, `player` drives playback,
//! and `store` persists clips. The `voxkit` binary is a thin CLI shell over
//! these modules.

pub mod client;
pub mod clip;
pub mod config_loader;
pub mod error;
pub mod player;
pub mod request;
pub mod store;
