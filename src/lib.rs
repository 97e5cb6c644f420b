//! CD+Graphics subcode decoding and rendering.
//!
//! Raw 24-byte subcode records are turned into [`Instruction`]s by [`decode`],
//! then applied in stream order to a [`Cdg`] display state.

pub mod bits;
pub mod cdg;
pub mod config;
pub mod decode;
pub mod error;
pub mod packet;
pub mod player;
pub mod render;
pub mod types;

pub use crate::cdg::Cdg;
pub use crate::decode::decode;
pub use crate::error::{ApplyError, Error};
pub use crate::packet::SubCode;
pub use crate::types::Instruction;
