// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout streamcodec.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] / [`DecodeError`] - error taxonomy
//! - [`Value`] - unified decoded-primitive representation
//! - [`Payload`] - the three runtime shapes of a message key or value

pub mod error;
pub mod value;

pub use error::{CodecError, DecodeError, Result};
pub use value::{Payload, PayloadKind, Record, Value};
