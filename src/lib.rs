//! Codec for SERCOS/SIP parameter identifiers ("IDNs").
//!
//! Turns textual addresses like `S-0-0001.255.128` into their fixed four byte
//! wire form and back. The surrounding packet layer embeds the result into a
//! request frame; this crate only owns the address grammar and bit layout.

#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod data;
pub mod idn;
