//! `octopoly`: an 8-lane AVX-512 vectorized Poly1305 one-time authenticator.
//!
//! Poly1305 (RFC 8439 §2.5) is a one-time message authenticator over the
//! prime field `F_p`, `p = 2^130 - 5`. This crate evaluates eight message
//! blocks per Horner step on hosts with AVX-512F, falling back to a portable
//! scalar engine everywhere else; both paths produce bit-identical tags for
//! the same key and message.
//!
//! # Module overview
//!
//! - [`poly1305`]
//!   The authenticator itself: key clamping, the field arithmetic it runs
//!   on, the two engines (vectorized bulk path and scalar fallback), and the
//!   public incremental/one-shot APIs.
//!
//! # Design goals
//!
//! - No heap allocations in the hot path
//! - Constant-time with respect to the key and accumulator: no data-dependent
//!   branches or table lookups over secret values
//! - Key material and running state are zeroized on drop
//!
//! This crate implements Poly1305 only. It does not perform the ChaCha20
//! key agreement, AEAD framing, or nonce management a full
//! ChaCha20-Poly1305 construction needs — those are out of scope.

pub mod poly1305;
