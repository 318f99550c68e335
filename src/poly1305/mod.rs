//! Vectorized Poly1305, RFC 8439 §2.5.
//!
//! [`Poly1305`] is the incremental authenticator; [`mac`] is a one-shot
//! convenience wrapper. Internally the crate carries two engines — an
//! 8-lane AVX-512 bulk path (`engine_vector`) and a portable scalar fallback
//! (`engine_scalar`) — selected transparently by [`Poly1305::new`].

mod consts;
mod engine_scalar;
#[cfg(target_arch = "x86_64")]
mod engine_vector;
mod error;
mod field;
mod mac;
#[cfg(target_arch = "x86_64")]
mod vector;

pub use consts::{BLOCK_LEN, KEY_LEN, TAG_LEN};
pub use error::Poly1305Error;
pub use mac::{mac as compute, Poly1305};
