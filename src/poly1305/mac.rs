//! Public Poly1305 surface: one-time-key construction, incremental update,
//! and finalization (spec.md §6 External Interfaces).

use super::consts::{KEY_LEN, TAG_LEN};
use super::engine_scalar::ScalarEngine;
#[cfg(target_arch = "x86_64")]
use super::engine_vector::VectorEngine;
use super::error::Poly1305Error;

enum Backend {
    #[cfg(target_arch = "x86_64")]
    Vector(VectorEngine),
    Scalar(ScalarEngine),
}

/// An incremental Poly1305 one-time authenticator.
///
/// Backend selection happens once, at construction: the 8-lane AVX-512
/// engine is used when the host supports it, otherwise a portable scalar
/// engine. Both backends produce bit-identical tags for the same key and
/// message (spec.md testable property P3).
///
/// The type has no "finished" state to misuse: [`Poly1305::finalize`] takes
/// `self` by value, so calling it twice, or calling [`Poly1305::update`]
/// after it, is a compile error rather than a runtime one.
pub struct Poly1305 {
    backend: Backend,
}

impl Poly1305 {
    /// Builds a new authenticator from a 32-byte one-time key (`r` || `s`),
    /// per RFC 8439 §2.6.
    pub fn new(key: &[u8; KEY_LEN]) -> Poly1305 {
        let r_bytes: [u8; 16] = key[..16].try_into().unwrap();
        let s: [u8; 16] = key[16..].try_into().unwrap();

        #[cfg(target_arch = "x86_64")]
        let backend = if is_x86_feature_detected() {
            Backend::Vector(unsafe { VectorEngine::new(&r_bytes, &s) })
        } else {
            Backend::Scalar(ScalarEngine::new(&r_bytes, &s))
        };
        #[cfg(not(target_arch = "x86_64"))]
        let backend = Backend::Scalar(ScalarEngine::new(&r_bytes, &s));

        Poly1305 { backend }
    }

    /// Builds a new authenticator from a key slice, validating its length.
    pub fn try_new(key: &[u8]) -> Result<Poly1305, Poly1305Error> {
        let key: &[u8; KEY_LEN] = key.try_into().map_err(|_| Poly1305Error::InvalidKeyLength)?;
        Ok(Poly1305::new(key))
    }

    /// Absorbs any number of message bytes. May be called any number of
    /// times with arbitrarily sized chunks; the result is identical to
    /// calling it once with the whole message concatenated (spec.md
    /// testable property P1).
    pub fn update(&mut self, input: &[u8]) {
        match &mut self.backend {
            #[cfg(target_arch = "x86_64")]
            Backend::Vector(e) => unsafe { e.update(input) },
            Backend::Scalar(e) => e.update(input),
        }
    }

    /// Consumes the authenticator and produces the 16-byte tag.
    pub fn finalize(self) -> [u8; TAG_LEN] {
        match self.backend {
            #[cfg(target_arch = "x86_64")]
            Backend::Vector(e) => unsafe { e.finish() },
            Backend::Scalar(e) => e.finish(),
        }
    }
}

#[cfg(target_arch = "x86_64")]
fn is_x86_feature_detected() -> bool {
    std::is_x86_feature_detected!("avx512f")
}

/// One-shot helper: authenticates `msg` under `key`, writing the tag into
/// `tag`.
pub fn mac(tag: &mut [u8; TAG_LEN], msg: &[u8], key: &[u8; KEY_LEN]) {
    let mut p = Poly1305::new(key);
    p.update(msg);
    *tag = p.finalize();
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 8439 §2.5.2 test vector.
    const RFC_KEY: [u8; 32] = [
        0x85, 0xd6, 0xbe, 0x78, 0x57, 0x55, 0x6d, 0x33, 0x7f, 0x44, 0x52, 0xfe, 0x42, 0xd5, 0x06,
        0xa8, 0x01, 0x03, 0x80, 0x8a, 0xfb, 0x0d, 0xb2, 0xfd, 0x4a, 0xbf, 0xf6, 0xaf, 0x41, 0x49,
        0xf5, 0x1b,
    ];
    const RFC_MSG: &[u8] = b"Cryptographic Forum Research Group";
    const RFC_TAG: [u8; 16] = [
        0xa8, 0x06, 0x1d, 0xc1, 0x30, 0x51, 0x36, 0xc6, 0xc2, 0x2b, 0x8b, 0xaf, 0x0c, 0x01, 0x27,
        0xa9,
    ];

    #[test]
    fn rfc8439_single_shot() {
        let mut tag = [0u8; 16];
        mac(&mut tag, RFC_MSG, &RFC_KEY);
        assert_eq!(tag, RFC_TAG);
    }

    #[test]
    fn rfc8439_byte_at_a_time() {
        let mut p = Poly1305::new(&RFC_KEY);
        for b in RFC_MSG {
            p.update(std::slice::from_ref(b));
        }
        assert_eq!(p.finalize(), RFC_TAG);
    }

    #[test]
    fn empty_message_returns_s() {
        let mut tag = [0u8; 16];
        mac(&mut tag, b"", &RFC_KEY);
        assert_eq!(tag, RFC_KEY[16..]);
    }

    #[test]
    fn try_new_rejects_short_key() {
        let err = Poly1305::try_new(&[0u8; 31]).unwrap_err();
        assert_eq!(err, Poly1305Error::InvalidKeyLength);
    }

    #[test]
    fn chunking_is_invariant_across_superblock_boundary() {
        let msg: Vec<u8> = (0u32..1024).map(|i| (i % 251) as u8).collect();

        let mut whole = [0u8; 16];
        mac(&mut whole, &msg, &RFC_KEY);

        let mut p = Poly1305::new(&RFC_KEY);
        for chunk in msg.chunks(17) {
            p.update(chunk);
        }
        assert_eq!(p.finalize(), whole);
    }
}
