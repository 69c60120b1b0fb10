//! Strong name identity of .NET assemblies.
//!
//! This module provides the [`Identity`] enum and related logic for representing and computing
//! assembly strong names, either as a full public key or as the 8-byte public key token derived
//! from it. Tokens are derived with SHA1 as specified by ECMA-335 II.6.2.1.3.
//!
//! # Key Types
//! - [`Identity`] - Either a full public key or a token (hash) identity
//! - [`AssemblyHashAlgorithm`] - Hash algorithm ids accepted by [`Identity::to_token`]
//!
//! # Example
//! ```rust
//! use cilname::metadata::identity::{AssemblyHashAlgorithm, Identity};
//!
//! let ecma = Identity::PubKey(hex::decode("00000000000000000400000000000000").unwrap());
//! let token = ecma.to_token(AssemblyHashAlgorithm::SHA1).unwrap();
//! assert_eq!(hex::encode(token), "b77a5c561934e089");
//! ```

use crate::{Error, Result};

use sha1::{Digest, Sha1};

/// All possible values for `AssemblyHashAlgorithm`
#[allow(non_snake_case)]
pub mod AssemblyHashAlgorithm {
    /// No hash algorithm specified
    pub const NONE: u32 = 0x0000;
    /// SHA1 hash algorithm
    pub const SHA1: u32 = 0x8004;
}

/// The strong name part of an assembly reference.
///
/// An assembly reference carries either a full public key or its token, never both.
/// An empty vector stands for an explicit `null` in a display name
/// (`PublicKey=null` / `PublicKeyToken=null`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// The full RSA public-key
    PubKey(Vec<u8>),
    /// 8-byte public key token, in display order
    Token(Vec<u8>),
}

impl Identity {
    /// Returns `true` if this identity is an explicit `null` (no key bytes)
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Identity::PubKey(data) | Identity::Token(data) => data.is_empty(),
        }
    }

    /// Raw bytes of the key or token
    #[must_use]
    pub fn data(&self) -> &[u8] {
        match self {
            Identity::PubKey(data) | Identity::Token(data) => data,
        }
    }

    /// Get the public key token based on the provided `algo`.
    ///
    /// The token is the last 8 bytes of the hash of the public key, in reverse order.
    /// Token identities are returned unchanged and an empty public key yields an empty
    /// token.
    ///
    /// # Arguments
    /// * `algo` - The [`AssemblyHashAlgorithm`] used to hash the key
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedConstruct`] if the algorithm is not SHA1.
    pub fn to_token(&self, algo: u32) -> Result<Vec<u8>> {
        match self {
            Identity::PubKey(data) if data.is_empty() => Ok(Vec::new()),
            Identity::PubKey(data) => {
                if algo != AssemblyHashAlgorithm::SHA1 {
                    return Err(Error::UnsupportedConstruct(format!(
                        "hash algorithm 0x{:04x}",
                        algo
                    )));
                }

                let digest = Sha1::digest(data);

                Ok(digest[digest.len() - 8..].iter().rev().copied().collect())
            }
            Identity::Token(token) => Ok(token.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_token_ecma_key() {
        let identity = Identity::PubKey(hex::decode("00000000000000000400000000000000").unwrap());
        let token = identity.to_token(AssemblyHashAlgorithm::SHA1).unwrap();

        assert_eq!(hex::encode(token), "b77a5c561934e089");
    }

    #[test]
    fn test_to_token_from_pubkey_sha1() {
        let pubkey_data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        let identity = Identity::PubKey(pubkey_data.clone());

        let token = identity.to_token(AssemblyHashAlgorithm::SHA1).unwrap();

        let result = Sha1::digest(&pubkey_data);
        let mut expected = result[result.len() - 8..].to_vec();
        expected.reverse();

        assert_eq!(token, expected);
    }

    #[test]
    fn test_to_token_from_token_identity() {
        let identity = Identity::Token(vec![0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89]);

        let result_sha1 = identity.to_token(AssemblyHashAlgorithm::SHA1).unwrap();
        let result_none = identity.to_token(AssemblyHashAlgorithm::NONE).unwrap();

        assert_eq!(result_sha1, identity.data());
        assert_eq!(result_none, identity.data());
    }

    #[test]
    fn test_to_token_unsupported_algorithm() {
        let identity = Identity::PubKey(vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let result = identity.to_token(0x9999);
        assert!(matches!(result, Err(Error::UnsupportedConstruct(_))));

        // MD5 (0x8003) tokens are not produced for display names
        let result = identity.to_token(0x8003);
        assert!(matches!(result, Err(Error::UnsupportedConstruct(_))));
    }

    #[test]
    fn test_null_identity() {
        let identity = Identity::PubKey(vec![]);
        assert!(identity.is_null());
        assert!(identity
            .to_token(AssemblyHashAlgorithm::SHA1)
            .unwrap()
            .is_empty());
        assert!(Identity::Token(vec![]).is_null());
        assert!(!Identity::Token(vec![1; 8]).is_null());
    }

    #[test]
    fn test_hash_algorithm_consistency() {
        let identity = Identity::PubKey((0..=255).collect());

        let token_sha1 = identity.to_token(AssemblyHashAlgorithm::SHA1).unwrap();

        assert_eq!(token_sha1.len(), 8);
        assert_eq!(
            token_sha1,
            identity.to_token(AssemblyHashAlgorithm::SHA1).unwrap()
        );
    }
}
