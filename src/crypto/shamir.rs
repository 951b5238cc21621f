//! Shamir secret sharing over GF(P).
//!
//! [`SecretSharing::split`] hides a 32-byte secret as the constant term of a
//! random polynomial of degree `threshold - 1` and hands out its evaluations at
//! `x = 1..=n`. [`SecretSharing::combine`] evaluates the Lagrange interpolant of
//! the supplied points at `x = 0`.
//!
//! # Caveat: too few shares
//!
//! The threshold is not recorded in the shares. Combining fewer shares than
//! the threshold used at split time is *not* detected: it returns a value
//! that is almost certainly not the secret. Callers that need to detect this
//! must authenticate the recovered secret themselves, as
//! [`crate::security::escrow::open`] does by decrypting with it.
//!
//! # Example
//!
//! ```rust
//! # use shamir_vault::crypto::shamir::SecretSharing;
//! let sss = SecretSharing::new();
//! let mut secret = [0u8; 32];
//! secret[31] = 2;
//! let shares = sss.split(&secret, 3, 5).unwrap();
//!
//! let subset = [shares[0].clone(), shares[2].clone(), shares[4].clone()];
//! let recovered = sss.combine(&subset).unwrap();
//! assert_eq!(*recovered, secret);
//! ```

use std::collections::HashSet;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::errors::{Result, VaultError};
use crate::crypto::field::{encode_element, PrimeField, ELEMENT_BYTES};
use crate::crypto::share::Share;
use crate::security::secret::Secret32;

/// Redraws allowed when a share value does not fit 32 bytes. Only reachable
/// with the standard field with probability about 2^-248 per share.
const MAX_POLYNOMIAL_ATTEMPTS: usize = 8;

/// Sharing engine bound to one prime field.
#[derive(Debug, Clone)]
pub struct SecretSharing {
    field: PrimeField,
}

impl SecretSharing {
    /// Engine over the standard field P = 2^256 + 297.
    pub fn new() -> Self {
        let field = PrimeField::standard().clone();
        assert!(field.dominates_secrets(), "standard modulus must exceed 2^256");
        Self { field }
    }

    /// Engine over a caller-chosen field. Secrets are reduced mod P, which is
    /// lossy when P does not exceed 2^256. Moduli above the standard one are
    /// rejected: their elements would not always fit 32 bytes.
    pub fn with_field(field: PrimeField) -> Result<Self> {
        if field.modulus() > PrimeField::standard().modulus() {
            return Err(VaultError::ModulusTooWide { bits: field.modulus().bits() });
        }
        if !field.dominates_secrets() {
            warn!(
                modulus = %field.modulus(),
                "field does not exceed 2^256; secrets will be reduced mod P"
            );
        }
        Ok(Self { field })
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// Splits `secret` into `share_count` shares, any `threshold` of which
    /// reconstruct it. Uses the operating system RNG.
    pub fn split(
        &self,
        secret: &[u8; ELEMENT_BYTES],
        threshold: u32,
        share_count: u32,
    ) -> Result<Vec<Share>> {
        self.split_with_rng(secret, threshold, share_count, &mut OsRng)
    }

    pub fn split_with_rng<R: RngCore + CryptoRng>(
        &self,
        secret: &[u8; ELEMENT_BYTES],
        threshold: u32,
        share_count: u32,
        rng: &mut R,
    ) -> Result<Vec<Share>> {
        validate_split_params(threshold, share_count)?;
        debug!(threshold, share_count, "splitting secret");

        let constant = self.field.element_from_bytes(secret);

        for attempt in 1..=MAX_POLYNOMIAL_ATTEMPTS {
            let coefficients = self.random_polynomial(&constant, threshold, rng);
            match self.evaluate_shares(&coefficients, share_count) {
                Ok(shares) => return Ok(shares),
                Err(VaultError::ElementOverflow { .. }) => {
                    warn!(attempt, "share value exceeded 32 bytes, redrawing coefficients");
                }
                Err(e) => return Err(e),
            }
        }

        Err(VaultError::ArithmeticImpossibility(format!(
            "no encodable polynomial after {} attempts",
            MAX_POLYNOMIAL_ATTEMPTS
        )))
    }

    /// Recovers the secret from two or more shares with distinct indices.
    ///
    /// See the module docs: supplying fewer shares than the original
    /// threshold yields a wrong value, not an error.
    pub fn combine(&self, shares: &[Share]) -> Result<Secret32> {
        validate_combine_input(shares)?;
        debug!(share_count = shares.len(), "combining shares");

        let basis = self.lagrange_basis_at_zero(shares)?;

        let mut acc = BigUint::zero();
        for (share, coefficient) in shares.iter().zip(basis.iter()) {
            let y = self.field.element_from_bytes(share.value());
            acc = self.field.add(&acc, &self.field.mul(&y, coefficient));
        }

        let bytes = encode_element(&acc)?;
        Ok(Zeroizing::new(bytes))
    }

    /// c_0 = secret, c_1..c_{t-1} uniform in the field.
    fn random_polynomial<R: RngCore + CryptoRng>(
        &self,
        constant: &BigUint,
        threshold: u32,
        rng: &mut R,
    ) -> Vec<BigUint> {
        std::iter::once(constant.clone())
            .chain((1..threshold).map(|_| self.field.random_element(rng)))
            .collect()
    }

    fn evaluate_shares(&self, coefficients: &[BigUint], share_count: u32) -> Result<Vec<Share>> {
        let mut shares = Vec::with_capacity(share_count as usize);
        for x in 1..=share_count {
            let y = self.evaluate(coefficients, &BigUint::from(x));
            shares.push(Share::new(x, encode_element(&y)?)?);
        }
        Ok(shares)
    }

    /// Horner evaluation, reducing after every step.
    fn evaluate(&self, coefficients: &[BigUint], x: &BigUint) -> BigUint {
        coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, c| self.field.add(&self.field.mul(&acc, x), c))
    }

    /// l_i(0) = prod_{j != i} (0 - x_j) / prod_{j != i} (x_i - x_j)
    fn lagrange_basis_at_zero(&self, shares: &[Share]) -> Result<Vec<BigUint>> {
        let xs: Vec<BigInt> = shares.iter().map(|s| BigInt::from(s.index())).collect();

        xs.iter()
            .enumerate()
            .map(|(i, xi)| {
                let mut numerator = BigUint::one();
                let mut denominator = BigUint::one();
                for (j, xj) in xs.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    numerator = self.field.mul(&numerator, &self.field.reduce_signed(&-xj));
                    denominator = self.field.mul(&denominator, &self.field.reduce_signed(&(xi - xj)));
                }
                self.field.div(&numerator, &denominator)
            })
            .collect()
    }
}

impl Default for SecretSharing {
    fn default() -> Self {
        Self::new()
    }
}

/// Threshold and share-count checks shared by the engine and the CLI.
pub fn validate_split_params(threshold: u32, share_count: u32) -> Result<()> {
    if threshold < 2 {
        return Err(VaultError::InvalidThreshold { threshold });
    }
    if share_count < threshold {
        return Err(VaultError::InsufficientShareCount { threshold, share_count });
    }
    Ok(())
}

fn validate_combine_input(shares: &[Share]) -> Result<()> {
    if shares.len() < 2 {
        return Err(VaultError::TooFewShares { provided: shares.len() });
    }
    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        if share.index() == 0 {
            return Err(VaultError::ZeroIndex);
        }
        if !seen.insert(share.index()) {
            return Err(VaultError::DuplicateIndex { index: share.index() });
        }
    }
    Ok(())
}
