multiversx_sc::imports!();

use crate::errors::ERR_ARITHMETIC_OVERFLOW;

/// Width of the amount domain. Amounts are stored as `BigUint`, which never
/// wraps, so the 256-bit ceiling of an ERC20 balance is enforced here.
pub const AMOUNT_BYTES: usize = 32;

#[multiversx_sc::module]
pub trait CheckedMathModule {
    /// Largest representable amount, `2^256 - 1`.
    fn max_amount(&self) -> BigUint {
        BigUint::from_bytes_be(&[0xffu8; AMOUNT_BYTES])
    }

    fn require_in_range(&self, value: &BigUint) {
        require!(*value <= self.max_amount(), ERR_ARITHMETIC_OVERFLOW);
    }

    fn checked_add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let sum = a + b;
        self.require_in_range(&sum);
        sum
    }

    fn checked_mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let product = a * b;
        self.require_in_range(&product);
        product
    }

    /// `a - b`, failing with `err` instead of going below zero.
    fn checked_sub(&self, a: &BigUint, b: &BigUint, err: &str) -> BigUint {
        require!(a >= b, err);
        a - b
    }
}
