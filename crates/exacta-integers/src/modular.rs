//! Modular arithmetic.
//!
//! Residue arithmetic for prime moduli in two widths: machine words for
//! moduli whose products fit in a `u64`, and [`Integer`] for everything
//! else. Also carries the primality tests used when a prime field is
//! requested.

use num_traits::{One, Zero};
use rand::Rng;

use crate::error::{AlgebraError, Result};
use crate::Integer;

/// Bases that make Miller-Rabin deterministic for every `u64`.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Reduces a signed value into `[0, p)`.
#[must_use]
pub fn normalize_word(value: i64, p: u64) -> u64 {
    let r = i128::from(value).rem_euclid(i128::from(p));
    // r < p <= u64::MAX
    r as u64
}

/// Reduces an integer into `[0, p)`.
#[must_use]
pub fn normalize_big(value: &Integer, p: &Integer) -> Integer {
    value.rem_euclid(p)
}

/// `(a + b) mod p` for reduced operands.
#[must_use]
pub fn add_word(a: u64, b: u64, p: u64) -> u64 {
    let (sum, overflow) = a.overflowing_add(b);
    if overflow || sum >= p {
        sum.wrapping_sub(p)
    } else {
        sum
    }
}

/// `(a - b) mod p` for reduced operands.
#[must_use]
pub fn sub_word(a: u64, b: u64, p: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        p - (b - a)
    }
}

/// `(a * b) mod p`, computed in 128 bits.
#[must_use]
pub fn mul_word(a: u64, b: u64, p: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(p)) as u64
}

/// `-a mod p` for a reduced operand.
#[must_use]
pub fn neg_word(a: u64, p: u64) -> u64 {
    if a == 0 {
        0
    } else {
        p - a
    }
}

/// Computes `base^exp mod p` using binary exponentiation.
#[must_use]
pub fn pow_word(base: u64, mut exp: u64, p: u64) -> u64 {
    let mut base = base % p;
    let mut result = 1 % p;

    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_word(result, base, p);
        }
        base = mul_word(base, base, p);
        exp >>= 1;
    }

    result
}

/// Computes the inverse of `a` modulo `p` with the extended Euclidean
/// algorithm.
///
/// # Errors
///
/// Returns [`AlgebraError::DivisionByZero`] if `a` is zero and
/// [`AlgebraError::InvalidOperation`] if `a` and `p` are not coprime.
pub fn inv_word(a: u64, p: u64) -> Result<u64> {
    let a = a % p;
    if a == 0 {
        return Err(AlgebraError::division_by_zero(format!(
            "tried to invert zero modulo {p}"
        )));
    }

    let mut t = 0i128;
    let mut new_t = 1i128;
    let mut r = i128::from(p);
    let mut new_r = i128::from(a);

    while new_r != 0 {
        let quotient = r / new_r;
        (t, new_t) = (new_t, t - quotient * new_t);
        (r, new_r) = (new_r, r - quotient * new_r);
    }

    if r > 1 {
        return Err(AlgebraError::invalid(format!(
            "{a} is not invertible modulo {p}"
        )));
    }

    Ok(t.rem_euclid(i128::from(p)) as u64)
}

/// Computes the inverse of `a` modulo `p` for arbitrary precision values.
///
/// # Errors
///
/// Same conditions as [`inv_word`].
pub fn inv_big(a: &Integer, p: &Integer) -> Result<Integer> {
    let a = a.rem_euclid(p);
    if a.is_zero() {
        return Err(AlgebraError::division_by_zero(format!(
            "tried to invert zero modulo {p}"
        )));
    }

    let mut t = Integer::ZERO;
    let mut new_t = Integer::ONE;
    let mut r = p.clone();
    let mut new_r = a.clone();

    while !new_r.is_zero() {
        let quotient = &r / &new_r;
        let next_t = &t - &(&quotient * &new_t);
        t = std::mem::replace(&mut new_t, next_t);
        let next_r = &r - &(&quotient * &new_r);
        r = std::mem::replace(&mut new_r, next_r);
    }

    if !r.is_one() {
        return Err(AlgebraError::invalid(format!(
            "{a} is not invertible modulo {p}"
        )));
    }

    Ok(t.rem_euclid(p))
}

/// Deterministic primality test for machine words.
#[must_use]
pub fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &w in &WITNESSES {
        if n % w == 0 {
            return n == w;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d & 1 == 0 {
        d >>= 1;
        s += 1;
    }

    'witness: for &a in &WITNESSES {
        let mut x = pow_word(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_word(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Miller-Rabin primality test.
///
/// Values that fit in a `u64` are decided exactly by [`is_prime_u64`].
/// Larger values run `rounds` random witnesses, so a composite slips
/// through with probability at most `4^-rounds`.
pub fn is_probable_prime<R: Rng + ?Sized>(n: &Integer, rounds: u32, rng: &mut R) -> bool {
    if let Some(small) = n.to_u64() {
        return is_prime_u64(small);
    }
    if n.is_negative() || n.is_even() {
        return false;
    }
    for &w in &WITNESSES {
        if (n % &Integer::from(w)).is_zero() {
            return false;
        }
    }

    let one = Integer::ONE;
    let n_minus_one = n - &one;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    let two = Integer::new(2);
    while d.is_even() {
        d = d / &two;
        s += 1;
    }

    // witnesses drawn from [2, n - 2]
    let span = n - &Integer::new(3);
    'witness: for _ in 0..rounds {
        let a = Integer::random_below(&span, rng) + &two;
        let mut x = a.pow_mod(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x).rem_euclid(n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
