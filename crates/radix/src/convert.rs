//! Digit sequence conversion between two bases.
//!
//! The integer represented by the source digits is never built. Instead the destination digits
//! are kept least-significant first and every source digit is folded in with Horner's rule:
//! each existing destination digit is multiplied by the source base, the running carry is
//! added, and the sum (`acc`) is split back into a digit (`acc % dst`) and a new carry
//! (`acc / dst`). Whatever carry is left after the last destination digit is flushed as new
//! high-order digits.
//!
//! With `carry < src` on entry the carry stays below `src` throughout, so `acc` is bounded
//! by `src * dst` and fits a `u64` for any pair of `u32` bases.

use crate::{Radix, RadixError, RadixResult};

/// A single accumulator step, reported to the trace callback of [`Converter::convert_traced`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A source digit was folded into the destination digits built so far.
    ///
    /// `carry` is what remained to be flushed afterwards and `width` is the number of
    /// destination digits before the flush.
    Consume {
        position: usize,
        digit: u32,
        carry: u64,
        width: usize,
    },
    /// A residual carry was flushed as a new high-order destination digit.
    Carry { digit: u32 },
    /// Zero digits were prepended to reach a fixed output length.
    Pad { count: usize },
}

/// Converts digit sequences from one base to another.
///
/// # Example
/// ```
/// use mbid_radix::{Converter, Radix};
///
/// let converter = Converter::new(Radix::new(10)?, Radix::BINARY);
/// assert_eq!(converter.convert(&[1, 0])?, vec![1, 0, 1, 0]);
/// assert_eq!(converter.convert_fixed(&[3], 4)?, vec![0, 0, 1, 1]);
/// # Ok::<(), mbid_radix::RadixError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Converter {
    src: Radix,
    dst: Radix,
}

impl Converter {
    /// Creates a converter from `src` digits to `dst` digits.
    pub fn new(src: Radix, dst: Radix) -> Self {
        Self { src, dst }
    }

    /// Creates a converter from raw bases, validating both.
    ///
    /// # Errors
    ///
    /// Returns [`RadixError::InvalidBase`] if either base is less than 2.
    pub fn from_bases(src_base: u32, dst_base: u32) -> RadixResult<Self> {
        Ok(Self::new(Radix::new(src_base)?, Radix::new(dst_base)?))
    }

    pub fn src(&self) -> Radix {
        self.src
    }

    pub fn dst(&self) -> Radix {
        self.dst
    }

    /// Returns the converter for the opposite direction.
    pub fn inverse(&self) -> Self {
        Self::new(self.dst, self.src)
    }

    /// Converts `digits` to the minimal destination representation.
    ///
    /// # Errors
    ///
    /// Returns [`RadixError::InvalidDigit`] if any digit is not less than the source base.
    pub fn convert(&self, digits: &[u32]) -> RadixResult<Vec<u32>> {
        self.convert_traced(digits, None, &mut |_| {})
    }

    /// Converts `digits` to exactly `len` destination digits, left-padded with zeros.
    ///
    /// # Errors
    ///
    /// Returns [`RadixError::InvalidDigit`] if any digit is not less than the source base, or
    /// [`RadixError::Overflow`] if the value needs more than `len` destination digits, or
    /// [`RadixError::WidthTooLarge`] if `len` is above [`max_fixed_len`] for the input.
    pub fn convert_fixed(&self, digits: &[u32], len: usize) -> RadixResult<Vec<u32>> {
        self.convert_traced(digits, Some(len), &mut |_| {})
    }

    /// Converts `digits`, reporting every accumulator step to `trace`.
    ///
    /// With `fixed_len` set this behaves as [`convert_fixed`](Self::convert_fixed), otherwise
    /// as [`convert`](Self::convert). Nothing is reported for an identity conversion other
    /// than padding.
    pub fn convert_traced(
        &self,
        digits: &[u32],
        fixed_len: Option<usize>,
        trace: &mut dyn FnMut(Step),
    ) -> RadixResult<Vec<u32>> {
        self.validate(digits)?;
        if let Some(len) = fixed_len {
            let limit = max_fixed_len(digits.len());
            if len > limit {
                return Err(RadixError::WidthTooLarge { len, limit });
            }
        }

        let converted = if self.src == self.dst {
            digits.to_vec()
        } else {
            self.rebase(digits, trace)
        };

        match fixed_len {
            Some(len) => fit(&converted, len, trace),
            None => Ok(converted),
        }
    }

    /// Returns the number of destination digits needed for any `len`-digit source value.
    ///
    /// This is the length of the largest such value, `[src - 1; len]`, once converted.
    pub fn max_digits(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        if self.src == self.dst {
            return len;
        }
        self.rebase(&vec![self.src.max_digit(); len], &mut |_| {}).len()
    }

    fn validate(&self, digits: &[u32]) -> RadixResult<()> {
        match digits
            .iter()
            .enumerate()
            .find(|&(_, &digit)| !self.src.contains(digit))
        {
            Some((position, &digit)) => Err(RadixError::InvalidDigit {
                digit,
                base: self.src.get(),
                position,
            }),
            None => Ok(()),
        }
    }

    /// Rebases already validated digits. The result has no leading zeros, except that a
    /// non-empty zero value becomes `[0]`.
    fn rebase(&self, digits: &[u32], trace: &mut dyn FnMut(Step)) -> Vec<u32> {
        let src = u64::from(self.src.get());
        let dst = u64::from(self.dst.get());

        // Least-significant first while building.
        let mut out: Vec<u32> = Vec::new();

        for (position, &digit) in digits.iter().enumerate() {
            let mut carry = u64::from(digit);
            for slot in out.iter_mut() {
                let acc = u64::from(*slot) * src + carry;
                // acc % dst < dst <= u32::MAX
                *slot = (acc % dst) as u32;
                carry = acc / dst;
            }

            trace(Step::Consume {
                position,
                digit,
                carry,
                width: out.len(),
            });

            while carry > 0 {
                let flushed = (carry % dst) as u32;
                out.push(flushed);
                trace(Step::Carry { digit: flushed });
                carry /= dst;
            }
        }

        if out.is_empty() && !digits.is_empty() {
            out.push(0);
        }

        out.reverse();
        out
    }
}

/// Largest fixed width accepted for `src_len` source digits.
///
/// A `u32` digit never needs more than 32 destination digits, so no `src_len`-digit value
/// needs more than `32 * src_len`.
pub fn max_fixed_len(src_len: usize) -> usize {
    src_len.max(1).saturating_mul(32)
}

fn fit(digits: &[u32], len: usize, trace: &mut dyn FnMut(Step)) -> RadixResult<Vec<u32>> {
    let start = digits
        .iter()
        .position(|&digit| digit != 0)
        .unwrap_or(digits.len());
    let significant = &digits[start..];

    if significant.len() > len {
        return Err(RadixError::Overflow { len });
    }

    let count = len - significant.len();
    if count > 0 {
        trace(Step::Pad { count });
    }

    let mut out = vec![0; count];
    out.extend_from_slice(significant);
    Ok(out)
}

/// Converts `digits` from `src_base` to `dst_base` using the minimal number of digits.
///
/// # Errors
///
/// Returns [`RadixError::InvalidBase`] for a base below 2 and [`RadixError::InvalidDigit`]
/// for a digit not less than `src_base`.
pub fn convert(digits: &[u32], src_base: u32, dst_base: u32) -> RadixResult<Vec<u32>> {
    Converter::from_bases(src_base, dst_base)?.convert(digits)
}

/// Converts `digits` from `src_base` to exactly `len` digits in `dst_base`.
///
/// # Errors
///
/// As [`convert`], plus [`RadixError::Overflow`] when the value needs more than `len` digits
/// and [`RadixError::WidthTooLarge`] when `len` exceeds [`max_fixed_len`].
pub fn convert_fixed(
    digits: &[u32],
    src_base: u32,
    dst_base: u32,
    len: usize,
) -> RadixResult<Vec<u32>> {
    Converter::from_bases(src_base, dst_base)?.convert_fixed(digits, len)
}

/// Returns the number of `dst_base` digits needed to hold any `len`-digit `src_base` value.
pub fn max_digits(len: usize, src_base: u32, dst_base: u32) -> RadixResult<usize> {
    Ok(Converter::from_bases(src_base, dst_base)?.max_digits(len))
}
