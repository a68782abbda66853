/// Constant-time comparison utilities.
///
/// Implementations must ensure that execution time does not depend on the
/// contents being compared, only on their length.
pub(crate) trait ConstantTimeEq {
    /// Returns `true` if `self == other`, in constant time.
    ///
    /// This method must not introduce data-dependent branches or early exits.
    fn ct_eq(&self, other: &Self) -> bool;
}

impl ConstantTimeEq for [u8] {
    /// Constant-time equality test for byte slices.
    ///
    /// All bytes are XORed and accumulated before the single comparison
    /// against zero, so the running time does not depend on where the first
    /// difference occurs. Slices of different lengths compare unequal; the
    /// lengths themselves are public.
    #[inline(never)]
    fn ct_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let diff = self
            .iter()
            .zip(other)
            .map(|(a, b)| a ^ b)
            .fold(0u8, |acc, v| acc | v);

        core::hint::black_box(diff) == 0
    }
}
