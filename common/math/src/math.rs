#![no_std]

use common_errors::ERROR_INSUFFICIENT_RESERVES;

multiversx_sc::imports!();

/// Reserve-pair pricing shared by the rental market and the exchange pool.
///
/// All results are floored. `get_bancor_output` and `get_bancor_input` are
/// inverses of each other up to one unit of rounding.
#[multiversx_sc::module]
pub trait SharedMathModule {
    /// Amount received from `out_reserve` when `inp` is added to `inp_reserve`:
    /// `out_reserve * inp / (inp_reserve + inp)`.
    fn get_bancor_output(
        &self,
        inp_reserve: &BigUint,
        out_reserve: &BigUint,
        inp: &BigUint,
    ) -> BigUint {
        let denominator = inp_reserve + inp;
        if denominator == BigUint::zero() {
            return BigUint::zero();
        }

        self.mul_div_floor(out_reserve, inp, &denominator)
    }

    /// Amount that must be added to `inp_reserve` to take `out` from `out_reserve`:
    /// `inp_reserve * out / (out_reserve - out)`.
    fn get_bancor_input(
        &self,
        out_reserve: &BigUint,
        inp_reserve: &BigUint,
        out: &BigUint,
    ) -> BigUint {
        require!(out < out_reserve, ERROR_INSUFFICIENT_RESERVES);

        let remaining = out_reserve - out;
        self.mul_div_floor(inp_reserve, out, &remaining)
    }

    fn mul_div_floor(&self, a: &BigUint, b: &BigUint, c: &BigUint) -> BigUint {
        (a * b) / c
    }
}
