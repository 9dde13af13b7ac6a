use alloy::primitives::U256;
use eyre::{Context, OptionExt, Result, bail};

/// Number of fractional digits printed for scaled amounts.
pub const DISPLAY_DECIMALS: u32 = 6;

pub trait ScaleDecimals
where
    Self: Sized,
{
    /// Renders `self / 10**decimals` with exactly [`DISPLAY_DECIMALS`] fractional
    /// digits, rounding half up.
    fn scale_decimals(self, decimals: u32) -> Result<String>;
}
impl ScaleDecimals for U256 {
    fn scale_decimals(self, decimals: u32) -> Result<String> {
        let ten = U256::from(10u8);

        if decimals <= DISPLAY_DECIMALS {
            let divisor = ten
                .checked_pow(U256::from(decimals))
                .ok_or_eyre("10**decimals overflow")?;
            let pad = ten
                .checked_pow(U256::from(DISPLAY_DECIMALS - decimals))
                .ok_or_eyre("10**(6 - decimals) overflow")?;
            let integer = self.checked_div(divisor).ok_or_eyre("amount / 10**decimals")?;
            let fraction = self
                .checked_rem(divisor)
                .ok_or_eyre("amount % 10**decimals")?
                .checked_mul(pad)
                .ok_or_eyre("fraction * 10**(6 - decimals) overflow")?;

            return Ok(join_fixed_point(integer, fraction));
        }

        // 10**77 is the largest power of ten that fits in 256 bits; any bigger
        // unit is more than twice the largest amount, so the result rounds to 0.
        let Some(unit) = ten.checked_pow(U256::from(decimals - DISPLAY_DECIMALS)) else {
            return Ok(join_fixed_point(U256::ZERO, U256::ZERO));
        };
        let mut micros = self.checked_div(unit).ok_or_eyre("amount / unit")?;
        let remainder = self.checked_rem(unit).ok_or_eyre("amount % unit")?;
        if remainder >= unit - remainder {
            micros = micros
                .checked_add(U256::from(1u8))
                .ok_or_eyre("round half up overflow")?;
        }

        let one = ten
            .checked_pow(U256::from(DISPLAY_DECIMALS))
            .ok_or_eyre("10**6")?;
        Ok(join_fixed_point(micros / one, micros % one))
    }
}

fn join_fixed_point(integer: U256, fraction: U256) -> String {
    format!(
        "{integer}.{:0>width$}",
        fraction.to_string(),
        width = DISPLAY_DECIMALS as usize
    )
}

/// Parses an unsigned base-10 integer amount, as subgraphs store uint256 values.
pub fn parse_amount(raw: &str) -> Result<U256> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        bail!("{raw:?} is not an unsigned integer");
    }

    U256::from_str_radix(digits, 10)
        .ok()
        .ok_or_eyre(format!("{raw:?} does not fit in a uint256"))
}

/// Same as [`ScaleDecimals::scale_decimals`] for signed 64-bit amounts.
pub fn scale_signed(amount: i64, decimals: u32) -> Result<String> {
    let scaled = U256::from(amount.unsigned_abs()).scale_decimals(decimals)?;
    Ok(with_sign(amount < 0, scaled))
}

/// Scales a stored amount string. Integers, signed or not, are scaled exactly;
/// anything else that reads as a finite number is scaled as `f64`.
pub fn scale_amount(raw: &str, decimals: u32) -> Result<String> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if let Ok(amount) = parse_amount(digits) {
        return Ok(with_sign(negative, amount.scale_decimals(decimals)?));
    }

    let amount: f64 = trimmed
        .parse()
        .wrap_err_with(|| format!("{raw:?} is not a number"))?;
    scale_float(amount, decimals)
}

pub fn scale_float(amount: f64, decimals: u32) -> Result<String> {
    if !amount.is_finite() {
        bail!("{amount} is not a finite amount");
    }

    Ok(format!(
        "{:.*}",
        DISPLAY_DECIMALS as usize,
        amount / 10f64.powf(f64::from(decimals))
    ))
}

fn with_sign(negative: bool, scaled: String) -> String {
    if negative {
        return format!("-{scaled}");
    }
    scaled
}
