//! Binary-coded decimal fields.

/// A decoded binary-coded decimal quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bcd {
    /// Decimal value, using the raw nibble for any pseudo-tetrade.
    pub value: u32,
    /// Number of nibbles greater than nine.
    pub pseudo_tetrades: u8,
}

impl Bcd {
    /// Whether every nibble was a decimal digit.
    pub fn is_valid(&self) -> bool {
        self.pseudo_tetrades == 0
    }
}

/// Decode a BCD quantity of up to eight nibbles, least significant nibble
/// first.
pub fn decode(mut dat: u32) -> Bcd {
    let mut value = 0;
    let mut pseudo_tetrades = 0;
    let mut f = 1;

    while dat != 0 {
        let digit = dat & 0x0F;
        if digit > 9 {
            pseudo_tetrades += 1;
        }

        value += f * digit;
        f *= 10;
        dat >>= 4;
    }

    Bcd {
        value,
        pseudo_tetrades,
    }
}

/// Decode a single BCD byte of a named field, logging any pseudo-tetrade.
pub fn decode_field(field: &'static str, byte: u8) -> Bcd {
    let bcd = decode(byte as u32);

    if !bcd.is_valid() {
        log::warn!("Pseudo-tetrade in BCD field `{field}` ({byte:#04x}).");
    }

    bcd
}
