use ulid::Ulid;

/// Upper bound of the decorative monthly trend, in percent.
pub const DECORATION_CEILING: f64 = 5.0;

/// Supplies the decorative percentage shown next to a month that collected
/// something. The value is filler, not a measurement; it never feeds back
/// into any computed figure.
pub trait TrendDecoration {
    fn next_percent(&mut self) -> f64;
}

/// Always returns the same placeholder percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTrend(pub f64);

impl TrendDecoration for FixedTrend {
    fn next_percent(&mut self) -> f64 {
        self.0.clamp(0.0, DECORATION_CEILING)
    }
}

/// xorshift64* stream mapped onto `[0, DECORATION_CEILING)`.
#[derive(Debug, Clone)]
pub struct SeededTrend {
    state: u64,
}

impl SeededTrend {
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl TrendDecoration for SeededTrend {
    fn next_percent(&mut self) -> f64 {
        unit_to_percent(self.next_u64() >> 11)
    }
}

/// Unreproducible decoration: each value is drawn from the 80 random bits
/// of a fresh ULID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidTrend;

impl TrendDecoration for UlidTrend {
    fn next_percent(&mut self) -> f64 {
        unit_to_percent((Ulid::new().random() >> ULID_SPARE_BITS) as u64)
    }
}

const ULID_SPARE_BITS: u32 = 80 - 53;

/// Maps 53 random bits onto `[0, DECORATION_CEILING)`.
fn unit_to_percent(bits: u64) -> f64 {
    (bits as f64 / (1u64 << 53) as f64) * DECORATION_CEILING
}
