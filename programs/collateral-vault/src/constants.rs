/// Fixed-point scale of the borrow index. The index starts at `INDEX_SCALE`
/// (i.e. 1.0) and only ever grows.
pub const INDEX_SCALE: u128 = 1_000_000_000_000;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;
pub const APY_DENOMINATOR: u64 = 100;
pub const LEVERAGE_DENOMINATOR: u64 = 100;
