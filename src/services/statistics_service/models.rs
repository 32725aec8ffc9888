use rust_decimal::Decimal;

///
/// Aggregate over every batch rolled with one dice/sides configuration
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationTotal {
    pub dice_no: i32,
    pub sides_no: i32,
    /// Number of batches
    pub total_simulations: i64,
    /// Number of rolls across those batches
    pub total_rolls: i64,
}

///
/// Share of all rolls ever recorded that produced `sum` with the
/// requested configuration, as a percentage with two decimals
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionEntry {
    pub sum: i64,
    pub percentage: Decimal,
}
