use derive_more::Constructor;

///
/// One sum observed `count` times within a single batch of rolls
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct RollOutcome {
    pub sum: i64,
    pub count: i64,
}
