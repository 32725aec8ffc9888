use sqlx::FromRow;

///
/// A stored outcome: `count` rolls summing to `sum`,
/// belonging to the batch `batch_id`
///
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct OutcomeItemEntity {
    pub id: i64,
    pub batch_id: i64,
    #[sqlx(rename = "roll_sum")]
    pub sum: i64,
    #[sqlx(rename = "amount")]
    pub count: i64,
}

///
/// One persisted simulation run, owning its outcome items
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntity {
    pub id: i64,
    pub dice_no: i32,
    pub sides_no: i32,
    pub items: Vec<OutcomeItemEntity>,
}

impl BatchEntity {
    ///
    /// Number of rolls recorded in this batch
    ///
    pub fn total_rolls(&self) -> i64 {
        self.items.iter().map(|item| item.count).sum()
    }
}

#[derive(FromRow)]
pub(super) struct BatchRow {
    pub id: i64,
    pub dice_no: i32,
    pub sides_no: i32,
}
