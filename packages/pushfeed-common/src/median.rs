use cosmwasm_std::Int256;

use crate::types::DataFeed;

/// Returns the sorted middle, or the average of the two middle items if the
/// slice has an even number of elements. `None` for an empty slice.
fn median_by<T: Ord + Copy>(items: &mut [T], average: impl Fn(T, T) -> T) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    items.sort_unstable();
    let middle = items.len() / 2;
    if items.len() % 2 == 0 {
        Some(average(items[middle - 1], items[middle]))
    } else {
        Some(items[middle])
    }
}

/// `floor((a + b) / 2)`. Negative odd sums round toward negative infinity,
/// so the mean of -1 and -2 is -2.
///
/// Inputs are int224, so the sum cannot overflow int256.
pub fn floor_average(a: Int256, b: Int256) -> Int256 {
    let two = Int256::from(2i32);
    let sum = a + b;
    let quotient = sum / two;
    if sum.is_negative() && sum % two != Int256::zero() {
        quotient - Int256::one()
    } else {
        quotient
    }
}

pub fn median_value(values: &mut [Int256]) -> Option<Int256> {
    median_by(values, floor_average)
}

pub fn median_timestamp(timestamps: &mut [u32]) -> Option<u32> {
    median_by(timestamps, |a, b| ((a as u64 + b as u64) / 2) as u32)
}

/// Aggregates Beacon records into a Beacon set record. Value and timestamp
/// medians are taken independently; uninitialized Beacons take part as `(0, 0)`.
pub fn aggregate(feeds: &[DataFeed]) -> Option<DataFeed> {
    let mut values: Vec<Int256> = feeds.iter().map(|f| f.value).collect();
    let mut timestamps: Vec<u32> = feeds.iter().map(|f| f.timestamp).collect();
    Some(DataFeed {
        value: median_value(&mut values)?,
        timestamp: median_timestamp(&mut timestamps)?,
    })
}
