#![forbid(unsafe_code)]

//! Rank ledger: the bijection between discrete rank and pixel offset.
//!
//! Rows share one uniform height, so rank `r` sits at `r * row_height`,
//! shifted by the header when there is one:
//!
//! ```text
//! offset(r) = r * row_height + (header_height - row_height)   with a header
//! offset(r) = r * row_height                                  without
//! ```
//!
//! # Invariants
//!
//! 1. `rank_from_offset(offset_from_rank(r)) == r` for every content rank.
//! 2. With a header, `rank_from_offset` never returns less than 1; rank 0
//!    belongs to the header. Without a header there is no lower clamp.
//! 3. [`RankLedger::shift`] never touches a dragged row and never produces
//!    two non-dragged rows with the same rank; the only hole it leaves is the
//!    dragged row's own rank.
//!
//! # Reflow policy
//!
//! When a dragged row's tentative rank moves from `from` to `to`:
//!
//! | Direction | Rows shifted | New rank |
//! |-----------|--------------|----------|
//! | up (`to < from`) | ranks `to ..= from - 1` | `rank + 1` |
//! | down (`to > from`) | ranks `from + 1 ..= to` | `rank - 1` |
//!
//! Rows are visited in ascending `(rank, slice position)` order.

use std::time::Duration;

use sortrow_core::transition::Easing;

use crate::table::TableError;

/// How a reflowed row glides to its new offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflowStyle {
    pub duration: Duration,
    pub easing: Easing,
}

/// A row the ledger can reflow.
pub trait RankedRow {
    /// Current rank.
    fn rank(&self) -> u32;

    /// Whether the row is held by a drag session (and so excluded from reflow).
    fn is_dragged(&self) -> bool;

    /// Take `rank` and glide to `offset`.
    fn reflow(&mut self, rank: u32, offset: i32, style: ReflowStyle);
}

/// Rank/offset mapping for one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankLedger {
    row_height: u32,
    header_height: Option<u32>,
}

impl RankLedger {
    /// Ledger for a list without a header.
    pub fn new(row_height: u32) -> Result<Self, TableError> {
        if row_height == 0 || row_height > i32::MAX as u32 {
            return Err(TableError::InvalidRowHeight { row_height });
        }
        Ok(Self {
            row_height,
            header_height: None,
        })
    }

    /// Ledger for a list with a header of `header_height` pixels.
    pub fn with_header(row_height: u32, header_height: u32) -> Result<Self, TableError> {
        let mut ledger = Self::new(row_height)?;
        ledger.set_header_height(Some(header_height))?;
        Ok(ledger)
    }

    /// Uniform row height.
    #[must_use]
    pub const fn row_height(&self) -> u32 {
        self.row_height
    }

    /// Header height, if the list has a header.
    #[must_use]
    pub const fn header_height(&self) -> Option<u32> {
        self.header_height
    }

    /// Add, resize, or remove the header.
    pub fn set_header_height(&mut self, header_height: Option<u32>) -> Result<(), TableError> {
        if let Some(height) = header_height {
            if height == 0 || height > i32::MAX as u32 {
                return Err(TableError::InvalidHeaderHeight { height });
            }
        }
        self.header_height = header_height;
        Ok(())
    }

    /// Lowest rank a content row can hold.
    #[must_use]
    pub const fn first_rank(&self) -> u32 {
        if self.header_height.is_some() { 1 } else { 0 }
    }

    /// Rank of the slot whose top edge is at or above `offset`.
    #[must_use]
    pub fn rank_from_offset(&self, offset: i32) -> i32 {
        let row_height = i64::from(self.row_height);
        let rank = match self.header_height {
            Some(header) => {
                ((i64::from(offset) - i64::from(header)).div_euclid(row_height) + 1).max(1)
            }
            None => i64::from(offset).div_euclid(row_height),
        };
        saturate_i32(rank)
    }

    /// Top offset of `rank`.
    #[must_use]
    pub fn offset_from_rank(&self, rank: u32) -> i32 {
        let row_height = i64::from(self.row_height);
        let base = i64::from(rank) * row_height;
        let offset = match self.header_height {
            Some(header) => base + i64::from(header) - row_height,
            None => base,
        };
        saturate_i32(offset)
    }

    /// Rank a row whose top edge is at `top` should take: the slot under the
    /// row's vertical midpoint.
    #[must_use]
    pub fn rank_at_probe(&self, top: i32) -> i32 {
        let half = i32::try_from(self.row_height / 2).unwrap_or(i32::MAX);
        self.rank_from_offset(top.saturating_add(half))
    }

    /// Reflow siblings for a dragged row whose rank moves `from -> to`.
    ///
    /// The dragged row itself is not touched; the caller assigns it `to`.
    /// Returns how many rows were shifted.
    pub fn shift<R: RankedRow>(
        &self,
        rows: &mut [R],
        from: u32,
        to: u32,
        style: ReflowStyle,
    ) -> usize {
        if from == to {
            return 0;
        }
        let shift_down = to < from;
        let (low, high) = if shift_down {
            (to, from - 1)
        } else {
            (from + 1, to)
        };

        let mut order: Vec<usize> = (0..rows.len()).collect();
        order.sort_by_key(|&index| rows[index].rank());

        let mut shifted = 0;
        for index in order {
            let row = &mut rows[index];
            if row.is_dragged() {
                continue;
            }
            let rank = row.rank();
            if rank < low || rank > high {
                continue;
            }
            let new_rank = if shift_down { rank + 1 } else { rank - 1 };
            row.reflow(new_rank, self.offset_from_rank(new_rank), style);
            shifted += 1;
        }

        #[cfg(feature = "tracing")]
        sortrow_core::debug!(message = "ledger.shift", from, to, shift_down, shifted);

        shifted
    }
}

fn saturate_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Stub {
        rank: u32,
        offset: i32,
        dragged: bool,
    }

    impl RankedRow for Stub {
        fn rank(&self) -> u32 {
            self.rank
        }

        fn is_dragged(&self) -> bool {
            self.dragged
        }

        fn reflow(&mut self, rank: u32, offset: i32, _style: ReflowStyle) {
            self.rank = rank;
            self.offset = offset;
        }
    }

    const STYLE: ReflowStyle = ReflowStyle {
        duration: Duration::from_millis(150),
        easing: Easing::EaseOut,
    };

    fn rows(ledger: &RankLedger, count: u32) -> Vec<Stub> {
        (0..count)
            .map(|i| {
                let rank = ledger.first_rank() + i;
                Stub {
                    rank,
                    offset: ledger.offset_from_rank(rank),
                    dragged: false,
                }
            })
            .collect()
    }

    fn ranks(rows: &[Stub]) -> Vec<u32> {
        rows.iter().map(|row| row.rank).collect()
    }

    #[test]
    fn zero_row_height_is_rejected() {
        assert_eq!(
            RankLedger::new(0),
            Err(TableError::InvalidRowHeight { row_height: 0 })
        );
        assert_eq!(
            RankLedger::with_header(20, 0),
            Err(TableError::InvalidHeaderHeight { height: 0 })
        );
    }

    #[test]
    fn header_30_row_20_maps_offsets_to_ranks() {
        let ledger = RankLedger::with_header(20, 30).expect("valid ledger");
        assert_eq!(ledger.rank_from_offset(30), 1);
        assert_eq!(ledger.rank_from_offset(50), 2);
        assert_eq!(ledger.rank_from_offset(49), 1);
        assert_eq!(ledger.offset_from_rank(1), 30);
        assert_eq!(ledger.offset_from_rank(2), 50);
    }

    #[test]
    fn header_clamps_low_ranks_to_one() {
        let ledger = RankLedger::with_header(20, 30).expect("valid ledger");
        assert_eq!(ledger.rank_from_offset(0), 1);
        assert_eq!(ledger.rank_from_offset(-500), 1);
        assert_eq!(ledger.first_rank(), 1);
    }

    #[test]
    fn headerless_floor_has_no_lower_clamp() {
        let ledger = RankLedger::new(20).expect("valid ledger");
        assert_eq!(ledger.rank_from_offset(0), 0);
        assert_eq!(ledger.rank_from_offset(19), 0);
        assert_eq!(ledger.rank_from_offset(20), 1);
        assert_eq!(ledger.rank_from_offset(-1), -1);
        assert_eq!(ledger.first_rank(), 0);
    }

    #[test]
    fn probe_uses_row_midpoint() {
        let ledger = RankLedger::with_header(20, 20).expect("valid ledger");
        // Rank 3 sits at 60; nudging up less than half a row keeps it.
        assert_eq!(ledger.rank_at_probe(60), 3);
        assert_eq!(ledger.rank_at_probe(51), 3);
        assert_eq!(ledger.rank_at_probe(49), 2);
    }

    #[test]
    fn shift_up_increments_ranks_between() {
        let ledger = RankLedger::with_header(20, 30).expect("valid ledger");
        let mut rows = rows(&ledger, 4); // ranks 1..=4
        rows[2].dragged = true; // rank 3 is being dragged to rank 1

        let shifted = ledger.shift(&mut rows, 3, 1, STYLE);
        rows[2].rank = 1;

        assert_eq!(shifted, 2);
        assert_eq!(ranks(&rows), vec![2, 3, 1, 4]);
        assert_eq!(rows[0].offset, ledger.offset_from_rank(2));
        assert_eq!(rows[1].offset, ledger.offset_from_rank(3));
    }

    #[test]
    fn shift_down_decrements_ranks_between() {
        let ledger = RankLedger::new(20).expect("valid ledger");
        let mut rows = rows(&ledger, 5); // ranks 0..=4
        rows[1].dragged = true;

        let shifted = ledger.shift(&mut rows, 1, 3, STYLE);
        rows[1].rank = 3;

        assert_eq!(shifted, 2);
        assert_eq!(ranks(&rows), vec![0, 3, 1, 2, 4]);
    }

    #[test]
    fn shift_skips_dragged_rows_entirely() {
        let ledger = RankLedger::new(10).expect("valid ledger");
        let mut rows = rows(&ledger, 3);
        rows[0].dragged = true;
        rows[1].dragged = true;
        let before = rows[1].clone();

        ledger.shift(&mut rows, 0, 2, STYLE);

        assert_eq!(rows[1], before);
        assert_eq!(rows[2].rank, 1);
    }

    #[test]
    fn shift_to_same_rank_is_a_noop() {
        let ledger = RankLedger::new(10).expect("valid ledger");
        let mut rows = rows(&ledger, 3);
        assert_eq!(ledger.shift(&mut rows, 1, 1, STYLE), 0);
        assert_eq!(ranks(&rows), vec![0, 1, 2]);
    }

    #[test]
    fn extreme_offsets_saturate() {
        let ledger = RankLedger::new(1).expect("valid ledger");
        assert_eq!(ledger.offset_from_rank(u32::MAX), i32::MAX);
        assert_eq!(ledger.rank_from_offset(i32::MIN), i32::MIN);
    }
}
