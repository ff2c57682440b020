//! Debug assertion macros for ring queue invariants.
//!
//! Only active in debug builds (`debug_assert!`), so release builds pay
//! nothing for them.

// =============================================================================
// INV-IDX-01: Cursor Range
// =============================================================================

/// Assert that a cursor lies inside the slot array.
///
/// **Invariant**: `0 ≤ head < capacity` and `0 ≤ tail < capacity`
///
/// Used in: `push()`, `pop()` after advancing a cursor
macro_rules! debug_assert_cursor_in_range {
    ($name:literal, $cursor:expr, $capacity:expr) => {
        debug_assert!(
            $cursor < $capacity,
            "INV-IDX-01 violated: {} {} outside [0, {})",
            $name,
            $cursor,
            $capacity
        )
    };
}

// =============================================================================
// INV-CNT-01: Bounded Count
// =============================================================================

/// Assert that the live count does not exceed capacity.
///
/// **Invariant**: `0 ≤ len ≤ capacity`
///
/// Used in: `push()` after storing the value
macro_rules! debug_assert_bounded_count {
    ($count:expr, $capacity:expr) => {
        debug_assert!(
            $count <= $capacity,
            "INV-CNT-01 violated: count {} exceeds capacity {}",
            $count,
            $capacity
        )
    };
}

// =============================================================================
// INV-FULL-01: Full Flag Only At Cursor Collision
// =============================================================================

/// Assert that `full` is only set while `head == tail`.
///
/// **Invariant**: `full ⟹ head == tail`
///
/// Used in: `push()` after updating the flag
macro_rules! debug_assert_full_flag {
    ($full:expr, $head:expr, $tail:expr) => {
        debug_assert!(
            !$full || $head == $tail,
            "INV-FULL-01 violated: full flag set with head {} != tail {}",
            $head,
            $tail
        )
    };
}

// =============================================================================
// INV-SLOT-01: Occupied Exactly In Live Range
// =============================================================================

/// Assert that a slot about to be written is vacant.
///
/// **Invariant**: `storage[i]` holds a value ⟺ `i` is in the live range
///
/// Used in: `try_push()` before storing at `tail`
macro_rules! debug_assert_slot_vacant {
    ($slot:expr, $idx:expr) => {
        debug_assert!(
            $slot.is_none(),
            "INV-SLOT-01 violated: writing occupied slot {}",
            $idx
        )
    };
}

/// Assert that a slot about to be read is occupied.
///
/// Used in: `pop()` after taking the value at `head`
macro_rules! debug_assert_slot_occupied {
    ($slot:expr, $idx:expr) => {
        debug_assert!(
            $slot.is_some(),
            "INV-SLOT-01 violated: reading vacant slot {}",
            $idx
        )
    };
}

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_cursor_in_range;
pub(crate) use debug_assert_full_flag;
pub(crate) use debug_assert_slot_occupied;
pub(crate) use debug_assert_slot_vacant;
