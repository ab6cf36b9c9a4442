//! Pure playback traversal: deterministic shuffle, next/prev decisions and
//! structure repair. No I/O, no clock; the only randomness flows through
//! the caller-supplied shuffle seed.

use super::{QueueState, RepeatMode, PLAYBACK_HISTORY_CAP};
use crate::model::VideoItem;
use std::collections::HashSet;
use uuid::Uuid;

/// Outcome of a next/prev computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDecision {
    /// Move the cursor to this identity and start loading it.
    AdvanceTo(Uuid),
    /// End of traversal; playback stops on the current video.
    Stop,
    /// Nothing to do.
    NoOp,
}

/// Produces a seeded Fisher-Yates permutation of the video identities.
///
/// When `current` is present it is moved to the front so the playing video
/// anchors the new order. Deterministic on (identities, current, seed).
pub fn generate_shuffle_order(
    videos: &[VideoItem],
    current: Option<Uuid>,
    seed: u64,
) -> Vec<Uuid> {
    let mut order: Vec<Uuid> = videos.iter().map(|v| v.id).collect();
    if order.is_empty() {
        return order;
    }

    // xorshift64; a zero state would never leave zero.
    let mut rng_state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };

    for i in (1..order.len()).rev() {
        rng_state ^= rng_state << 13;
        rng_state ^= rng_state >> 7;
        rng_state ^= rng_state << 17;
        let j = (rng_state as usize) % (i + 1);
        order.swap(i, j);
    }

    if let Some(current_id) = current {
        if let Some(pos) = order.iter().position(|id| *id == current_id) {
            if pos > 0 {
                order.remove(pos);
                order.insert(0, current_id);
            }
        }
    }

    order
}

/// Computes the next video to play.
///
/// Repeat-one replays the current video without touching the history.
/// Otherwise the candidate is the successor of the current video in the
/// active traversal order (shuffle order when shuffling, queue order
/// otherwise); at the tail the order wraps only under repeat-all. Advancing
/// pushes the departed video onto the playback history.
pub fn compute_next(queue: &QueueState) -> (NavDecision, QueueState) {
    let current_id = match queue.current_item_id {
        Some(id) if !queue.videos.is_empty() => id,
        _ => return (NavDecision::Stop, queue.clone()),
    };

    if queue.repeat_mode == RepeatMode::One {
        return (NavDecision::AdvanceTo(current_id), queue.clone());
    }

    let order: Vec<Uuid> = if queue.shuffle_enabled && !queue.shuffle_order.is_empty() {
        queue.shuffle_order.clone()
    } else {
        queue.videos.iter().map(|v| v.id).collect()
    };

    let pos = match order.iter().position(|id| *id == current_id) {
        Some(pos) => pos,
        None => return (NavDecision::Stop, queue.clone()),
    };

    let candidate = if pos + 1 < order.len() {
        Some(order[pos + 1])
    } else if queue.repeat_mode == RepeatMode::All {
        order.first().copied()
    } else {
        None
    };

    match candidate {
        Some(next_id) => {
            let mut updated = queue.clone();
            updated.push_history(current_id);
            (NavDecision::AdvanceTo(next_id), updated)
        }
        None => (NavDecision::Stop, queue.clone()),
    }
}

/// Computes the previous video to play.
///
/// While shuffling, "previous" replays the playback history in reverse;
/// sequentially it is simply the preceding queue entry. The start of either
/// order is a no-op.
pub fn compute_prev(queue: &QueueState) -> (NavDecision, QueueState) {
    let current_id = match queue.current_item_id {
        Some(id) if !queue.videos.is_empty() => id,
        _ => return (NavDecision::NoOp, queue.clone()),
    };

    if queue.shuffle_enabled {
        let mut updated = queue.clone();
        return match updated.playback_history.pop() {
            Some(previous) => (NavDecision::AdvanceTo(previous), updated),
            None => (NavDecision::NoOp, queue.clone()),
        };
    }

    match queue.index_of(current_id) {
        Some(0) | None => (NavDecision::NoOp, queue.clone()),
        Some(index) => (
            NavDecision::AdvanceTo(queue.videos[index - 1].id),
            queue.clone(),
        ),
    }
}

/// Reconciles the playback structures with the current videos sequence.
///
/// Runs after every mutation that may have changed `videos`: stale ids are
/// dropped from the shuffle order and history, newly introduced videos are
/// appended to a live shuffle order, the history is trimmed to its cap and
/// the cursor is recomputed from `current_item_id`. Idempotent.
pub fn repair_playback_structures(mut queue: QueueState) -> QueueState {
    let known: HashSet<Uuid> = queue.videos.iter().map(|v| v.id).collect();

    queue.shuffle_order.retain(|id| known.contains(id));
    queue.playback_history.retain(|id| known.contains(id));

    if queue.shuffle_enabled && !queue.shuffle_order.is_empty() {
        let ordered: HashSet<Uuid> = queue.shuffle_order.iter().copied().collect();
        for video in &queue.videos {
            if !ordered.contains(&video.id) {
                queue.shuffle_order.push(video.id);
            }
        }
    }

    while queue.playback_history.len() > PLAYBACK_HISTORY_CAP {
        queue.playback_history.remove(0);
    }

    if let Some(id) = queue.current_item_id {
        if !known.contains(&id) {
            queue.current_item_id = None;
        }
    }
    queue.current_index = queue.current_item_id.and_then(|id| queue.index_of(id));

    queue
}
