//! Frame pool tests.
//!
//! Verifies lowest-free allocation, release, occupant handover, and the
//! snapshot rendering.

use pagesim_core::paging::FramePool;
use pretty_assertions::assert_eq;

#[test]
fn allocates_the_lowest_free_frame() {
    let mut pool = FramePool::new(3);
    assert_eq!(pool.try_allocate(0, 0), Some(0));
    assert_eq!(pool.try_allocate(0, 1), Some(1));
    assert_eq!(pool.try_allocate(1, 0), Some(2));
    assert_eq!(pool.try_allocate(1, 1), None);
    assert_eq!(pool.occupied_count(), 3);
}

#[test]
fn release_makes_a_frame_reusable() {
    let mut pool = FramePool::new(2);
    assert_eq!(pool.try_allocate(0, 0), Some(0));
    assert_eq!(pool.try_allocate(0, 1), Some(1));
    pool.release(0);
    assert_eq!(pool.occupied_count(), 1);
    assert_eq!(pool.try_allocate(2, 5), Some(0));
    assert_eq!(pool.get(0).and_then(|f| f.occupant), Some((2, 5)));
}

#[test]
fn reassign_swaps_the_occupant_without_freeing() {
    let mut pool = FramePool::new(1);
    assert_eq!(pool.try_allocate(0, 0), Some(0));
    pool.reassign(0, 3, 7);
    assert_eq!(pool.occupied_count(), 1);
    assert_eq!(pool.get(0).and_then(|f| f.occupant), Some((3, 7)));
}

#[test]
fn allocation_records_the_occupant_atomically() {
    // The claim and the occupant write are one call; after it returns
    // the frame must already identify its page.
    let mut pool = FramePool::new(1);
    let index = pool.try_allocate(4, 9).unwrap();
    assert_eq!(pool.get(index).and_then(|f| f.occupant), Some((4, 9)));
}

#[test]
fn snapshot_lists_every_frame() {
    let mut pool = FramePool::new(2);
    let _ = pool.try_allocate(4, 9);
    let rendered = pool.to_string();
    assert!(rendered.contains("job 4 page 9"));
    assert!(rendered.contains("[empty]"));
    assert_eq!(rendered.lines().count(), 2);
}
