use rayon::prelude::*;

use crate::particles::scheduler::{per_thread_scratch, with_thread_scratch};
use crate::particles::{TraversalStats, WorkerRange};
use crate::utils::BarnesHutError;

#[test]
fn test_ranges_tile_all_cells() {
    for workers in [1, 2, 4, 8, 16, 64] {
        let mut next = 0;
        for rank in 0..workers {
            let r = WorkerRange::for_rank(64, rank, workers).unwrap();
            assert_eq!(r.start, next);
            assert_eq!(r.len(), 64 / workers);
            next = r.end;
        }
        assert_eq!(next, 64);
    }
}

#[test]
fn test_last_rank_upper_bound() {
    let r = WorkerRange::for_rank(16, 3, 4).unwrap();
    assert_eq!(r.range(), 12..16);
    assert!(!r.is_empty());
}

#[test]
fn test_invalid_configurations() {
    assert_eq!(WorkerRange::for_rank(16, 0, 0), Err(BarnesHutError::NoWorkers));
    assert_eq!(
        WorkerRange::for_rank(16, 0, 3),
        Err(BarnesHutError::IndivisibleCellCount { cells: 16, workers: 3 })
    );
    assert_eq!(
        WorkerRange::for_rank(16, 4, 4),
        Err(BarnesHutError::InvalidRank { rank: 4, workers: 4 })
    );
}

#[test]
fn test_stats_sum() {
    let a = TraversalStats { m2p: 1, p2p_ext: 2, p2p_in: 1 };
    let b = TraversalStats { m2p: 3, p2p_ext: 0, p2p_in: 1 };
    let total: TraversalStats = vec![a, b].into_iter().sum();
    assert_eq!(total, TraversalStats { m2p: 4, p2p_ext: 2, p2p_in: 2 });

    let mut c = a;
    c += b;
    assert_eq!(c, total);
}

#[test]
fn test_one_scratch_set_per_worker_thread() {
    let threads = rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap();
    threads.install(|| {
        let slots = per_thread_scratch(4, 16);
        assert_eq!(slots.len(), 3);

        let cells: Vec<usize> = (0..4096).collect();
        cells.par_iter().with_max_len(1).for_each(|&c| {
            with_thread_scratch(&slots, |s| {
                s.pool.ensure_capacity(c % 64 + 1);
                s.queue.push_back(c);
            })
        });

        // 4096 single-cell tasks went through the three scratch sets built up front.
        let visits: usize = slots.iter().map(|s| s.lock().unwrap().queue.len()).sum();
        assert_eq!(visits, 4096);
        assert!(slots.iter().all(|s| s.lock().unwrap().pool.size() <= 64));
    });
}

#[test]
fn test_scratch_outside_a_pool_uses_first_slot() {
    let slots = per_thread_scratch(2, 2);
    let len = std::thread::spawn(move || {
        with_thread_scratch(&slots, |s| s.queue.push_back(7));
        slots[0].lock().unwrap().queue.len()
    })
    .join()
    .unwrap();
    assert_eq!(len, 1);
}
