// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Shared counter demo: each worker bumps the same cell and the total is
//! extracted once every thread has finished.

use std::thread;

use ordered_atomics::{AtomicCell, UpdateOrdering};

const WORKERS: usize = 4;
const BUMPS: usize = 250_000;

fn main() {
    let counter = AtomicCell::prepare(0usize);
    thread::scope(|s| {
        let counter = &counter;
        for worker in 0..WORKERS {
            s.spawn(move || {
                for _ in 0..BUMPS {
                    counter.fetch_add(1, UpdateOrdering::SeqCst);
                }
                println!("worker {worker} done");
            });
        }
    });
    let total = counter.dispose();
    println!("total: {total} (expected {})", WORKERS * BUMPS);
    assert_eq!(total, WORKERS * BUMPS);
}
