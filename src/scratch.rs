//! Per-worker scratch buffers, leased and released for the duration of a
//! single chunk.
//!
//! Spec §9 asks for thread-local holders keyed off worker identity, not
//! shared between threads. We key off `rayon::current_thread_index()`
//! (falling back to the OS thread id when not running inside a rayon
//! pool, e.g. in single-threaded tests) rather than relying on
//! `thread_local!` directly, since a caller-supplied [`crate::parallel::Parallelizer`]
//! is not guaranteed to reuse the same OS thread across chunks the way
//! rayon's own pool does; worker-index keying degrades gracefully either
//! way.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

fn worker_key() -> u64 {
    if let Some(idx) = rayon::current_thread_index() {
        return idx as u64;
    }
    // Fallback: hash the OS thread id. Good enough to keep buffers from
    // being shared across threads; this path does not need to be fast.
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    hasher.finish()
}

#[derive(Default)]
struct Holder {
    ints: Vec<i32>,
    doubles: Vec<f64>,
    big_ints: Vec<i32>,
}

static POOLS: Lazy<Mutex<HashMap<u64, RefCell<Holder>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// A leased buffer. Released back to the holder on drop, so callers never
/// need to remember to give it back explicitly, including on early return
/// or panic unwinding.
pub struct IntBuf {
    buf: Vec<i32>,
    key: u64,
    big: bool,
}

impl IntBuf {
    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.buf
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.buf
    }

    pub fn resize(&mut self, len: usize, value: i32) {
        if self.buf.len() < len {
            self.buf.resize(len, value);
        } else {
            self.buf.truncate(len);
            self.buf.fill(value);
        }
    }
}

impl Drop for IntBuf {
    fn drop(&mut self) {
        let pools = POOLS.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cell) = pools.get(&self.key) {
            let mut holder = cell.borrow_mut();
            let dest = if self.big { &mut holder.big_ints } else { &mut holder.ints };
            std::mem::swap(dest, &mut self.buf);
        }
    }
}

pub struct DoubleBuf {
    buf: Vec<f64>,
    key: u64,
}

impl DoubleBuf {
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.buf
    }

    pub fn resize(&mut self, len: usize, value: f64) {
        if self.buf.len() < len {
            self.buf.resize(len, value);
        } else {
            self.buf.truncate(len);
            self.buf.fill(value);
        }
    }
}

impl Drop for DoubleBuf {
    fn drop(&mut self) {
        let pools = POOLS.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cell) = pools.get(&self.key) {
            let mut holder = cell.borrow_mut();
            std::mem::swap(&mut holder.doubles, &mut self.buf);
        }
    }
}

fn with_holder<T>(f: impl FnOnce(&mut Holder) -> T) -> (T, u64) {
    let key = worker_key();
    let mut pools = POOLS.lock().unwrap_or_else(|e| e.into_inner());
    let cell = pools.entry(key).or_insert_with(|| RefCell::new(Holder::default()));
    let result = f(&mut cell.borrow_mut());
    (result, key)
}

/// Borrows this worker's small-int scratch buffer, taking ownership of
/// whatever array it held (growing it is the caller's job via `resize`).
/// The array never shrinks its capacity within the holder across borrows.
pub fn borrow_int_buf() -> IntBuf {
    let (buf, key) = with_holder(|h| std::mem::take(&mut h.ints));
    IntBuf { buf, key, big: false }
}

/// Borrows this worker's "big" int buffer, used for the larger scratch
/// arrays (e.g. per-row index caches) that would otherwise compete with
/// the small-int buffer for growth.
pub fn borrow_big_int_buf() -> IntBuf {
    let (buf, key) = with_holder(|h| std::mem::take(&mut h.big_ints));
    IntBuf { buf, key, big: true }
}

pub fn borrow_double_buf() -> DoubleBuf {
    let (buf, key) = with_holder(|h| std::mem::take(&mut h.doubles));
    DoubleBuf { buf, key }
}
