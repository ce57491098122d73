//! Process-wide string interner for column names and charsets.
//!
//! Large schemas repeat the same handful of strings (`"id"`, `"created_at"`,
//! `"utf8mb4"`) across thousands of columns. Interning hands every caller
//! the same `Arc<str>` allocation for equal strings.

use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

static INTERNER: LazyLock<Mutex<FxHashSet<Arc<str>>>> =
    LazyLock::new(|| Mutex::new(FxHashSet::default()));

/// Returns the shared allocation for `s`, inserting it on first use.
pub fn intern(s: &str) -> Arc<str> {
    let mut set = INTERNER.lock();
    if let Some(existing) = set.get(s) {
        return Arc::clone(existing);
    }
    let interned: Arc<str> = Arc::from(s);
    set.insert(Arc::clone(&interned));
    interned
}
