//! Layer names.
//!
//! Names live in one process-wide interner so a [`LayerId`] is a 4-byte
//! `Copy` key. Generated names are `layer_N`; names loaded from a document
//! are interned as written, and generation skips any name already taken.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);
static NEXT_LAYER: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LayerId(Spur);

impl LayerId {
    pub fn intern(name: &str) -> Self {
        LayerId(NAMES.get_or_intern(name))
    }

    pub fn as_str(&self) -> &str {
        NAMES.resolve(&self.0)
    }

    /// A `layer_N` name not used by any existing id.
    pub fn generate() -> Self {
        loop {
            let n = NEXT_LAYER.fetch_add(1, Ordering::Relaxed);
            let name = format!("layer_{n}");
            if NAMES.get(&name).is_none() {
                return Self::intern(&name);
            }
        }
    }
}

impl From<String> for LayerId {
    fn from(name: String) -> Self {
        Self::intern(&name)
    }
}

impl From<LayerId> for String {
    fn from(id: LayerId) -> Self {
        id.as_str().to_owned()
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
