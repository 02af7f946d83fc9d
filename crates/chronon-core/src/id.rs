//! Identity types for Chronon
//!
//! Identifiers are 64-bit. Object identities are issued by an
//! [`IdentityProvider`]; replica identities name the participants of a
//! logical (vector) clock domain.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Temporal object identity - opaque, unique for the lifetime of the process
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub const ZERO: ObjectId = ObjectId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        ObjectId(id)
    }

    /// Create an object ID from a process salt and a sequence number
    /// Format: \[salt:24\]\[sequence:40\]
    #[inline]
    pub fn from_salt_sequence(salt: u32, sequence: u64) -> Self {
        let id = (((salt & 0x00FF_FFFF) as u64) << 40) | (sequence & 0x0000_00FF_FFFF_FFFF);
        ObjectId(id)
    }

    #[inline]
    pub fn salt(self) -> u32 {
        (self.0 >> 40) as u32
    }

    #[inline]
    pub fn sequence(self) -> u64 {
        self.0 & 0x0000_00FF_FFFF_FFFF
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        ObjectId(u64::from_le_bytes(bytes))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({:06x}:{:010x})", self.salt(), self.sequence())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06x}:{:010x}", self.salt(), self.sequence())
    }
}

/// Replica identity - one participant of a vector clock domain
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ReplicaId(pub u64);

impl ReplicaId {
    pub const ZERO: ReplicaId = ReplicaId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        ReplicaId(id)
    }
}

impl fmt::Debug for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Replica({:x})", self.0)
    }
}

impl fmt::Display for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// Issues object identities
///
/// Implementations MUST never hand out the same identity twice within the
/// lifetime of the process.
pub trait IdentityProvider: Send + Sync {
    fn issue(&self) -> ObjectId;
}

/// Default identity provider: a random per-process salt combined with a
/// monotonically increasing sequence.
#[derive(Debug)]
pub struct ProcessIdentity {
    salt: u32,
    next: AtomicU64,
}

impl ProcessIdentity {
    pub fn new() -> Self {
        Self::with_salt(rand::random::<u32>())
    }

    pub fn with_salt(salt: u32) -> Self {
        ProcessIdentity {
            salt: salt & 0x00FF_FFFF,
            next: AtomicU64::new(1),
        }
    }

    pub fn salt(&self) -> u32 {
        self.salt
    }
}

impl Default for ProcessIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for ProcessIdentity {
    fn issue(&self) -> ObjectId {
        let sequence = self.next.fetch_add(1, Ordering::Relaxed);
        ObjectId::from_salt_sequence(self.salt, sequence)
    }
}

/// Deterministic identity provider counting up from a start value
#[derive(Debug)]
pub struct SequentialIdentity {
    next: AtomicU64,
}

impl SequentialIdentity {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        SequentialIdentity {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for SequentialIdentity {
    fn issue(&self) -> ObjectId {
        ObjectId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_object_id_salt_sequence() {
        let id = ObjectId::from_salt_sequence(0xABCDEF, 0x12_3456_7890);
        assert_eq!(id.salt(), 0xABCDEF);
        assert_eq!(id.sequence(), 0x12_3456_7890);
    }

    #[test]
    fn test_object_id_salt_truncation() {
        // Salt should be truncated to 24 bits
        let id = ObjectId::from_salt_sequence(0xFFFF_FFFF, 1);
        assert_eq!(id.salt(), 0x00FF_FFFF);
        assert_eq!(id.sequence(), 1);
    }

    #[test]
    fn test_process_identity_unique() {
        let provider = ProcessIdentity::new();
        let issued: HashSet<ObjectId> = (0..10_000).map(|_| provider.issue()).collect();
        assert_eq!(issued.len(), 10_000);
        assert!(issued.iter().all(|id| id.salt() == provider.salt()));
    }

    #[test]
    fn test_process_identity_threads() {
        let provider = std::sync::Arc::new(ProcessIdentity::with_salt(7));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let provider = provider.clone();
                std::thread::spawn(move || (0..1000).map(|_| provider.issue()).collect::<Vec<_>>())
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id));
            }
        }
        assert_eq!(all.len(), 4000);
    }

    #[test]
    fn test_sequential_identity() {
        let provider = SequentialIdentity::starting_at(10);
        assert_eq!(provider.issue(), ObjectId(10));
        assert_eq!(provider.issue(), ObjectId(11));
    }
}
