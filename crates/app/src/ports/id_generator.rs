//! Identifier port: candidate ids for resources created without one.

/// Source of candidate identifiers.
///
/// Candidates may collide with existing ids; the caller checks uniqueness and
/// asks again.
pub trait IdGenerator {
    /// Produce the next candidate.
    fn next_id(&self) -> String;
}
