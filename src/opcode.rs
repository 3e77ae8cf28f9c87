//! Edit opcodes produced from a matching-block decomposition.

/// The kind of edit a single [`OpCode`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `a[i1..i2]` and `b[j1..j2]` are identical.
    Equal,
    /// `a[i1..i2]` should be deleted; `b` has nothing in its place (`j1 == j2`).
    Delete,
    /// `b[j1..j2]` should be inserted; `a` has nothing in its place (`i1 == i2`).
    Insert,
    /// `a[i1..i2]` should be replaced by `b[j1..j2]`; both spans are non-empty.
    Replace,
}

/// A single edit instruction turning `a[i1..i2]` into `b[j1..j2]`.
///
/// A full opcode list tiles `[0, len(a)) x [0, len(b))` in lockstep: the first
/// opcode starts at `(0, 0)`, each opcode's `(i1, j1)` equals its predecessor's
/// `(i2, j2)`, and the last opcode ends at `(len(a), len(b))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCode {
    pub tag: Tag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}
