//! The Ratcliff/Obershelp-style sequence matcher: the engine everything else
//! in this crate is built on.
//!
//! A [`SequenceMatcher`] owns two borrowed sequences `a` and `b`, plus an
//! optional junk predicate over `b`'s elements. It is not safe to share
//! across threads while mutating: [`SequenceMatcher::get_matching_blocks`]
//! and [`SequenceMatcher::get_opcodes`] memoize their result on first call,
//! so even read-only queries require `&mut self`. When comparing one `b`
//! against many candidate `a`s, build one matcher and call
//! [`SequenceMatcher::set_seq1`] per candidate rather than constructing a new
//! matcher each time, which is the one optimization this type exists to offer.

use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;
use tracing::trace;

use crate::opcode::{OpCode, Tag};

/// The Ratcliff/Obershelp longest-contiguous-match engine, extended with a
/// junk predicate and an adaptive "popular element" heuristic.
pub struct SequenceMatcher<'a, T>
where
    T: Eq + Hash + Clone,
{
    isjunk: Option<Box<dyn Fn(&T) -> bool + 'a>>,
    autojunk: bool,

    a: &'a [T],
    b: &'a [T],

    b2j: FxHashMap<T, Vec<usize>>,
    junk: FxHashSet<T>,
    popular: FxHashSet<T>,

    fullbcount: Option<FxHashMap<T, usize>>,
    matching_blocks: Option<Vec<(usize, usize, usize)>>,
    opcodes: Option<Vec<OpCode>>,
}

impl<'a, T> SequenceMatcher<'a, T>
where
    T: Eq + Hash + Clone,
{
    /// Builds a matcher over `a` and `b`. `isjunk`, when present, is tested
    /// against every distinct element of `b` once, up front; it is never
    /// consulted for `a`.
    pub fn new(
        isjunk: Option<Box<dyn Fn(&T) -> bool + 'a>>,
        a: &'a [T],
        b: &'a [T],
        autojunk: bool,
    ) -> Self {
        let mut matcher = Self {
            isjunk,
            autojunk,
            a: &[],
            b: &[],
            b2j: FxHashMap::default(),
            junk: FxHashSet::default(),
            popular: FxHashSet::default(),
            fullbcount: None,
            matching_blocks: None,
            opcodes: None,
        };
        matcher.set_seqs(a, b);
        matcher
    }

    pub fn set_seqs(&mut self, a: &'a [T], b: &'a [T]) {
        self.set_seq1(a);
        self.set_seq2(b);
    }

    /// Replaces `a`. Invalidates the matching-block and opcode caches but
    /// leaves every `b`-derived structure untouched, which is the whole point
    /// of the matcher's design: cross-product comparisons should set `b` once
    /// and vary `a`.
    pub fn set_seq1(&mut self, a: &'a [T]) {
        if self.a.as_ptr() == a.as_ptr() && self.a.len() == a.len() {
            return;
        }
        self.a = a;
        self.matching_blocks = None;
        self.opcodes = None;
    }

    /// Replaces `b`. Invalidates everything, including the lazily built
    /// `fullbcount`, and rebuilds `b2j` from scratch.
    pub fn set_seq2(&mut self, b: &'a [T]) {
        if self.b.as_ptr() == b.as_ptr() && self.b.len() == b.len() {
            return;
        }
        self.b = b;
        self.matching_blocks = None;
        self.opcodes = None;
        self.fullbcount = None;
        self.chain_b();
    }

    fn chain_b(&mut self) {
        self.b2j.clear();
        self.junk.clear();
        self.popular.clear();

        let b = self.b;
        let estimated_unique = (b.len() / 3).max(16);
        self.b2j.reserve(estimated_unique);

        for (i, elt) in b.iter().enumerate() {
            self.b2j.entry(elt.clone()).or_insert_with(Vec::new).push(i);
        }

        if let Some(isjunk) = &self.isjunk {
            let junk_keys: Vec<T> = self.b2j.keys().filter(|elt| isjunk(elt)).cloned().collect();
            for elt in junk_keys {
                self.b2j.remove(&elt);
                self.junk.insert(elt);
            }
        }

        if self.autojunk && b.len() >= 200 {
            let ntest = b.len() / 100 + 1;
            let popular_keys: Vec<T> = self
                .b2j
                .iter()
                .filter(|(_, idxs)| idxs.len() > ntest)
                .map(|(elt, _)| elt.clone())
                .collect();
            for elt in popular_keys {
                self.b2j.remove(&elt);
                self.popular.insert(elt);
            }
        }

        trace!(
            b_len = b.len(),
            junk = self.junk.len(),
            popular = self.popular.len(),
            "rebuilt b2j index"
        );
    }

    fn is_b_junk(&self, elt: &T) -> bool {
        self.junk.contains(elt)
    }

    /// Finds the lexicographically-earliest longest junk-free contiguous
    /// match within `a[alo..ahi]` and `b[blo..bhi]`, then extends it first
    /// through adjacent non-junk equal elements and finally through adjacent
    /// junk equal elements.
    ///
    /// Deliberately does not strip common prefixes/suffixes first: for
    /// `a = "ab"`, `b = "acab"`, stripping would settle on a leading `"a"`
    /// and miss the more useful trailing `"ab"` match.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0usize);

        let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();
        for i in alo..ahi {
            let mut newj2len: FxHashMap<usize, usize> = FxHashMap::default();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let newk = k + 1;
                    newj2len.insert(j, newk);
                    if newk > bestsize {
                        besti = i + 1 - newk;
                        bestj = j + 1 - newk;
                        bestsize = newk;
                    }
                }
            }
            j2len = newj2len;
        }

        while besti > alo
            && bestj > blo
            && !self.is_b_junk(&self.b[bestj - 1])
            && self.a[besti - 1] == self.b[bestj - 1]
        {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && !self.is_b_junk(&self.b[bestj + bestsize])
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        while besti > alo
            && bestj > blo
            && self.is_b_junk(&self.b[bestj - 1])
            && self.a[besti - 1] == self.b[bestj - 1]
        {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.is_b_junk(&self.b[bestj + bestsize])
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }

    /// Returns the canonical, sorted, collapsed, sentinel-terminated list of
    /// matching triples. Memoized: repeated calls with no intervening
    /// `set_seq1`/`set_seq2` return the cached result.
    ///
    /// Decomposition is an explicit LIFO work-queue rather than recursion,
    /// since pathological inputs have been observed to overflow a recursive
    /// implementation's call stack.
    pub fn get_matching_blocks(&mut self) -> Vec<(usize, usize, usize)> {
        if let Some(cached) = &self.matching_blocks {
            return cached.clone();
        }

        let mut queue: Vec<(usize, usize, usize, usize)> = vec![(0, self.a.len(), 0, self.b.len())];
        let mut matches: Vec<(usize, usize, usize)> = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k > 0 {
                matches.push((i, j, k));
                if alo < i && blo < j {
                    queue.push((alo, i, blo, j));
                }
                if i + k < ahi && j + k < bhi {
                    queue.push((i + k, ahi, j + k, bhi));
                }
            }
        }

        matches.sort_unstable();

        let mut collapsed: Vec<(usize, usize, usize)> = Vec::with_capacity(matches.len() + 1);
        for (i, j, k) in matches {
            if let Some(last) = collapsed.last_mut() {
                let (li, lj, lk): &mut (usize, usize, usize) = last;
                if *li + *lk == i && *lj + *lk == j {
                    *lk += k;
                    continue;
                }
            }
            collapsed.push((i, j, k));
        }
        collapsed.push((self.a.len(), self.b.len(), 0));

        self.matching_blocks = Some(collapsed.clone());
        collapsed
    }

    /// Derives edit opcodes from the matching blocks. Memoized like
    /// [`Self::get_matching_blocks`].
    pub fn get_opcodes(&mut self) -> Vec<OpCode> {
        if let Some(cached) = &self.opcodes {
            return cached.clone();
        }

        let matches = self.get_matching_blocks();
        let mut opcodes = Vec::with_capacity(matches.len() * 2);

        let (mut i, mut j) = (0usize, 0usize);
        for (ai, bj, size) in matches {
            let tag = if i < ai && j < bj {
                Some(Tag::Replace)
            } else if i < ai {
                Some(Tag::Delete)
            } else if j < bj {
                Some(Tag::Insert)
            } else {
                None
            };
            if let Some(tag) = tag {
                opcodes.push(OpCode { tag, i1: i, i2: ai, j1: j, j2: bj });
            }
            if size > 0 {
                opcodes.push(OpCode {
                    tag: Tag::Equal,
                    i1: ai,
                    i2: ai + size,
                    j1: bj,
                    j2: bj + size,
                });
            }
            i = ai + size;
            j = bj + size;
        }

        self.opcodes = Some(opcodes.clone());
        opcodes
    }

    /// Clusters opcodes into hunks separated by equal runs longer than `2n`,
    /// clipping each hunk's leading/trailing context to `n` elements.
    ///
    /// An empty opcode list is not a documented edge case to special-case in
    /// rendering: it is substituted, here, by a singleton `Equal` opcode, which
    /// is the source behavior, and downstream renderers rely on it.
    pub fn get_grouped_opcodes(&mut self, n: usize) -> Vec<Vec<OpCode>> {
        let mut codes = self.get_opcodes();
        if codes.is_empty() {
            codes.push(OpCode { tag: Tag::Equal, i1: 0, i2: 1, j1: 0, j2: 1 });
        }

        if codes[0].tag == Tag::Equal {
            let c = &mut codes[0];
            c.i1 = c.i1.max(c.i2.saturating_sub(n));
            c.j1 = c.j1.max(c.j2.saturating_sub(n));
        }
        let last = codes.len() - 1;
        if codes[last].tag == Tag::Equal {
            let c = &mut codes[last];
            c.i2 = c.i2.min(c.i1 + n);
            c.j2 = c.j2.min(c.j1 + n);
        }

        let nn = n + n;
        let mut groups: Vec<Vec<OpCode>> = Vec::new();
        let mut group: Vec<OpCode> = Vec::new();

        for OpCode { tag, mut i1, i2, mut j1, j2 } in codes {
            if tag == Tag::Equal && i2 - i1 > nn {
                group.push(OpCode { tag, i1, i2: i1 + n, j1, j2: j1 + n });
                groups.push(std::mem::take(&mut group));
                i1 = i1.max(i2.saturating_sub(n));
                j1 = j1.max(j2.saturating_sub(n));
            }
            group.push(OpCode { tag, i1, i2, j1, j2 });
        }
        if !group.is_empty() && !(group.len() == 1 && group[0].tag == Tag::Equal) {
            groups.push(group);
        }

        groups
    }

    /// `2M / (|a| + |b|)`, where `M` is the total length of all matching
    /// blocks. Returns `1.0` when both sequences are empty.
    pub fn ratio(&mut self) -> f64 {
        let matches: usize = self.get_matching_blocks().iter().map(|&(_, _, n)| n).sum();
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on [`Self::ratio`] treating both sequences as multisets.
    /// Computed by materializing `b`'s element counts on first use, which
    /// does not disturb `b2j`.
    pub fn quick_ratio(&mut self) -> f64 {
        if self.fullbcount.is_none() {
            let mut counts: FxHashMap<T, usize> = FxHashMap::default();
            for elt in self.b {
                *counts.entry(elt.clone()).or_insert(0) += 1;
            }
            self.fullbcount = Some(counts);
        }
        let fullbcount = self.fullbcount.as_ref().expect("just populated");

        let mut avail: FxHashMap<T, isize> = FxHashMap::default();
        let mut matches = 0usize;
        for elt in self.a {
            let numb = match avail.get(elt) {
                Some(&n) => n,
                None => *fullbcount.get(elt).unwrap_or(&0) as isize,
            };
            avail.insert(elt.clone(), numb - 1);
            if numb > 0 {
                matches += 1;
            }
        }
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Cheapest similarity bound: `2*min(|a|,|b|) / (|a|+|b|)`. Never caches
    /// anything, so it takes `&self`.
    pub fn real_quick_ratio(&self) -> f64 {
        let (la, lb) = (self.a.len(), self.b.len());
        calculate_ratio(la.min(lb), la + lb)
    }
}

fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length > 0 {
        2.0 * matches as f64 / length as f64
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn ratio_of_abcd_bcde_is_three_quarters() {
        let a = chars("abcd");
        let b = chars("bcde");
        let mut m = SequenceMatcher::new(None, &a, &b, true);
        assert_eq!(m.ratio(), 0.75);
    }

    #[test]
    fn matching_blocks_with_space_as_junk() {
        let a = chars("private Thread currentThread;");
        let b = chars("private volatile Thread currentThread;");
        let mut m: SequenceMatcher<char> = SequenceMatcher::new(Some(Box::new(|c: &char| *c == ' ')), &a, &b, true);
        assert_eq!(m.get_matching_blocks(), vec![(0, 0, 8), (8, 17, 21), (29, 38, 0)]);
        assert_eq!(
            m.get_opcodes().iter().map(|o| (o.tag, o.i1, o.i2, o.j1, o.j2)).collect::<Vec<_>>(),
            vec![
                (Tag::Equal, 0, 8, 0, 8),
                (Tag::Insert, 8, 8, 8, 17),
                (Tag::Equal, 8, 29, 17, 38),
            ]
        );
        assert_eq!(format!("{:.3}", m.ratio()), "0.866");
    }

    #[test]
    fn opcodes_for_qabxcd_vs_abycdf() {
        let a = chars("qabxcd");
        let b = chars("abycdf");
        let mut m = SequenceMatcher::new(None, &a, &b, true);
        let ops: Vec<_> = m.get_opcodes().iter().map(|o| (o.tag, o.i1, o.i2, o.j1, o.j2)).collect();
        assert_eq!(
            ops,
            vec![
                (Tag::Delete, 0, 1, 0, 0),
                (Tag::Equal, 1, 3, 0, 2),
                (Tag::Replace, 3, 4, 2, 3),
                (Tag::Equal, 4, 6, 3, 5),
                (Tag::Insert, 6, 6, 5, 6),
            ]
        );
    }

    #[test]
    fn find_longest_match_with_junk_spaces() {
        let a = chars(" abcd");
        let b = chars("abcd abcd");
        let m: SequenceMatcher<char> = SequenceMatcher::new(Some(Box::new(|c: &char| *c == ' ')), &a, &b, true);
        assert_eq!(m.find_longest_match(0, 5, 0, 9), (1, 0, 4));
    }

    #[test]
    fn find_longest_match_does_not_strip_common_affixes() {
        let a = chars("ab");
        let b = chars("acab");
        let m = SequenceMatcher::new(None, &a, &b, true);
        assert_eq!(m.find_longest_match(0, 2, 0, 4), (0, 2, 2));
    }

    #[test]
    fn ratio_self_and_empty_edge_cases() {
        let a = chars("abc");
        let empty: Vec<char> = Vec::new();
        let mut self_match = SequenceMatcher::new(None, &a, &a, true);
        assert_eq!(self_match.ratio(), 1.0);

        let mut against_empty = SequenceMatcher::new(None, &a, &empty, true);
        assert_eq!(against_empty.ratio(), 0.0);

        let mut both_empty: SequenceMatcher<char> = SequenceMatcher::new(None, &empty, &empty, true);
        assert_eq!(both_empty.ratio(), 1.0);
    }

    #[test]
    fn ratio_ordering_holds_for_a_representative_pair() {
        let a = chars("this is a test");
        let b = chars("this is a test!");
        let mut m = SequenceMatcher::new(None, &a, &b, true);
        let r = m.ratio();
        let qr = m.quick_ratio();
        let rqr = m.real_quick_ratio();
        assert!(rqr >= qr);
        assert!(qr >= r);
    }

    #[test]
    fn matching_blocks_end_with_sentinel_and_are_non_touching() {
        let a = chars("abxcd");
        let b = chars("abycd");
        let mut m = SequenceMatcher::new(None, &a, &b, true);
        let blocks = m.get_matching_blocks();
        let sentinel = *blocks.last().unwrap();
        assert_eq!(sentinel, (a.len(), b.len(), 0));
        for w in blocks.windows(2) {
            let (i, j, n) = w[0];
            let (ni, nj, _) = w[1];
            assert!(i + n < ni || j + n < nj || w[1].2 == 0 && ni == a.len());
        }
    }

    #[test]
    fn set_seq1_does_not_rebuild_b_derived_state() {
        let a1 = chars("abc");
        let a2 = chars("xyz");
        let b = chars("abc");
        let mut m = SequenceMatcher::new(None, &a1, &b, true);
        m.get_matching_blocks();
        let popular_before = m.popular.len();
        m.set_seq1(&a2);
        assert_eq!(m.popular.len(), popular_before);
        assert!(m.matching_blocks.is_none());
    }

    #[test]
    fn memoization_returns_cached_result() {
        let a = chars("abc");
        let b = chars("abd");
        let mut m = SequenceMatcher::new(None, &a, &b, true);
        let first = m.get_matching_blocks();
        let second = m.get_matching_blocks();
        assert_eq!(first, second);
    }
}
