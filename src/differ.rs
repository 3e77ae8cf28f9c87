//! The fancy line differ: an opcode-driven line diff that recurses into
//! character-level matching for near-identical replacement pairs.

use crate::matcher::SequenceMatcher;
use crate::opcode::Tag;
use crate::util::count_leading;

/// Compares two sequences of text lines, producing a human-readable delta.
///
/// `linejunk`, when present, marks lines (usually blank lines or lines of
/// pure punctuation) that should never anchor a match. `charjunk` plays the
/// same role one level down, for the character-level sync search inside a
/// near-matching replace pair.
pub struct Differ<'a> {
    linejunk: Option<Box<dyn Fn(&str) -> bool + 'a>>,
    charjunk: Option<Box<dyn Fn(char) -> bool + 'a>>,
}

impl<'a> Differ<'a> {
    pub fn new(linejunk: Option<Box<dyn Fn(&str) -> bool + 'a>>, charjunk: Option<Box<dyn Fn(char) -> bool + 'a>>) -> Self {
        Self { linejunk, charjunk }
    }

    /// Compares `a` to `b`, returning delta lines each prefixed `"  "`
    /// (equal), `"- "` (only in `a`), `"+ "` (only in `b`), or the `"? "`
    /// intraline guide produced for a near-matching replace pair.
    pub fn compare(&self, a: &[String], b: &[String]) -> Vec<String> {
        let linejunk = self.linejunk.as_ref();
        let isjunk: Option<Box<dyn Fn(&String) -> bool>> =
            linejunk.map(|f| -> Box<dyn Fn(&String) -> bool> { Box::new(move |s: &String| f(s.as_str())) });

        let mut matcher = SequenceMatcher::new(isjunk, a, b, true);
        let mut out = Vec::new();
        for op in matcher.get_opcodes() {
            match op.tag {
                Tag::Equal => {
                    for i in op.i1..op.i2 {
                        out.push(format!("  {}", a[i]));
                    }
                }
                Tag::Delete => self.dump("-", a, op.i1, op.i2, &mut out),
                Tag::Insert => self.dump("+", b, op.j1, op.j2, &mut out),
                Tag::Replace => self.fancy_replace(a, op.i1, op.i2, b, op.j1, op.j2, &mut out),
            }
        }
        out
    }

    fn dump(&self, prefix: &str, seq: &[String], lo: usize, hi: usize, out: &mut Vec<String>) {
        for line in &seq[lo..hi] {
            out.push(format!("{prefix} {line}"));
        }
    }

    fn fancy_helper(&self, a: &[String], alo: usize, ahi: usize, b: &[String], blo: usize, bhi: usize, out: &mut Vec<String>) {
        if alo < ahi {
            if blo < bhi {
                self.fancy_replace(a, alo, ahi, b, blo, bhi, out);
            } else {
                self.dump("-", a, alo, ahi, out);
            }
        } else if blo < bhi {
            self.dump("+", b, blo, bhi, out);
        }
    }

    fn plain_replace(&self, a: &[String], alo: usize, ahi: usize, b: &[String], blo: usize, bhi: usize, out: &mut Vec<String>) {
        // Emit the shorter side first to keep the working set small.
        if (bhi - blo) < (ahi - alo) {
            self.dump("+", b, blo, bhi, out);
            self.dump("-", a, alo, ahi, out);
        } else {
            self.dump("-", a, alo, ahi, out);
            self.dump("+", b, blo, bhi, out);
        }
    }

    fn fancy_replace(&self, a: &[String], alo: usize, ahi: usize, b: &[String], blo: usize, bhi: usize, out: &mut Vec<String>) {
        let mut best_ratio = 0.74f64;
        const CUTOFF: f64 = 0.75;

        let mut besti = alo;
        let mut bestj = blo;
        let mut eq: Option<(usize, usize)> = None;

        let a_chars: Vec<Vec<char>> = a[alo..ahi].iter().map(|line| line.chars().collect()).collect();
        let b_chars: Vec<Vec<char>> = b[blo..bhi].iter().map(|line| line.chars().collect()).collect();

        let charjunk: Option<Box<dyn Fn(&char) -> bool>> = self
            .charjunk
            .as_ref()
            .map(|f| -> Box<dyn Fn(&char) -> bool> { Box::new(move |c: &char| f(*c)) });
        let mut cmatcher: SequenceMatcher<char> = SequenceMatcher::new(charjunk, &[], &[], true);

        for (jidx, j) in (blo..bhi).enumerate() {
            for (iidx, i) in (alo..ahi).enumerate() {
                if a[i] == b[j] {
                    if eq.is_none() {
                        eq = Some((i, j));
                    }
                    continue;
                }
                cmatcher.set_seqs(&a_chars[iidx], &b_chars[jidx]);
                if cmatcher.real_quick_ratio() > best_ratio && cmatcher.quick_ratio() > best_ratio {
                    let r = cmatcher.ratio();
                    if r > best_ratio {
                        best_ratio = r;
                        besti = i;
                        bestj = j;
                    }
                }
            }
        }

        let (sync_i, sync_j, identical) = if best_ratio < CUTOFF {
            match eq {
                Some((i, j)) => (i, j, true),
                None => {
                    self.plain_replace(a, alo, ahi, b, blo, bhi, out);
                    return;
                }
            }
        } else {
            (besti, bestj, false)
        };

        self.fancy_helper(a, alo, sync_i, b, blo, sync_j, out);

        if identical {
            out.push(format!("  {}", a[sync_i]));
        } else {
            cmatcher.set_seqs(&a_chars[sync_i - alo], &b_chars[sync_j - blo]);

            let mut atags = String::new();
            let mut btags = String::new();
            for op in cmatcher.get_opcodes() {
                let la = op.i2 - op.i1;
                let lb = op.j2 - op.j1;
                match op.tag {
                    Tag::Replace => {
                        atags.extend(std::iter::repeat('^').take(la));
                        btags.extend(std::iter::repeat('^').take(lb));
                    }
                    Tag::Delete => atags.extend(std::iter::repeat('-').take(la)),
                    Tag::Insert => btags.extend(std::iter::repeat('+').take(lb)),
                    Tag::Equal => {
                        atags.extend(std::iter::repeat(' ').take(la));
                        btags.extend(std::iter::repeat(' ').take(lb));
                    }
                }
            }
            qformat(&a[sync_i], &b[sync_j], &atags, &btags, out);
        }

        self.fancy_helper(a, sync_i + 1, ahi, b, sync_j + 1, bhi, out);
    }
}

/// Formats a synced near-matching line pair with its `"? "` intraline guide.
fn qformat(aline: &str, bline: &str, atags: &str, btags: &str, out: &mut Vec<String>) {
    let mut common = count_leading(aline, '\t').min(count_leading(bline, '\t'));
    common = common.min(count_leading(atags, ' '));
    common = common.min(count_leading(btags, ' '));

    let atags = atags[common..].trim_end();
    let btags = btags[common..].trim_end();

    out.push(format!("- {aline}"));
    if !atags.is_empty() {
        out.push(format!("? {}{}\n", "\t".repeat(common), atags));
    }
    out.push(format!("+ {bline}"));
    if !btags.is_empty() {
        out.push(format!("? {}{}\n", "\t".repeat(common), btags));
    }
}
