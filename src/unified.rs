//! Unified diff rendering.

use crate::matcher::SequenceMatcher;
use crate::opcode::Tag;
use crate::util::format_range_unified;

/// Options for [`unified_diff`]. All fields default to the empty string
/// except `n` (3) and `lineterm` (`"\n"`).
#[derive(Debug, Clone)]
pub struct UnifiedDiffOptions<'a> {
    pub fromfile: &'a str,
    pub tofile: &'a str,
    pub fromfiledate: &'a str,
    pub tofiledate: &'a str,
    pub n: usize,
    pub lineterm: &'a str,
}

impl Default for UnifiedDiffOptions<'_> {
    fn default() -> Self {
        Self { fromfile: "", tofile: "", fromfiledate: "", tofiledate: "", n: 3, lineterm: "\n" }
    }
}

/// Renders the unified diff format (POSIX `diff -u` conventions) between two
/// sequences of lines. Each line in `a`/`b` is expected to already carry its
/// own terminator; `opts.lineterm` is only appended to header and hunk lines.
pub fn unified_diff(a: &[String], b: &[String], opts: &UnifiedDiffOptions) -> Vec<String> {
    let mut matcher: SequenceMatcher<String> = SequenceMatcher::new(None, a, b, true);
    let groups = matcher.get_grouped_opcodes(opts.n);

    let mut result = Vec::new();
    let mut started = false;

    for group in groups {
        if !started {
            started = true;
            let fromdate = if opts.fromfiledate.is_empty() { String::new() } else { format!("\t{}", opts.fromfiledate) };
            let todate = if opts.tofiledate.is_empty() { String::new() } else { format!("\t{}", opts.tofiledate) };
            result.push(format!("--- {}{}{}", opts.fromfile, fromdate, opts.lineterm));
            result.push(format!("+++ {}{}{}", opts.tofile, todate, opts.lineterm));
        }

        let first = group.first().expect("groups are never empty");
        let last = group.last().expect("groups are never empty");
        let file1_range = format_range_unified(first.i1, last.i2);
        let file2_range = format_range_unified(first.j1, last.j2);
        result.push(format!("@@ -{} +{} @@{}", file1_range, file2_range, opts.lineterm));

        for op in group {
            match op.tag {
                Tag::Equal => {
                    for i in op.i1..op.i2 {
                        result.push(format!(" {}", a[i]));
                    }
                }
                Tag::Delete => {
                    for i in op.i1..op.i2 {
                        result.push(format!("-{}", a[i]));
                    }
                }
                Tag::Insert => {
                    for j in op.j1..op.j2 {
                        result.push(format!("+{}", b[j]));
                    }
                }
                Tag::Replace => {
                    for i in op.i1..op.i2 {
                        result.push(format!("-{}", a[i]));
                    }
                    for j in op.j1..op.j2 {
                        result.push(format!("+{}", b[j]));
                    }
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_words(s: &str) -> Vec<String> {
        s.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn matches_the_documented_unified_diff_fixture() {
        let a = split_words("one two three four");
        let b = split_words("zero one tree four");
        let opts = UnifiedDiffOptions {
            fromfile: "Original",
            tofile: "Current",
            fromfiledate: "2005-01-26 23:30:50",
            tofiledate: "2010-04-02 10:20:52",
            n: 3,
            lineterm: "",
        };
        let diff = unified_diff(&a, &b, &opts);
        assert_eq!(
            diff,
            vec![
                "--- Original\t2005-01-26 23:30:50",
                "+++ Current\t2010-04-02 10:20:52",
                "@@ -1,4 +1,4 @@",
                "+zero",
                " one",
                "-two",
                "-three",
                "+tree",
                " four",
            ]
        );
    }
}
