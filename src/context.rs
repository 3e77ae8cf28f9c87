//! Context diff rendering.

use crate::matcher::SequenceMatcher;
use crate::opcode::Tag;
use crate::util::format_range_context;

/// Options for [`context_diff`]. Same shape and defaults as
/// [`crate::unified::UnifiedDiffOptions`].
#[derive(Debug, Clone)]
pub struct ContextDiffOptions<'a> {
    pub fromfile: &'a str,
    pub tofile: &'a str,
    pub fromfiledate: &'a str,
    pub tofiledate: &'a str,
    pub n: usize,
    pub lineterm: &'a str,
}

impl Default for ContextDiffOptions<'_> {
    fn default() -> Self {
        Self { fromfile: "", tofile: "", fromfiledate: "", tofiledate: "", n: 3, lineterm: "\n" }
    }
}

fn prefix_for(tag: Tag) -> &'static str {
    match tag {
        Tag::Insert => "+ ",
        Tag::Delete => "- ",
        Tag::Replace => "! ",
        Tag::Equal => "  ",
    }
}

/// Renders the context diff format (POSIX `diff -c` conventions).
pub fn context_diff(a: &[String], b: &[String], opts: &ContextDiffOptions) -> Vec<String> {
    let mut matcher: SequenceMatcher<String> = SequenceMatcher::new(None, a, b, true);
    let groups = matcher.get_grouped_opcodes(opts.n);

    let mut result = Vec::new();
    let mut started = false;

    for group in groups {
        if !started {
            started = true;
            let fromdate = if opts.fromfiledate.is_empty() { String::new() } else { format!("\t{}", opts.fromfiledate) };
            let todate = if opts.tofiledate.is_empty() { String::new() } else { format!("\t{}", opts.tofiledate) };
            result.push(format!("*** {}{}{}", opts.fromfile, fromdate, opts.lineterm));
            result.push(format!("--- {}{}{}", opts.tofile, todate, opts.lineterm));
        }

        result.push(format!("***************{}", opts.lineterm));

        let first = group.first().expect("groups are never empty");
        let last = group.last().expect("groups are never empty");

        let range1 = format_range_context(first.i1, last.i2);
        result.push(format!("*** {range1} ****{}", opts.lineterm));
        if group.iter().any(|op| matches!(op.tag, Tag::Delete | Tag::Replace)) {
            for op in &group {
                if op.tag == Tag::Insert {
                    continue;
                }
                for i in op.i1..op.i2 {
                    result.push(format!("{}{}", prefix_for(op.tag), a[i]));
                }
            }
        }

        let range2 = format_range_context(first.j1, last.j2);
        result.push(format!("--- {range2} ----{}", opts.lineterm));
        if group.iter().any(|op| matches!(op.tag, Tag::Insert | Tag::Replace)) {
            for op in &group {
                if op.tag == Tag::Delete {
                    continue;
                }
                for j in op.j1..op.j2 {
                    result.push(format!("{}{}", prefix_for(op.tag), b[j]));
                }
            }
        }
    }

    result
}
