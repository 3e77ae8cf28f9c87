use difflib_rs::matcher::SequenceMatcher;
use difflib_rs::ndiff::{ndiff, restore};
use proptest::prelude::*;

fn small_alphabet_strategy() -> impl Strategy<Value = Vec<char>> {
    proptest::collection::vec(prop_oneof![Just('a'), Just('b'), Just('c'), Just('d')], 0..20)
}

proptest! {
    #[test]
    fn ratio_bounds_hold_for_arbitrary_pairs(a in small_alphabet_strategy(), b in small_alphabet_strategy()) {
        let mut m = SequenceMatcher::new(None, &a, &b, true);
        let r = m.ratio();
        let qr = m.quick_ratio();
        let rqr = m.real_quick_ratio();
        prop_assert!(rqr + 1e-9 >= qr);
        prop_assert!(qr + 1e-9 >= r);
        prop_assert!((0.0..=1.0).contains(&r));
    }

    #[test]
    fn matching_blocks_are_ascending_non_touching_and_sentinel_terminated(
        a in small_alphabet_strategy(), b in small_alphabet_strategy()
    ) {
        let mut m = SequenceMatcher::new(None, &a, &b, true);
        let blocks = m.get_matching_blocks();

        let sentinel = *blocks.last().unwrap();
        prop_assert_eq!(sentinel, (a.len(), b.len(), 0));
        for block in &blocks[..blocks.len() - 1] {
            prop_assert!(block.2 > 0);
        }

        for w in blocks.windows(2) {
            let (i0, j0, n0) = w[0];
            let (i1, j1, _) = w[1];
            prop_assert!(i0 < i1 && j0 < j1);
            prop_assert!(!(i0 + n0 == i1 && j0 + n0 == j1));
        }

        for &(i, j, n) in &blocks {
            prop_assert_eq!(&a[i..i + n], &b[j..j + n]);
        }
    }

    #[test]
    fn opcodes_tile_from_origin_to_full_extent(a in small_alphabet_strategy(), b in small_alphabet_strategy()) {
        let mut m = SequenceMatcher::new(None, &a, &b, true);
        let opcodes = m.get_opcodes();
        if let Some(first) = opcodes.first() {
            prop_assert_eq!((first.i1, first.j1), (0, 0));
            let last = opcodes.last().unwrap();
            prop_assert_eq!((last.i2, last.j2), (a.len(), b.len()));
            for w in opcodes.windows(2) {
                prop_assert_eq!((w[0].i2, w[0].j2), (w[1].i1, w[1].j1));
            }
        } else {
            prop_assert!(a.is_empty() && b.is_empty());
        }
    }

    #[test]
    fn ndiff_restore_recovers_both_sequences(a in small_alphabet_strategy(), b in small_alphabet_strategy()) {
        let a_lines: Vec<String> = a.iter().map(|c| format!("{c}\n")).collect();
        let b_lines: Vec<String> = b.iter().map(|c| format!("{c}\n")).collect();
        let delta = ndiff(&a_lines, &b_lines, None, None);
        prop_assert_eq!(restore(&delta, 1).unwrap(), a_lines);
        prop_assert_eq!(restore(&delta, 2).unwrap(), b_lines);
    }
}
