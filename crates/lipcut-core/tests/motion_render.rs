use lipcut_core::{LineEnding, LinearMove};
use proptest::prelude::*;

fn words(line: &str) -> Vec<(char, f64)> {
    line.split_whitespace()
        .skip(1)
        .map(|w| {
            let mut chars = w.chars();
            let letter = chars.next().unwrap();
            (letter, chars.as_str().parse::<f64>().unwrap())
        })
        .collect()
}

#[test]
fn test_line_starts_with_g1() {
    let line = LinearMove::new(1.0, 2.0, 3.0, 4.0).render(LineEnding::Bare);
    assert!(line.starts_with("G1 "));
    assert_eq!(line.split_whitespace().count(), 5);
}

proptest! {
    #[test]
    fn rendered_values_parse_back_exactly(
        x in -1.0e4f64..1.0e4,
        y in -1.0e4f64..1.0e4,
        z in -1.0e4f64..1.0e4,
        feed in 1.0f64..1.0e5,
    ) {
        let mv = LinearMove::new(x, y, z, feed);
        let parsed = words(&mv.render(LineEnding::Bare));
        prop_assert_eq!(parsed, vec![('X', x), ('Y', y), ('Z', z), ('F', feed)]);
    }

    #[test]
    fn newline_ending_only_adds_terminator(
        x in -1.0e4f64..1.0e4,
        z in -1.0e4f64..1.0e4,
    ) {
        let mv = LinearMove::new(x, 0.0, z, 3000.0);
        let bare = mv.render(LineEnding::Bare);
        let terminated = mv.render(LineEnding::Newline);
        prop_assert_eq!(terminated, format!("{}\n", bare));
    }
}
