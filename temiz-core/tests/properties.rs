use proptest::prelude::*;
use temiz_core::analyzer::{NoiseStripper, NumeralConverter, TurkishFolder};
use temiz_core::dataset::{drop_duplicate_text, reconcile_labels, remove_short_records};
use temiz_core::{Pipeline, TurkishNormalizer};
use temiz_types::{Cell, Table, IS_OFFENSIVE_COLUMN, OTHER_LABEL, TARGET_COLUMN, TEXT_COLUMN};

const TARGETS: [&str; 4] = ["OTHER", "INSULT", "PROFANITY", "RACIST"];

fn texts_table(texts: &[String]) -> Table {
    Table::from_rows(
        [TEXT_COLUMN],
        texts.iter().map(|t| vec![Cell::from(t.as_str())]),
    )
    .unwrap()
}

fn labelled_table(rows: &[(String, usize, i64)]) -> Table {
    Table::from_rows(
        [TEXT_COLUMN, TARGET_COLUMN, IS_OFFENSIVE_COLUMN],
        rows.iter().map(|(text, target, flag)| {
            vec![
                Cell::from(text.as_str()),
                Cell::from(TARGETS[*target]),
                Cell::Int(*flag),
            ]
        }),
    )
    .unwrap()
}

fn text_of(table: &Table, origin_pos: usize) -> String {
    table.rows()[origin_pos]
        .get(0)
        .map(|c| c.render().into_owned())
        .unwrap_or_default()
}

fn assert_labels_consistent(table: &Table) {
    for row in table.rows() {
        let other = row.get(1).and_then(|c| c.as_text()) == Some(OTHER_LABEL);
        let flag = row.get(2).and_then(|c| c.as_flag());
        assert!(!(other && flag == Some(1)), "row {} still offensive", row.origin());
    }
}

proptest! {
    #[test]
    fn prop_folding_idempotent(input in any::<String>()) {
        let folder = TurkishFolder::new();
        let once = folder.fold(&input);
        prop_assert_eq!(folder.fold(&once), once);
    }

    #[test]
    fn prop_folding_keeps_char_count(input in "[a-zA-ZçÇğĞıİöÖşŞüÜ .!0-9]{0,64}") {
        let folded = TurkishFolder::new().fold(&input);
        prop_assert_eq!(folded.chars().count(), input.chars().count());
    }

    #[test]
    fn prop_stripper_output_alphabet(input in any::<String>()) {
        let out = NoiseStripper::default().strip(&input);
        prop_assert!(
            out.chars().all(|c| c.is_ascii_alphabetic() || c == ' '),
            "unexpected char in {:?}", out
        );
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(!out.contains("  "));
    }

    #[test]
    fn prop_stripper_on_tweets(
        words in proptest::collection::vec("(#|@)?[a-zA-Z0-9çğıöşü]{1,8}[!?.,]?", 0..12)
    ) {
        let input = words.join(" ");
        let out = NoiseStripper::default().strip(&input);
        prop_assert!(!out.contains('#') && !out.contains('@'));
        prop_assert!(!out.bytes().any(|b| b.is_ascii_digit()));
    }

    #[test]
    fn prop_digit_token_converts_or_fails(token in "[0-9]{1,24}") {
        let service = TurkishNormalizer::new();
        let converted = NumeralConverter::new(&service).convert(&token);
        if converted.is_clean() {
            prop_assert!(!converted.text.is_empty());
            prop_assert!(!converted.text.bytes().any(|b| b.is_ascii_digit()));
        } else {
            prop_assert_eq!(converted.failures.len(), 1);
            prop_assert_eq!(converted.text, token);
        }
    }

    #[test]
    fn prop_mixed_tokens_untouched(token in "[a-z]{1,4}[0-9]{1,4}[a-z]{0,4}") {
        let service = TurkishNormalizer::new();
        let converted = NumeralConverter::new(&service).convert(&token);
        prop_assert!(converted.is_clean());
        prop_assert_eq!(converted.text, token);
    }

    #[test]
    fn prop_short_filter_subsequence(
        texts in proptest::collection::vec("[a-zçğış ]{0,12}", 0..32),
        min_len in 0usize..10,
    ) {
        let out = remove_short_records(texts_table(&texts), TEXT_COLUMN, min_len).unwrap();

        let mut last = None;
        for (i, row) in out.table.rows().iter().enumerate() {
            let origin = row.origin();
            prop_assert!(last.map_or(true, |prev| origin > prev));
            last = Some(origin);

            let text = text_of(&out.table, i);
            prop_assert!(text.chars().count() >= min_len);
            prop_assert_eq!(&text, &texts[origin]);
        }

        let expected = texts.iter().filter(|t| t.chars().count() >= min_len).count();
        prop_assert_eq!(out.table.len(), expected);
    }

    #[test]
    fn prop_reconciled_labels_consistent(
        rows in proptest::collection::vec(("[a-z]{0,6}", 0usize..4, 0i64..=1), 0..32)
    ) {
        let out = reconcile_labels(labelled_table(&rows)).unwrap();
        prop_assert_eq!(out.table.len(), rows.len());
        assert_labels_consistent(&out.table);
    }

    #[test]
    fn prop_dedup_idempotent_and_stable(
        texts in proptest::collection::vec("[ab]{0,3}", 0..32)
    ) {
        let once = drop_duplicate_text(texts_table(&texts), TEXT_COLUMN).unwrap();
        let twice = drop_duplicate_text(once.table.clone(), TEXT_COLUMN).unwrap();
        prop_assert_eq!(twice.affected, 0);
        prop_assert_eq!(&twice.table, &once.table);

        let mut first_seen: Vec<usize> = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            if !first_seen.iter().any(|&j| &texts[j] == text) {
                first_seen.push(i);
            }
        }
        let origins: Vec<usize> = once.table.rows().iter().map(|r| r.origin()).collect();
        prop_assert_eq!(origins, first_seen);
    }

    #[test]
    fn prop_pipeline_output_invariants(
        rows in proptest::collection::vec(
            ("[a-zA-ZçğıöşüİI0-9#@!. ]{0,24}", 0usize..4, 0i64..=1),
            0..24,
        )
    ) {
        let out = Pipeline::default().run(labelled_table(&rows), TEXT_COLUMN).unwrap();
        assert_labels_consistent(&out.table);

        for i in 0..out.table.len() {
            let text = text_of(&out.table, i);
            prop_assert!(text.chars().count() >= 5);
            prop_assert!(text.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        }
        prop_assert_eq!(
            out.report.rows_in,
            out.report.rows_out + out.report.rows_dropped()
        );
    }
}
