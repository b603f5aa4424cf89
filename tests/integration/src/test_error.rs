//! Malformed input is reported, never sent half-translated.

#[cfg(test)]
mod tests {
    use dynsh_core::request::{
        GetArgs, PutArgs, QueryArgs, ScanArgs, UpdateArgs, build_get, build_put, build_query,
        build_scan, build_update,
    };
    use dynsh_core::{DynshError, Session};
    use dynsh_expr::{Construct, ExpressionError};

    use crate::TABLE;

    fn scan_filter(filter: &str) -> DynshError {
        let args = ScanArgs {
            filter: Some(filter.to_owned()),
            ..ScanArgs::default()
        };
        build_scan(TABLE, &args).unwrap_err()
    }

    #[test]
    fn test_should_report_unterminated_constructs() {
        for (filter, expected) in [
            ("a = 'open", Construct::String),
            ("a IN [1, 2", Construct::List),
            ("a = <<'x'", Construct::Set),
            ("a = {b: 1", Construct::Map),
            ("`a = 1", Construct::Backtick),
            ("a[0 = 1", Construct::Index),
        ] {
            let err = scan_filter(filter);
            assert!(
                matches!(
                    err,
                    DynshError::Expression(ExpressionError::Unterminated { construct, .. })
                        if construct == expected
                ),
                "{filter:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_should_report_bad_escape_with_position() {
        let err = scan_filter(r"name = 'a\tb'");
        assert_eq!(
            err.to_string(),
            r"Unexpected escape character '\t' in: 'a\tb'"
        );
    }

    #[test]
    fn test_should_reject_malformed_projection() {
        for projection in [",", "a,", "a,,b"] {
            let args = ScanArgs {
                projection: Some(projection.to_owned()),
                ..ScanArgs::default()
            };
            let err = build_scan(TABLE, &args).unwrap_err();
            assert!(
                matches!(
                    err,
                    DynshError::Expression(ExpressionError::MalformedPath { .. })
                ),
                "{projection:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_should_reject_bad_keys_and_items() {
        let err = build_get(
            TABLE,
            &GetArgs {
                key: "<<1, 2>>".to_owned(),
                ..GetArgs::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid key: expected a map literal, found NS");

        let err = build_put(
            TABLE,
            &PutArgs {
                item: "{}".to_owned(),
                ..PutArgs::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid item: map must not be empty");

        let err = build_update(
            TABLE,
            &UpdateArgs {
                key: "{pk: 'a'".to_owned(),
                update: "SET a = 1".to_owned(),
                ..UpdateArgs::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, DynshError::Expression(_)), "{err:?}");
    }

    #[test]
    fn test_should_require_key_condition() {
        let err = build_query(TABLE, &QueryArgs::default()).unwrap_err();
        assert_eq!(err.to_string(), "missing argument: key condition");
    }

    #[test]
    fn test_should_keep_session_usable_after_failure() {
        let mut session = Session::new("us-east-1");
        assert!(matches!(
            session.require_table(),
            Err(DynshError::NoTableSelected)
        ));
        session.use_table(TABLE).unwrap();

        assert!(matches!(scan_filter("a = 'open"), DynshError::Expression(_)));
        let table = session.require_table().unwrap();
        let ok = build_scan(
            table,
            &ScanArgs {
                filter: Some("a = 'closed'".to_owned()),
                ..ScanArgs::default()
            },
        )
        .unwrap();
        assert_eq!(ok.to_value().unwrap()["FilterExpression"], "#0 = :0");
    }
}
