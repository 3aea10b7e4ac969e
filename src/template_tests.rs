#[cfg(test)]
mod tests {
    use crate::arg::{Arg, list, map, skip};
    use crate::error::TemplateError;
    use crate::escape::unescape_mysql;
    use crate::flavor::{Flavor, set_default_flavor_scoped};
    use crate::template::{QueryEngine, build_query};
    use crate::valuer::{SqlValuer, ValuerError};
    use crate::value::SqlValue;
    use crate::args;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn mysql() -> QueryEngine {
        QueryEngine::with_flavor(Flavor::MySQL)
    }

    #[test]
    fn text_without_markers_is_unchanged() {
        let e = mysql();
        for t in [
            "",
            "SELECT 1",
            "SELECT * FROM t WHERE a = 'x?' AND b LIKE '%?%'",
            "SELECT '{not closed' FROM t",
        ] {
            assert_eq!(e.build_query(t, args![1, "unused"]).unwrap(), t);
            assert_eq!(e.build_query(t, args![]).unwrap(), t);
        }
    }

    #[test]
    fn scalar_markers() {
        let e = mysql();
        assert_eq!(e.build_query("?d", args![42]).unwrap(), "42");
        assert_eq!(e.build_query("?d", args![-3_i64]).unwrap(), "-3");
        assert_eq!(e.build_query("?", args![()]).unwrap(), "NULL");
        assert_eq!(e.build_query("?d", args![()]).unwrap(), "NULL");
        assert_eq!(e.build_query("?f", args![()]).unwrap(), "NULL");
        assert_eq!(e.build_query("?f", args![2.75]).unwrap(), "2.75");
        assert_eq!(e.build_query("?D", args!["7"]).unwrap(), "7");
    }

    #[test]
    fn fractional_int_fails() {
        assert!(matches!(
            mysql().build_query("?d", args![1.25]),
            Err(TemplateError::InvalidArgumentType { marker: "?d", .. })
        ));
    }

    #[test]
    fn string_quote_round_trips_through_escaper() {
        let s = "it's a \"test\"\\";
        let q = mysql().build_query("?", args![s]).unwrap();
        assert!(q.starts_with('\'') && q.ends_with('\''));
        assert_eq!(unescape_mysql(&q[1..q.len() - 1]), s);
    }

    #[test]
    fn array_and_identifier_markers() {
        let e = mysql();
        assert_eq!(e.build_query("?a", args![list([1, 2, 3])]).unwrap(), "1, 2, 3");
        assert_eq!(
            e.build_query("?a", args![map([("a", Arg::from(1)), ("b", Arg::from("x"))])])
                .unwrap(),
            "`a` = 1, `b` = 'x'"
        );
        assert_eq!(e.build_query("?#", args!["name"]).unwrap(), "`name`");
        assert_eq!(e.build_query("?#", args![list(["a", "b"])]).unwrap(), "`a`, `b`");
    }

    #[test]
    fn full_query() {
        let sql = mysql()
            .build_query(
                "SELECT ?# FROM users WHERE name = ? AND age > ?d AND id IN (?a)",
                args![list(["id", "name"]), "I'm fine", 18, list([1, 2, 3])],
            )
            .unwrap();
        assert_eq!(
            sql,
            "SELECT `id`, `name` FROM users WHERE name = 'I\\'m fine' AND age > 18 AND id IN (1, 2, 3)"
        );
    }

    #[test]
    fn update_with_map() {
        let sql = mysql()
            .build_query(
                "UPDATE users SET ?a WHERE user_id = -1",
                args![map([
                    ("name", Arg::from("Jack")),
                    ("email", Arg::from(())),
                ])],
            )
            .unwrap();
        assert_eq!(
            sql,
            "UPDATE users SET `name` = 'Jack', `email` = NULL WHERE user_id = -1"
        );
    }

    #[test]
    fn block_with_value_is_substituted() {
        let sql = mysql()
            .build_query("SELECT * FROM t WHERE {id = ?d}", args![5])
            .unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE id = 5");
    }

    #[test]
    fn block_with_skip_collapses() {
        let sql = mysql()
            .build_query("SELECT * FROM t WHERE {id = ?d}", args![skip()])
            .unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE ");
    }

    #[test]
    fn args_consumed_in_discovery_order_across_blocks() {
        let t = "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}";
        let e = mysql();
        assert_eq!(
            e.build_query(t, args!["user_id", list([1, 2, 3]), skip()]).unwrap(),
            "SELECT name FROM users WHERE `user_id` IN (1, 2, 3)"
        );
        assert_eq!(
            e.build_query(t, args!["user_id", list([1, 2, 3]), true]).unwrap(),
            "SELECT name FROM users WHERE `user_id` IN (1, 2, 3) AND block = 1"
        );
    }

    #[test]
    fn skip_in_first_block_does_not_shift_later_args() {
        let t = "SELECT * FROM t WHERE 1 {AND a = ?d} {AND b = ?d} AND c = ?";
        let sql = mysql().build_query(t, args![skip(), 2, "z"]).unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE 1  AND b = 2 AND c = 'z'");
    }

    #[test]
    fn skip_mid_block_keeps_earlier_args_consumed() {
        // 片段内第一个参数已被消费，第二个是跳过标记：片段为空，第三个参数给后面的标记
        let t = "SELECT * FROM t WHERE {a = ?d AND b = ?d} c = ?d";
        let sql = mysql().build_query(t, args![1, skip(), 3]).unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE  c = 3");
    }

    #[test]
    fn block_without_markers_is_kept() {
        let sql = mysql().build_query("SELECT {1}", args![]).unwrap();
        assert_eq!(sql, "SELECT 1");
    }

    #[test]
    fn nested_braces_use_nearest_close() {
        let sql = mysql().build_query("x {a {b = ?d} c}", args![4]).unwrap();
        assert_eq!(sql, "x a {b = 4 c}");
    }

    #[test]
    fn top_level_skip_is_an_error() {
        assert_eq!(
            mysql().build_query("SELECT ?d", args![skip()]),
            Err(TemplateError::UnexpectedSkip("?d".into()))
        );
    }

    #[test]
    fn missing_args_and_unknown_markers() {
        let e = mysql();
        assert_eq!(
            e.build_query("?d", args![]),
            Err(TemplateError::ArgumentsExhausted("?d".into()))
        );
        assert_eq!(
            e.build_query("?z", args![1]),
            Err(TemplateError::UnknownMarker("z".into()))
        );
        assert_eq!(
            e.build_query("a = ?d {AND b = ?d}", args![1]),
            Err(TemplateError::ArgumentsExhausted("?d".into()))
        );
        assert_eq!(
            e.build_query("{a = ?q}", args![skip()]),
            Err(TemplateError::UnknownMarker("q".into()))
        );
    }

    #[test]
    fn errors_inside_blocks_are_not_swallowed() {
        assert!(matches!(
            mysql().build_query("{a = ?a}", args![1]),
            Err(TemplateError::InvalidArgumentType { marker: "?a", .. })
        ));
    }

    #[test]
    fn generated_text_is_not_rescanned() {
        let sql = mysql().build_query("a = ? AND b = ?d", args!["= ?d", 2]).unwrap();
        assert_eq!(sql, "a = '= ?d' AND b = 2");

        let sql = mysql().build_query("?#", args!["{x}"]).unwrap();
        assert_eq!(sql, "`{x}`");
    }

    #[derive(Debug, Clone)]
    struct Counting(Rc<Cell<u32>>);

    impl SqlValuer for Counting {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            self.0.set(self.0.get() + 1);
            Ok(SqlValue::I64(self.0.get() as i64))
        }
    }

    #[test]
    fn valuer_evaluated_once_when_consumed() {
        let calls = Rc::new(Cell::new(0));
        let v: Box<dyn SqlValuer> = Box::new(Counting(calls.clone()));
        let sql = mysql()
            .build_query("{a = ?d} {b = ?d}", args![v, skip()])
            .unwrap();
        assert_eq!(sql, "a = 1 ");
        assert_eq!(calls.get(), 1);
    }

    #[derive(Debug, Clone)]
    struct Failing;

    impl SqlValuer for Failing {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            Err(ValuerError::new("connection closed"))
        }
    }

    #[test]
    fn valuer_error_inside_block_aborts_the_call() {
        let v: Box<dyn SqlValuer> = Box::new(Failing);
        assert_eq!(
            mysql().build_query("SELECT 1 {AND a = ?}", args![v]),
            Err(TemplateError::Valuer(ValuerError::new("connection closed")))
        );
    }

    #[test]
    fn valuer_after_skip_in_block_is_not_evaluated() {
        let calls = Rc::new(Cell::new(0));
        let v: Box<dyn SqlValuer> = Box::new(Counting(calls.clone()));
        let failing: Box<dyn SqlValuer> = Box::new(Failing);
        let sql = mysql()
            .build_query("x{ ?d ? ?d}y", args![v, skip(), failing])
            .unwrap();
        assert_eq!(sql, "xy");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn sqlite_flavor_and_custom_escaper() {
        let sqlite = QueryEngine::with_flavor(Flavor::SQLite);
        assert_eq!(sqlite.build_query("?", args!["it's"]).unwrap(), "'it''s'");

        let upper = QueryEngine::with_escaper(Flavor::MySQL, |s: &str| s.to_uppercase());
        assert_eq!(
            upper.build_query("name = ?", args!["jack"]).unwrap(),
            "name = 'JACK'"
        );
    }

    #[test]
    fn free_function_uses_default_flavor() {
        let _g = set_default_flavor_scoped(Flavor::SQLite);
        assert_eq!(build_query("? ?d", args!["a'b", 1]).unwrap(), "'a''b' 1");
        assert_eq!(build_query("?d", vec![7_i64]).unwrap(), "7");
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let e = mysql();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4_i64)
                .map(|i| {
                    let e = &e;
                    s.spawn(move || e.build_query("SELECT ?d {, ?}", args![i, skip()]))
                })
                .collect();
            for (i, h) in handles.into_iter().enumerate() {
                assert_eq!(h.join().unwrap().unwrap(), format!("SELECT {i} "));
            }
        });
    }
}
