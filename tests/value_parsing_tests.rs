use yconf::{
    ConfigParser, ErrorCategory, IntegerGating, LineError, LineParser, ParserConfig, ValueType,
    parse_lines, parse_str,
};

fn relaxed() -> ConfigParser {
    ConfigParser::with_config(
        ParserConfig::new().with_integer_gating(IntegerGating::AllowBareIntegers),
    )
}

#[cfg(test)]
mod value_parsing_tests {
    use super::*;

    #[test]
    fn test_rendered_values_parse_back_to_the_same_value() {
        let lines = [
            "title: \"example glossary\"",
            "quote: \"say \"hi\" twice\"",
            "flag: TRUE",
            "off: FALSE",
            "ratio: 0.125",
            "whole: 5.0",
            "negative: -12.75",
            "names: [\"GML\", \"XML\", \"S G M L\"]",
            "ratings: [4.5, 5.0, 4.8]",
            "checks: [TRUE, FALSE]",
            "counts: [1, -2, 3]",
            "year: 1986",
        ];
        let parser = relaxed();
        let original = parser.parse_lines(lines);
        assert!(original.diagnostics.is_empty());

        let rendered: Vec<String> = original
            .config
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        let reparsed = parser.parse_lines(&rendered);

        assert!(reparsed.diagnostics.is_empty());
        assert_eq!(reparsed.config.len(), original.config.len());
        for (name, value) in &original.config {
            let again = &reparsed.config[name.as_str()];
            assert_eq!(again.value(), value.value(), "value of {} changed", name);
        }
    }

    #[test]
    fn test_single_integer_does_not_survive_rendering_under_default_gating() {
        let parser = ConfigParser::new();
        let original = parser.parse_str("port: [8080]\nports: [80, 443]");
        assert_eq!(original.config.get_integer("port"), Some(8080));

        let rendered: Vec<String> = original
            .config
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        assert_eq!(rendered, vec!["port: 8080", "ports: [80, 443]"]);

        // The bracket-less single integer is gated out on the way back in.
        let reparsed = parser.parse_lines(&rendered);
        assert!(!reparsed.config.contains_key("port"));
        assert_eq!(reparsed.config["ports"].as_integers(), Some(&[80, 443][..]));
        assert_eq!(reparsed.diagnostics.len(), 1);
        assert_eq!(
            reparsed.diagnostics[0].error,
            LineError::UnrecognizedValue {
                raw: "8080".to_string()
            }
        );
    }

    #[test]
    fn test_overflowing_floats_never_reach_the_dictionary() {
        let output = parse_str("big: 1.0e400\nsmall: [1.5, 9.9e999]");
        assert!(!output.config.contains_key("big"));
        assert_eq!(output.config.get_float("small"), Some(1.5));
        assert_eq!(output.diagnostics.len(), 2);
        assert_eq!(
            serde_json::to_string(&output.config).unwrap(),
            "{\"small\":1.5}"
        );
    }

    #[test]
    fn test_canonical_rendering() {
        let output = parse_str("a: TRUEISH\nb: [ 1 ,2,   3 ]\nc:   \"x\"  ");
        assert_eq!(output.config["a"].to_string(), "TRUE");
        assert_eq!(output.config["a"].raw(), "TRUEISH");
        assert_eq!(output.config["b"].to_string(), "[1, 2, 3]");
        assert_eq!(output.config["b"].raw(), "[ 1 ,2,   3 ]");
        assert_eq!(output.config["c"].to_string(), "\"x\"");
    }

    #[test]
    fn test_array_type_homogeneity_keeps_leading_prefix() {
        let cases: [(&str, ValueType, usize, ValueType); 4] = [
            ("a: [1, 2, \"three\", 4]", ValueType::Integer, 2, ValueType::String),
            ("a: [\"x\", TRUE]", ValueType::String, 1, ValueType::Boolean),
            ("a: [1.5, 2.5, 3]", ValueType::Float, 2, ValueType::Integer),
            ("a: [FALSE, 0.5]", ValueType::Boolean, 1, ValueType::Float),
        ];

        for (line, expected_type, kept, found) in cases {
            let output = parse_str(line);
            let value = &output.config["a"];
            assert_eq!(value.value_type(), expected_type, "{}", line);
            assert_eq!(value.len(), kept, "{}", line);
            assert_eq!(
                output.diagnostics[0].error,
                LineError::InconsistentArrayTypes {
                    expected: expected_type,
                    found,
                },
                "{}",
                line
            );
            assert_eq!(
                output.diagnostics[0].category(),
                ErrorCategory::TypeHomogeneity
            );
        }
    }

    #[test]
    fn test_integer_gating_asymmetry() {
        // The scalar path requires a decimal point for integers...
        let output = parse_str("key: 123");
        assert!(output.config.is_empty());
        assert_eq!(
            output.diagnostics[0].error,
            LineError::UnrecognizedValue {
                raw: "123".to_string()
            }
        );

        // ...while array elements accept bare integers.
        let output = parse_str("key: [1, 2, 3]");
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.config["key"].value_type(), ValueType::Integer);
        assert_eq!(output.config["key"].as_integers(), Some(&[1, 2, 3][..]));

        // A one-element array is the way to write a lone integer.
        let output = parse_str("key: [7]");
        assert_eq!(output.config.get_integer("key"), Some(7));
    }

    #[test]
    fn test_relaxed_gating_accepts_top_level_integers() {
        let output = relaxed().parse_str("year: 1986\nnegative: -4\nfloat: 4.0");
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.config.get_integer("year"), Some(1986));
        assert_eq!(output.config.get_integer("negative"), Some(-4));
        assert_eq!(output.config.get_float("float"), Some(4.0));
    }

    #[test]
    fn test_string_priority_over_other_forms() {
        let output = parse_str("a: \"TRUE\"\nb: \"1.5\"\nc: \"[1, 2]\"");
        assert_eq!(output.config.get_str("a"), Some("TRUE"));
        assert_eq!(output.config.get_str("b"), Some("1.5"));
        assert_eq!(output.config.get_str("c"), Some("[1, 2]"));
    }

    #[test]
    fn test_boolean_priority_over_float() {
        let output = parse_str("a: 1.5TRUE");
        assert_eq!(output.config.get_bool("a"), Some(true));
    }

    #[test]
    fn test_unbalanced_brackets_are_not_arrays() {
        let output = parse_str("a: [1, 2\nb: 1, 2]");
        assert!(output.config.is_empty());
        assert_eq!(output.diagnostics.len(), 2);
        assert!(
            output
                .diagnostics
                .iter()
                .all(|d| d.category() == ErrorCategory::ValueSyntax)
        );
    }

    #[test]
    fn test_nested_arrays_are_unsupported() {
        let output = parse_str("a: [[1, 2], [3]]");
        assert!(output.config.is_empty());
        assert_eq!(
            output.diagnostics[0].error,
            LineError::UnrecognizedElement {
                element: "[1".to_string()
            }
        );
    }

    #[test]
    fn test_strings_with_commas_split_inside_arrays() {
        let output = parse_str("a: [\"x, y\", \"z\"]");
        assert!(output.config.is_empty());
        assert_eq!(output.diagnostics.len(), 1);
    }

    #[test]
    fn test_trailing_comment_is_part_of_the_value() {
        let output = parse_str("a: TRUE # enabled\nb: 1.5 # ratio");
        assert_eq!(output.config.get_bool("a"), Some(true));
        assert!(!output.config.contains_key("b"));
    }

    #[test]
    fn test_line_parser_reports_indentation_width() {
        let parser = LineParser::default();
        let mut issues = Vec::new();
        for (line, width) in [("a: TRUE", 0), ("   a: TRUE", 3), ("\t\t\ta: TRUE", 3)] {
            let record = parser.parse_line(line, &mut issues).unwrap();
            assert_eq!(record.indent, width, "{:?}", line);
        }
        assert!(issues.is_empty());
    }

    #[test]
    fn test_parse_lines_accepts_owned_lines() {
        let lines: Vec<String> = vec!["a:".to_string(), "  b: [0.5]".to_string()];
        let output = parse_lines(lines);
        assert_eq!(output.config.get_float("a.b"), Some(0.5));
    }
}
