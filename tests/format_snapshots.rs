//! Snapshot tests for the processing formats

use exparse::expr::config::{ExparseConfig, Loader};
use exparse::expr::processor::{process_source, ProcessingSpec};

fn process_with(source: &str, format: &str, config: &ExparseConfig) -> String {
    let spec = ProcessingSpec::from_string(format).unwrap();
    process_source(source, &spec, config).unwrap()
}

fn process(source: &str, format: &str) -> String {
    process_with(source, format, &ExparseConfig::default())
}

#[test]
fn test_report_simple() {
    insta::assert_snapshot!(process("2*(3+4)", "report-simple").trim_end(), @r"
Tokens:
  (NUMBER, 2)
  (MULTIPLY, *)
  (LPAREN, ()
  (NUMBER, 3)
  (PLUS, +)
  (NUMBER, 4)
  (RPAREN, ))
  (EOF, EOF)

Derivation steps:
  1. E -> T E'
  2. T -> F T'
  3. F -> NUMBER
  4. T' -> * F T'
  5. F -> ( E )
  6. E -> T E'
  7. T -> F T'
  8. F -> NUMBER
  9. T' -> ε
  10. E' -> + T E'
  11. T -> F T'
  12. F -> NUMBER
  13. T' -> ε
  14. E' -> ε
  15. T' -> ε
  16. E' -> ε

AST:
└─ Binary: *
  ├─ Number: 2
  └─ Binary: +
    ├─ Number: 3
    └─ Number: 4
");
}

#[test]
fn test_ast_tag() {
    insta::assert_snapshot!(process("sin2^3", "ast-tag").trim_end(), @r"
<expression>
  <unary>sin<children>
    <binary>^<children>
      <number>2</number>
      <number>3</number>
    </children></binary>
  </children></unary>
</expression>
");
}

#[test]
fn test_steps_in_decision_order() {
    let config = Loader::new()
        .set_override("parser.derivation_order", "decision")
        .unwrap()
        .build()
        .unwrap();
    insta::assert_snapshot!(process_with("2!^3", "steps-simple", &config).trim_end(), @r"
E -> T E'
T -> F T'
F -> NUMBER
F -> F !
F -> F ^ F
F -> NUMBER
T' -> ε
E' -> ε
");
}

#[test]
fn test_steps_in_leftmost_order() {
    insta::assert_snapshot!(process("2!^3", "steps-simple").trim_end(), @r"
E -> T E'
T -> F T'
F -> F ^ F
F -> F !
F -> NUMBER
F -> NUMBER
T' -> ε
E' -> ε
");
}

#[test]
fn test_token_json() {
    insta::assert_snapshot!(process("5!", "token-json"), @r#"
[
  {
    "kind": "NUMBER",
    "lexeme": "5",
    "span": {
      "start": 0,
      "end": 1
    }
  },
  {
    "kind": "FACTORIAL",
    "lexeme": "!",
    "span": {
      "start": 1,
      "end": 2
    }
  },
  {
    "kind": "EOF",
    "lexeme": "EOF",
    "span": {
      "start": 2,
      "end": 2
    }
  }
]
"#);
}

#[test]
fn test_ast_json_has_no_rust_enum_shape() {
    let json: serde_json::Value =
        serde_json::from_str(&process("2+2", "ast-json")).unwrap();
    assert_eq!(json["value"], "+");
    assert_eq!(json["children"][0]["value"], "2");
    assert_eq!(json["children"][1]["value"], "2");
    assert_ne!(json["children"][0]["id"], json["children"][1]["id"]);
}

#[test]
fn test_report_json_sections() {
    let json: serde_json::Value =
        serde_json::from_str(&process("cos0", "report-json")).unwrap();
    assert_eq!(json["source"], "cos0");
    assert_eq!(json["tokens"].as_array().unwrap().len(), 3);
    assert_eq!(json["steps"][2], "F -> cos F");
    assert_eq!(json["tree"]["value"], "cos");
}
