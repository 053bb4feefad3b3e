use std::fs;

use bigcalc::{
    bigmath::{MathContext, Notation, RoundingMode},
    get_result,
    interpreter::session::{Session, SessionConfig},
};
use walkdir::WalkDir;

#[test]
fn demo_scripts_work() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let mut session = Session::new(SessionConfig::default());

        for (i, line) in content.lines().enumerate() {
            let (expr, expected) = split_expectation(line);
            let values = session.evaluate_line(expr)
                                .unwrap_or_else(|e| panic!("{path:?} line {}: {expr}\nError: {e}", i + 1));
            if let Some(expected) = expected {
                count += 1;
                assert_eq!(session.format_line(&values), expected, "{path:?} line {}: {expr}", i + 1);
            }
        }
    }

    assert!(count > 0, "No checked lines found in demos");
}

/// Splits `expr = expected`, ignoring `#` comment lines.
fn split_expectation(line: &str) -> (&str, Option<&str>) {
    if line.trim_start().starts_with('#') {
        return ("", None);
    }
    match line.rsplit_once(" = ") {
        Some((expr, expected)) => (expr, Some(expected.trim())),
        None => (line, None),
    }
}

fn assert_results(src: &str, expected: &[&str]) {
    match get_result(src, &SessionConfig::default()) {
        Ok(results) => assert_eq!(results, expected, "Script: {src}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src, &SessionConfig::default()) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str, message: &str) {
    match get_result(src, &SessionConfig::default()) {
        Ok(results) => panic!("Script succeeded with {results:?} but was expected to fail"),
        Err(e) => assert_eq!(e.to_string(), message),
    }
}

#[test]
fn basic_arithmetic() {
    assert_results("1+1", &["2"]);
    assert_results("2+3*4", &["14"]);
    assert_results("(2+3)*4", &["20"]);
    assert_results("-2^2", &["-4"]);
    assert_results("7%3\n-7%3", &["1", "2"]);
}

#[test]
fn special_values_of_operators() {
    assert_results("1/0\n-1/0\n0/0", &["∞", "-∞", "(NaN)"]);
    assert_results("0^0", &["1"]);
    assert_failure("frac(0,0)", "Math Error (in line 1)");
}

#[test]
fn user_friendly_notation() {
    assert_results("0.000123\n0.00123", &["1.23e-4", "0.00123"]);
    assert_results("1/3", &["0.3333333333"]);
}

#[test]
fn declarations_and_functions() {
    assert_results("f(x):=x^2\nf(3)", &["9"]);
    assert_results("a:=2, b:=a+1\na*b", &["6"]);
    assert_results("g(x,y):=x*y+1\ng(2,g(1,1))", &["5"]);
    assert_success("k:=1, k:=k+1");
}

#[test]
fn functions_capture_their_declarations() {
    assert_results("a:=2\nf(x):=x*a\na:=10\nf(3)", &["6"]);
}

#[test]
fn declaration_errors() {
    assert_failure("ans:=3", "Declaring reserved word \"ans\" (in line 1)");
    assert_failure("f(x,x):=x", "Invalid function parameters \"x,x\" (in line 1)");
    assert_failure("f(x):=x+y", "Undeclared variable \"y\" (in line 1)");
    assert_failure("f(x):=f(x)", "Undeclared function \"f\" (in line 1)");
}

#[test]
fn errors_inside_functions_name_them() {
    assert_failure("f(x):=sqrt(x)\n\nf(-1)", "Math Error (in line 1 in function \"f\")");
    assert_failure("f(x):=x\nf(1,2)",
                   "Invalid argument count for \"f\", 1 required, 2 given (in line 2)");
}

#[test]
fn builtin_argument_counts() {
    assert_failure("gcd(4)", "Invalid argument count for \"gcd\", at least 2 required, 1 given (in line 1)");
    assert_failure("round(1,2,3)",
                   "Invalid argument count for \"round\", from 1 to 2 required, 3 given (in line 1)");
    assert_failure("nope(1)", "Undeclared function \"nope\" (in line 1)");
}

#[test]
fn answers() {
    assert_results("6*7\nans+1\nans(1)*2", &["42", "43", "84"]);
    assert_failure("ans(1)", "Math Error (in line 1)");
}

#[test]
fn decorated_functions() {
    assert_results("frac{1}{4}+frac{3}{4}", &["1"]);
    assert_results("frac{-2}{1}{2}", &["-2.5"]);
    assert_results("abs{-3}\nfloor{2.7}\nceil{2.1}", &["3", "2", "3"]);
    assert_results("sqrt{16}+nthroot{3}{27}", &["7"]);
    assert_results("summation{n}{1}{4}{n^2}\nproduct{n}{1}{6}{n}", &["30", "720"]);
}

#[test]
fn matrices() {
    assert_results("matrix{{1}{2}}{{3}{4}}⨯matrix{{5}{6}}{{7}{8}}", &["matrix{{19}{22}}{{43}{50}}"]);
    assert_results("det(matrix{{1}{2}}{{3}{4}})", &["-2"]);
    assert_results("matrix{{1}{2}}ᵀ", &["matrix{{1}}{{2}}"]);
    assert_results("matrix{{2}{0}}{{0}{4}}^-1", &["matrix{{0.5}{0}}{{0}{0.25}}"]);
    assert_failure("det(matrix{{1}{2}})", "Math Error (in line 1)");
}

#[test]
fn factorials() {
    assert_results("5!\n7!!\n0!", &["120", "105", "1"]);
    assert_failure("3!!!", "Invalid operator \"!!!\" (in line 1)");
    assert_failure("(-1)!", "Math Error (in line 1)");
}

#[test]
fn parse_errors_point_at_the_column() {
    assert_failure("(1+2", "[Error Pos 4]: Expected \")\"\n(1+2\n    ^");
}

#[test]
fn other_bases() {
    let hex = MathContext::new(16, bigcalc::bigmath::Precision::Digits(20), RoundingMode::HalfUp);
    let config = SessionConfig { eval_mc:    hex,
                                 display_mc: hex,
                                 notation:   Notation::UserFriendly, };
    let results = get_result("0FF+1\n0A*0A", &config).unwrap();
    assert_eq!(results, ["100", "64"]);

    let decimal_display = SessionConfig { display_mc: MathContext::decimal(10, RoundingMode::HalfUp),
                                          ..config };
    let results = get_result("0FF", &decimal_display).unwrap();
    assert_eq!(results, ["255"]);
}
