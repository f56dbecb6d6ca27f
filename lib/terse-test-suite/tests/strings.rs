//! Tests for string folds.

use terse_test_suite::*;

#[test]
fn interpolation() {
    Test::in_class(
        r#"
    String describe(int x) {
        return "x = " + x + "!";
    }
"#,
    )
    .expect(Region::at(r#""x = " + x + "!""#).to(r#""x = $x!""#));
}

#[test]
fn interpolation_of_string_variables() {
    Test::in_class(
        r#"
    String greet(String a, String b) {
        return a + b + "!";
    }
"#,
    )
    .expect(Region::at(r#"a + b + "!""#).to(r#""$a$b!""#));
}

#[test]
fn dollar_signs_are_escaped() {
    Test::in_class(
        r#"
    String price(int x) {
        return "cost $" + x;
    }
"#,
    )
    .expect(Region::at(r#""cost $" + x"#).to(r#""cost \$$x""#));
}

#[test]
fn suffix() {
    Test::in_class(
        r#"
    String tail(String s) {
        return s.substring(1);
    }
"#,
    )
    .expect(Region::at("s.substring(1)").to("s[1:]"));
}

#[test]
fn substring_from_the_end() {
    Test::in_class(
        r#"
    String trimmed(String s) {
        return s.substring(0, s.length() - 2);
    }
"#,
    )
    .expect(Region::at("s.substring(0, s.length() - 2)").to("s[:-2]"));
}
