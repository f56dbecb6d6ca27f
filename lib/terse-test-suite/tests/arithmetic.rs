//! Tests for arithmetic folds over numbers, decimals and `Math`.

use terse_test_suite::*;

mod decimals {
    use super::*;

    #[test]
    fn add_then_multiply() {
        Test::in_class(
            r#"
    BigDecimal total(BigDecimal a, BigDecimal b, BigDecimal c) {
        return a.add(b).multiply(c);
    }
"#,
        )
        .expect(ParsesCleanly)
        .expect(Region::at("a.add(b).multiply(c)").to("(a + b) * c").collapsed(true))
        .expect(RegionCount(1));
    }

    #[test]
    fn negate() {
        Test::in_class(
            r#"
    BigDecimal flip(BigDecimal a) {
        return a.negate();
    }
"#,
        )
        .expect(Region::at("a.negate()").to("-a"));
    }

    #[test]
    fn compare_to_zero() {
        Test::in_class(
            r#"
    boolean same(BigDecimal a, BigDecimal b) {
        return a.compareTo(b) == 0;
    }
"#,
        )
        .expect(Region::at("a.compareTo(b) == 0").to("a == b"));
    }

    #[test]
    fn compare_to_orderings() {
        Test::in_class(
            r#"
    boolean below(BigDecimal a, BigDecimal b) {
        return a.compareTo(b) < 0;
    }

    boolean atMost(BigDecimal a, BigDecimal b) {
        return 1 > a.compareTo(b);
    }

    boolean differs(BigDecimal a, BigDecimal b) {
        return a.compareTo(b) != 0;
    }
"#,
        )
        .expect(Region::at("a.compareTo(b) < 0").to("a < b"))
        .expect(Region::at("1 > a.compareTo(b)").to("a ≤ b"))
        .expect(Region::at("a.compareTo(b) != 0").to("a ≠ b"))
        .expect(RegionCount(3));
    }

    #[test]
    fn negated_equals() {
        Test::in_class(
            r#"
    boolean differ(BigDecimal a, BigDecimal b) {
        return !a.equals(b);
    }
"#,
        )
        .expect(Region::at("!a.equals(b)").to("a ≠ b"));
    }
}

mod numbers {
    use super::*;

    #[test]
    fn compound_assignment() {
        Test::in_class(
            r#"
    void bump(int x, int y) {
        x = x + y;
    }
"#,
        )
        .expect(Region::at("x = x + y").to("x += y"));
    }

    #[test]
    fn plain_arithmetic_is_left_alone() {
        Test::in_class(
            r#"
    int sum(int x, int y) {
        return x + y;
    }
"#,
        )
        .expect(NoFolds);
    }

    #[test]
    fn range_check() {
        Test::in_class(
            r#"
    boolean inside(int x) {
        return x > 0 && x < 10;
    }
"#,
        )
        .expect(Region::at("x > 0 && x < 10").to("0 < x < 10"));
    }
}

mod math {
    use super::*;

    #[test]
    fn square_root() {
        Test::in_class(
            r#"
    double root(double x) {
        return Math.sqrt(x);
    }
"#,
        )
        .expect(Region::at("Math.sqrt(x)").to("√x"));
    }

    #[test]
    fn hypotenuse() {
        Test::in_class(
            r#"
    double length(double x, double y) {
        return Math.hypot(x, y);
    }
"#,
        )
        .expect(Region::at("Math.hypot(x, y)").to("√(x² + y²)"));
    }

    #[test]
    fn constants() {
        Test::in_class(
            r#"
    double circumference(double r) {
        return 2 * Math.PI * r;
    }
"#,
        )
        .expect(Folds("2 * π * r"));
    }
}

mod unsupported {
    use super::*;

    #[test]
    fn user_classes_do_not_fold() {
        Test::new(
            r#"
class Widget {
    Widget add(Widget other) { return this; }
}

class Test {
    Widget combine(Widget a, Widget b) {
        return a.add(b);
    }
}
"#,
        )
        .expect(ParsesCleanly)
        .expect(NoFolds);
    }
}
