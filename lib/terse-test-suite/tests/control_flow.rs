//! Tests for loops, null checks and local declarations.

use terse_test_suite::*;

mod loops {
    use super::*;

    #[test]
    fn counted_loop() {
        Test::in_class(
            r#"
    void count(int n) {
        for (int i = 0; i < n; i++) {
            System.out.println(i);
        }
    }
"#,
        )
        .expect(Region::at("int i = 0; i < n; i++").to("i ∈ [0, n)"))
        .expect(RegionCount(1));
    }

    #[test]
    fn loop_that_ignores_its_index() {
        Test::in_class(
            r#"
    void repeat(int n) {
        for (int i = 0; i < n; i++) {
            System.out.println(n);
        }
    }
"#,
        )
        .expect(Region::at("int i = 0; i < n; i++").to("0 ≤ i < n"))
        .expect(RegionCount(1));
    }

    #[test]
    fn indexed_loop_over_a_list() {
        Test::in_class(
            r#"
    void print(List<String> list) {
        for (int i = 0; i < list.size(); i++) {
            String s = list.get(i);
            System.out.println(s);
        }
    }
"#,
        )
        .expect(Folds("s : list"))
        .expect(Region::at("String s = list.get(i);").to(""));
    }
}

mod null_checks {
    use super::*;

    #[test]
    fn guarded_call() {
        Test::in_class(
            r#"
    void wake(String s) {
        if (s != null) s.notify();
    }
"#,
        )
        .expect(Region::at("if (s != null) s.notify();").to("s?.notify();"));
    }

    #[test]
    fn guard_used_twice_is_kept() {
        Test::in_class(
            r#"
    void twice(String s) {
        if (s != null) s.concat(s);
    }
"#,
        )
        .expect(NoFolds);
    }

    #[test]
    fn default_value() {
        Test::in_class(
            r#"
    String pick(String s, String t) {
        return s != null ? s : t;
    }
"#,
        )
        .expect(Region::at("s != null ? s : t").to("s ?: t"));
    }
}

mod declarations {
    use super::*;

    #[test]
    fn values_and_variables() {
        Test::in_class(
            r#"
    BigDecimal sum(BigDecimal a, BigDecimal b) {
        BigDecimal total = a.add(b);
        return total;
    }

    int count(int n) {
        int seen = 0;
        seen += n;
        return seen;
    }
"#,
        )
        .expect(Region::at("BigDecimal").to("val"))
        .expect(Region::at("a.add(b)").to("a + b"))
        .expect(Region::at("int").to("var"));
    }
}

mod accessors {
    use super::*;

    const PERSON: &str = r#"
class Person {
    String name;
    String getName() { return name; }
    void setName(String name) { this.name = name; }
}

class Test {
    String read(Person p) {
        return p.getName();
    }

    void write(Person p) {
        p.setName("Ada");
    }
}
"#;

    #[test]
    fn getter() {
        Test::new(PERSON).expect(Region::at("getName()").to("name"));
    }

    #[test]
    fn setter() {
        Test::new(PERSON).expect(Region::at(r#"setName("Ada")"#).to(r#"name = "Ada""#));
    }
}
