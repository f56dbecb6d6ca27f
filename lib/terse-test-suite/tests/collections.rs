//! Tests for list, array and collection folds.

use terse_test_suite::*;

#[test]
fn first_element_of_a_list() {
    Test::in_class(
        r#"
    String first(List<String> names) {
        return names.get(0);
    }
"#,
    )
    .expect(Region::at("names.get(0)").to("names[0]"));
}

#[test]
fn last_element_of_an_array() {
    Test::in_class(
        r#"
    String last(String[] arr) {
        return arr[arr.length - 1];
    }
"#,
    )
    .expect(Region::at("arr[arr.length - 1]").to("arr[-1]"));
}

#[test]
fn adding_to_a_collection() {
    Test::in_class(
        r#"
    void remember(List<String> names, String s) {
        names.add(s);
    }
"#,
    )
    .expect(Region::at("names.add(s)").to("names += s"));
}

#[test]
fn removing_by_index_is_not_a_collection_removal() {
    Test::in_class(
        r#"
    void drop(List<String> names) {
        names.remove(0);
    }
"#,
    )
    .expect(NoFolds);
}

#[test]
fn removing_by_value() {
    Test::in_class(
        r#"
    void forget(List<String> names, String s) {
        names.remove(s);
    }
"#,
    )
    .expect(Region::at("names.remove(s)").to("names -= s"));
}

#[test]
fn list_literals() {
    Test::in_class(
        r#"
    List<Integer> small() {
        return Arrays.asList(1, 2, 3);
    }
"#,
    )
    .expect(Region::at("Arrays.asList(1, 2, 3)").to("[1, 2, 3]"));
}

#[test]
fn empty_list_construction() {
    Test::in_class(
        r#"
    List<String> fresh() {
        return new ArrayList<>();
    }
"#,
    )
    .expect(Region::at("new ArrayList<>()").to("[]"));
}
