use kbc_common::{CommonError, comma_separated_value_to_list, comma_separated_values_to_list};
use serde_json::json;

#[test]
fn splits_and_trims_values() {
    assert_eq!(
        comma_separated_values_to_list("1,2,3,4,5"),
        vec!["1", "2", "3", "4", "5"]
    );
    assert_eq!(
        comma_separated_values_to_list("name,age,email"),
        vec!["name", "age", "email"]
    );
    assert_eq!(
        comma_separated_values_to_list("asdh7,asdhj$#@,p_.sd,96,5"),
        vec!["asdh7", "asdhj$#@", "p_.sd", "96", "5"]
    );
}

#[test]
fn empty_string_gives_empty_list() {
    assert!(comma_separated_values_to_list("").is_empty());
}

#[test]
fn json_string_value_is_split() {
    let columns = comma_separated_value_to_list(&json!(" id , name ")).unwrap();
    assert_eq!(columns, vec!["id", "name"]);
}

#[test]
fn non_string_value_is_invalid_input() {
    assert_eq!(
        comma_separated_value_to_list(&json!(123)),
        Err(CommonError::InvalidInput { found: "number" })
    );
    let err = comma_separated_value_to_list(&json!(["a", "b"])).unwrap_err();
    assert_eq!(err.to_string(), "input must be a string, got array");
}
