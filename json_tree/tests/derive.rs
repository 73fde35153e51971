use std::collections::HashMap;

use json_tree::{ConvertErr, FromValue, JsonValue, parse_str};

#[derive(FromValue, Debug, PartialEq)]
struct Address {
    street: String,
    zipcode: String,
}

#[derive(FromValue, Debug, PartialEq)]
struct Person {
    name: String,
    age: u32,
    nickname: Option<String>,
    balance: f64,
    tags: Vec<String>,
    address: Address,
    r#type: String,
    extra: HashMap<String, JsonValue>,
}

fn person(source: &str) -> Result<Person, ConvertErr> {
    Person::from_value(&JsonValue::Object(parse_str(source).unwrap()))
}

#[test]
fn test_derive() {
    let result = person(
        r#"{
            "name": "Jane Doe",
            "age": 32,
            "balance": 10457,
            "tags": ["user", "admin"],
            "address": {"street": "123 Maple Street", "zipcode": "12345"},
            "type": "admin",
            "extra": {"a": 1},
            "ignored": [true]
        }"#,
    );

    let expected = Person {
        name: "Jane Doe".to_string(),
        age: 32,
        nickname: None,
        balance: 10457.0,
        tags: vec!["user".to_string(), "admin".to_string()],
        address: Address {
            street: "123 Maple Street".to_string(),
            zipcode: "12345".to_string(),
        },
        r#type: "admin".to_string(),
        extra: HashMap::from([("a".to_string(), JsonValue::Integer(1))]),
    };

    assert_eq!(Ok(expected), result);
}

#[test]
fn test_missing_field() {
    let result = Address::from_value(&JsonValue::Object(
        parse_str(r#"{"street": "123 Maple Street"}"#).unwrap(),
    ));

    assert_eq!(Err(ConvertErr::MissingField("zipcode")), result);
}

#[test]
fn test_nested_field_error() {
    let result = Address::from_value(&JsonValue::Object(
        parse_str(r#"{"street": "123 Maple Street", "zipcode": 12345}"#).unwrap(),
    ));

    assert_eq!(
        Err(ConvertErr::Field {
            name: "zipcode",
            source: Box::new(ConvertErr::TypeMismatch {
                expected: "string",
                found: "integer",
            }),
        }),
        result
    );
    assert_eq!(
        "in field 'zipcode': expected string, found integer",
        result.unwrap_err().to_string()
    );
}

#[test]
fn test_not_an_object() {
    assert_eq!(
        Err(ConvertErr::TypeMismatch {
            expected: "object",
            found: "array",
        }),
        Address::from_value(&JsonValue::Array(vec![]))
    );
}

#[derive(FromValue, Debug, PartialEq)]
struct Labelled<T> {
    label: String,
    value: T,
    history: Vec<T>,
}

#[test]
fn test_generic_struct() {
    let value = JsonValue::Object(
        parse_str(r#"{"label": "temperature", "value": 21.5, "history": [19, 20.25]}"#).unwrap(),
    );

    assert_eq!(
        Ok(Labelled {
            label: "temperature".to_string(),
            value: 21.5,
            history: vec![19.0, 20.25],
        }),
        Labelled::<f64>::from_value(&value)
    );
    assert_eq!(
        Err(ConvertErr::Field {
            name: "value",
            source: Box::new(ConvertErr::TypeMismatch {
                expected: "boolean",
                found: "float",
            }),
        }),
        Labelled::<bool>::from_value(&value)
    );
}
