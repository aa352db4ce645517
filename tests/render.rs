use puf::{
    interpreter::value::{core::Value, mapping::Mapping},
    render::{display, display_raw},
};

fn rendered(value: &Value) -> String {
    let mut out = Vec::new();
    display(value, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn rendered_raw(value: &Value) -> String {
    let mut out = Vec::new();
    display_raw(value, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn none_renders_nothing() {
    assert_eq!(rendered(&Value::None), "");
}

#[test]
fn strings_render_verbatim() {
    assert_eq!(rendered(&Value::from("a 'b'")), "a 'b'\n");
    assert_eq!(rendered(&Value::from("")), "\n");
}

#[test]
fn mappings_render_key_value_lines_without_none() {
    let map: Mapping = [("a", Value::Integer(1)), ("b", Value::None), ("c", Value::Integer(3))].into_iter()
                                                                                            .collect();

    assert_eq!(rendered(&map.into()), "a=1\nc=3\n");
}

#[test]
fn mapping_values_use_their_text_form() {
    let map: Mapping = [("name", Value::from("Ada")), ("scores", Value::from(vec![Value::Integer(9)]))].into_iter()
                                                                                                     .collect();

    assert_eq!(rendered(&map.into()), "name=Ada\nscores=[9]\n");
}

#[test]
fn sequences_render_one_element_per_line() {
    let list = Value::from(vec![Value::Integer(1), Value::None, Value::from("x"), Value::Real(2.0)]);
    let tuple = Value::tuple(vec![Value::Integer(1), Value::Integer(3)]);

    assert_eq!(rendered(&list), "1\nx\n2.0\n");
    assert_eq!(rendered(&tuple), "1\n3\n");
}

#[test]
fn nested_sequences_render_their_text_form() {
    let cols = Value::from(vec![Value::tuple(vec![Value::Integer(1), Value::Integer(3)]),
                                Value::tuple(vec![Value::Integer(2)])]);

    assert_eq!(rendered(&cols), "(1, 3)\n(2,)\n");
}

#[test]
fn empty_containers_render_a_single_newline() {
    assert_eq!(rendered(&Value::from(Vec::<Value>::new())), "\n");
    assert_eq!(rendered(&Mapping::new().into()), "\n");
}

#[test]
fn scalars_render_their_text_form() {
    assert_eq!(rendered(&Value::Integer(4)), "4\n");
    assert_eq!(rendered(&Value::Real(1000.0)), "1000.0\n");
    assert_eq!(rendered(&Value::Bool(true)), "True\n");
}

#[test]
fn raw_rendering_ignores_the_type_rules() {
    assert_eq!(rendered_raw(&Value::Integer(2)), "2\n");
    assert_eq!(rendered_raw(&Value::None), "None\n");
    assert_eq!(rendered_raw(&Value::from(vec![Value::from("a")])), "['a']\n");
}
