use crate::util::{parse_switch, Code, Position};

#[test]
fn switch_values() {
    for value in ["yes", "TRUE", "t", "Y", "1"] {
        assert_eq!(parse_switch(value), Some(true), "{}", value);
    }
    for value in ["no", "False", "f", "N", "0"] {
        assert_eq!(parse_switch(value), Some(false), "{}", value);
    }
    assert_eq!(parse_switch("maybe"), None);
    assert_eq!(parse_switch(""), None);
}

#[test]
fn positions_count_lines_and_byte_columns() {
    let code = Code::from("ab\ncd\n\nef");
    assert_eq!(code.obtain_position(0), Position::new(1, 1));
    assert_eq!(code.obtain_position(1), Position::new(1, 2));
    assert_eq!(code.obtain_position(3), Position::new(2, 1));
    assert_eq!(code.obtain_position(4), Position::new(2, 2));
    assert_eq!(code.obtain_position(6), Position::new(3, 1));
    assert_eq!(code.obtain_position(7), Position::new(4, 1));
}

#[test]
fn position_renders_for_diagnostics() {
    assert_eq!(
        format!("{}", Position::new(3, 14)),
        "line 3 column 14"
    );
}
