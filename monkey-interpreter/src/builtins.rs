use std::rc::Rc;

use crate::object::{BuiltinFunction, EvaluationError, Object};

fn wrong_argument_count(expected: usize, actual: usize) -> EvaluationError {
    EvaluationError::WrongArgumentCount { expected, actual }
}

fn wrong_argument_type(name: &str, expected: &str, got: &Object) -> EvaluationError {
    EvaluationError::BuiltinFunctionError(
        format!(
            "argument to `{}` must be {}, got {}",
            name,
            expected,
            got.type_name()
        )
        .into(),
    )
}

fn builtin_len(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    let [arg] = args.as_slice() else {
        return Err(wrong_argument_count(1, args.len()));
    };
    match arg.as_ref() {
        Object::Str(s) => Ok(Object::integer(s.len() as i64)),
        Object::Array(arr) => Ok(Object::integer(arr.len() as i64)),
        other => Err(EvaluationError::BuiltinFunctionError(
            format!("argument to `len` not supported, got {}", other.type_name()).into(),
        )),
    }
}

fn builtin_first(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    let [arg] = args.as_slice() else {
        return Err(wrong_argument_count(1, args.len()));
    };
    match arg.as_ref() {
        Object::Array(arr) => Ok(arr.first().cloned().unwrap_or_else(Object::null)),
        other => Err(wrong_argument_type("first", "ARRAY", other)),
    }
}

fn builtin_last(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    let [arg] = args.as_slice() else {
        return Err(wrong_argument_count(1, args.len()));
    };
    match arg.as_ref() {
        Object::Array(arr) => Ok(arr.last().cloned().unwrap_or_else(Object::null)),
        other => Err(wrong_argument_type("last", "ARRAY", other)),
    }
}

/// Everything but the first element, as a fresh array. `rest([])` is `null`.
fn builtin_rest(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    let [arg] = args.as_slice() else {
        return Err(wrong_argument_count(1, args.len()));
    };
    match arg.as_ref() {
        Object::Array(arr) => {
            if arr.is_empty() {
                Ok(Object::null())
            } else {
                Ok(Object::array(arr[1..].to_vec()))
            }
        }
        other => Err(wrong_argument_type("rest", "ARRAY", other)),
    }
}

/// Returns a new array with the element appended; the argument array is
/// never mutated.
fn builtin_push(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    let [arg, element] = args.as_slice() else {
        return Err(wrong_argument_count(2, args.len()));
    };
    match arg.as_ref() {
        Object::Array(arr) => {
            let mut new_arr = arr.clone();
            new_arr.push(element.clone());
            Ok(Object::array(new_arr))
        }
        other => Err(wrong_argument_type("push", "ARRAY", other)),
    }
}

fn builtin_puts(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    for arg in args {
        println!("{}", arg.inspect());
    }
    Ok(Object::null())
}

type BuiltinImpl = fn(Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError>;

const BUILTINS: &[(&str, BuiltinImpl)] = &[
    ("len", builtin_len),
    ("first", builtin_first),
    ("last", builtin_last),
    ("rest", builtin_rest),
    ("push", builtin_push),
    ("puts", builtin_puts),
];

pub(crate) fn lookup(name: &str) -> Option<BuiltinFunction> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|&(name, func)| BuiltinFunction { name, func })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::EvaluationError;

    #[test]
    fn test_len() {
        let no_arguments = builtin_len(vec![]);
        assert_eq!(
            no_arguments,
            Err(EvaluationError::WrongArgumentCount {
                expected: 1,
                actual: 0
            })
        );

        let too_many_arguments = builtin_len(vec![
            Object::string("hello".to_owned()),
            Object::string("world".to_owned()),
        ]);
        assert_eq!(
            too_many_arguments,
            Err(EvaluationError::WrongArgumentCount {
                expected: 1,
                actual: 2
            })
        );

        let empty_array = builtin_len(vec![Object::array(vec![])]);
        assert_eq!(empty_array, Ok(Object::integer(0)));

        let string_len = builtin_len(vec![Object::string("hello".to_owned())]);
        assert_eq!(string_len, Ok(Object::integer(5)));

        let integer_len = builtin_len(vec![Object::integer(42)]);
        assert_eq!(
            integer_len,
            Err(EvaluationError::BuiltinFunctionError(
                "argument to `len` not supported, got INTEGER".into()
            ))
        );
    }

    #[test]
    fn test_first_last_rest() {
        let arr = Object::array(vec![
            Object::integer(1),
            Object::integer(2),
            Object::integer(3),
        ]);

        assert_eq!(builtin_first(vec![arr.clone()]), Ok(Object::integer(1)));
        assert_eq!(builtin_last(vec![arr.clone()]), Ok(Object::integer(3)));
        assert_eq!(
            builtin_rest(vec![arr]),
            Ok(Object::array(vec![Object::integer(2), Object::integer(3)]))
        );

        let empty = Object::array(vec![]);
        assert_eq!(builtin_first(vec![empty.clone()]), Ok(Object::null()));
        assert_eq!(builtin_last(vec![empty.clone()]), Ok(Object::null()));
        assert_eq!(builtin_rest(vec![empty]), Ok(Object::null()));
    }

    #[test]
    fn test_push_leaves_the_original_untouched() {
        let arr = Object::array(vec![Object::integer(1)]);
        let pushed = builtin_push(vec![arr.clone(), Object::integer(2)]);

        assert_eq!(
            pushed,
            Ok(Object::array(vec![Object::integer(1), Object::integer(2)]))
        );
        assert_eq!(arr, Object::array(vec![Object::integer(1)]));
    }

    #[test]
    fn test_wrong_argument_type() {
        assert_eq!(
            builtin_first(vec![Object::integer(1)]),
            Err(EvaluationError::BuiltinFunctionError(
                "argument to `first` must be ARRAY, got INTEGER".into()
            ))
        );
    }
}
