use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use crate::environment::Environment;
use monkey_core::ast;

use thiserror::Error;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Str(String),
    Array(Vec<Rc<Object>>),
    Hash(HashMap<HashKey, (Rc<Object>, Rc<Object>)>),
    Function(Function),
    Builtin(BuiltinFunction),
    Null,
}

thread_local! {
    static NULL: Rc<Object> = Rc::new(Object::Null);
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Rc<Object> {
        NULL.with(|x| x.clone())
    }
    pub fn boolean(value: bool) -> Rc<Object> {
        if value {
            TRUE.with(|x| x.clone())
        } else {
            FALSE.with(|x| x.clone())
        }
    }
    pub fn integer(value: i64) -> Rc<Object> {
        Rc::new(Object::Integer(value))
    }
    pub fn string(value: String) -> Rc<Object> {
        Rc::new(Object::Str(value))
    }
    pub fn array(array: Vec<Rc<Object>>) -> Rc<Object> {
        Rc::new(Object::Array(array))
    }
    pub fn hash(hash: HashMap<HashKey, (Rc<Object>, Rc<Object>)>) -> Rc<Object> {
        Rc::new(Object::Hash(hash))
    }
    pub fn function(
        parameters: Vec<ast::Identifier>,
        body: ast::BlockStatement,
        env: Environment,
    ) -> Rc<Object> {
        Rc::new(Object::Function(Function {
            parameters,
            body,
            env,
        }))
    }
    pub fn builtin(function: BuiltinFunction) -> Rc<Object> {
        Rc::new(Object::Builtin(function))
    }

    /// Only `false` and `null` are falsy; every other value is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    /// The value kind as it appears in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Str(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Null => "NULL",
        }
    }

    /// Canonical human-readable rendering, as printed by the REPL.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Str(value) => write!(f, "{}", value),
            Object::Array(array) => {
                write!(f, "[")?;
                for (i, element) in array.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Object::Hash(hash) => {
                write!(f, "{{")?;
                for (i, (key, value)) in hash.values().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Object::Function(function) => {
                write!(
                    f,
                    "fn({}) {{...}}",
                    function
                        .parameters
                        .iter()
                        .map(|id| id.name.as_ref())
                        .collect::<Vec<&str>>()
                        .join(", ")
                )
            }
            Object::Builtin(function) => write!(f, "builtin function {}", function.name),
            Object::Null => write!(f, "null"),
        }
    }
}

/// Object kinds that may key a hash.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    Str(String),
}

pub fn object_to_key(object: &Rc<Object>) -> Result<HashKey, EvaluationError> {
    match object.as_ref() {
        Object::Integer(value) => Ok(HashKey::Integer(*value)),
        Object::Boolean(value) => Ok(HashKey::Boolean(*value)),
        Object::Str(value) => Ok(HashKey::Str(value.clone())),
        _ => Err(EvaluationError::InvalidHashKey(object.clone())),
    }
}

#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<ast::Identifier>,
    pub body: ast::BlockStatement,
    /// The environment active where the literal was evaluated, shared, not
    /// copied. Bindings mutated after capture are observed by the closure.
    pub env: Environment,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && self.env == other.env
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    #[allow(clippy::type_complexity)]
    pub func: fn(Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError>,
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.func as usize == other.func as usize
    }
}

impl std::fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Non-local exit channel of the evaluator: a `return` unwinds to the nearest
/// call boundary, an error all the way to the top. Carried in the `Err`
/// position so `?` propagates both.
#[derive(Debug, PartialEq)]
pub enum QuickReturn {
    Return(Rc<Object>),
    Error(EvaluationError),
}

impl From<EvaluationError> for QuickReturn {
    fn from(error: EvaluationError) -> Self {
        QuickReturn::Error(error)
    }
}

#[derive(Debug, PartialEq, Error)]
pub enum EvaluationError {
    #[error("type mismatch: {} {} {}", .left.type_name(), .operation.to_str(), .right.type_name())]
    TypeMismatch {
        left: Rc<Object>,
        right: Rc<Object>,
        operation: ast::InfixOperationKind,
    },
    #[error("unknown operator: {} {} {}", .left.type_name(), .operation.to_str(), .right.type_name())]
    UnknownInfixOperator {
        left: Rc<Object>,
        right: Rc<Object>,
        operation: ast::InfixOperationKind,
    },
    #[error("unknown operator: {}{}", .operation.to_str(), .right.type_name())]
    UnknownPrefixOperator {
        right: Rc<Object>,
        operation: ast::PrefixOperationKind,
    },
    #[error("identifier not found: {0}")]
    UnknownIdentifier(Rc<str>),
    #[error("not a function: {}", .0.type_name())]
    CallNonFunction(Rc<Object>),
    #[error("wrong number of arguments: want={expected}, got={actual}")]
    WrongArgumentCount { expected: usize, actual: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("index operator not supported: {}", .0.type_name())]
    IndexNotSupported(Rc<Object>),
    #[error("unusable as hash key: {}", .0.type_name())]
    InvalidHashKey(Rc<Object>),
    #[error("{0}")]
    BuiltinFunctionError(Rc<str>),
}
