use std::collections::HashMap;
use std::rc::Rc;

use crate::environment::Environment;
use crate::object::{object_to_key, EvaluationError, Object, QuickReturn};
use monkey_core::ast;
use monkey_core::ast::Expression;

pub fn eval_program(
    program: &ast::Program,
    environment: &mut Environment,
) -> Result<Rc<Object>, EvaluationError> {
    let mut output = Object::null();
    for statement in &program.statements {
        match eval_statement(statement, environment) {
            Ok(object) => output = object,
            // A top-level return ends the program with its value.
            Err(QuickReturn::Return(value)) => return Ok(value),
            Err(QuickReturn::Error(error)) => return Err(error),
        };
    }
    Ok(output)
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match statement {
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
        ast::Statement::Return(statement) => eval_return_statement(statement, environment),
        ast::Statement::Let(statement) => eval_let_statement(statement, environment),
    }
}

fn eval_let_statement(
    statement: &ast::LetStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    environment.set(statement.identifier.name.clone(), value.clone());
    // Yielding the bound value keeps `let` useful as a REPL expression.
    Ok(value)
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    Err(QuickReturn::Return(value))
}

fn eval_block_statement(
    block: &ast::BlockStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let mut result = Object::null();
    for statement in &block.statements {
        result = eval_statement(statement, environment)?;
    }
    Ok(result)
}

fn eval_expression(
    expression: &Expression,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::StringLiteral(value) => Ok(Object::string(value.clone())),
        Expression::ArrayLiteral(array) => Ok(Object::array(
            array
                .iter()
                .map(|expression| eval_expression(expression, environment))
                .collect::<Result<Vec<_>, _>>()?,
        )),
        Expression::HashLiteral(literal) => {
            let mut hashmap = HashMap::new();
            for (key_expression, value_expression) in literal {
                let key = eval_expression(key_expression, environment)?;
                let value = eval_expression(value_expression, environment)?;
                let hashed_key = object_to_key(&key)?;
                hashmap.insert(hashed_key, (key, value));
            }
            Ok(Object::hash(hashmap))
        }
        Expression::Identifier(identifier) => {
            environment.get(&identifier.name).ok_or_else(|| {
                QuickReturn::Error(EvaluationError::UnknownIdentifier(identifier.name.clone()))
            })
        }
        Expression::PrefixOperation(kind, expression) => {
            let right = eval_expression(expression, environment)?;
            eval_prefix_operation(kind, right)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment)?;
            let right = eval_expression(right, environment)?;
            eval_infix_operation(kind, left, right)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if condition.is_truthy() {
                eval_block_statement(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            body.clone(),
            environment.clone(),
        )),
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let function = eval_expression(function, environment)?;
            match function.as_ref() {
                Object::Function(function) => eval_call_function(function, arguments, environment),
                Object::Builtin(builtin) => {
                    let arguments = eval_expressions(arguments, environment)?;
                    (builtin.func)(arguments).map_err(QuickReturn::Error)
                }
                _ => Err(QuickReturn::Error(EvaluationError::CallNonFunction(
                    function.clone(),
                ))),
            }
        }
        Expression::IndexExpression { left, index } => {
            let left = eval_expression(left, environment)?;
            let index = eval_expression(index, environment)?;
            eval_index_operation(left, index)
        }
    }
}

fn eval_expressions(
    expressions: &[Expression],
    environment: &mut Environment,
) -> Result<Vec<Rc<Object>>, QuickReturn> {
    let mut result = Vec::with_capacity(expressions.len());
    for expression in expressions {
        result.push(eval_expression(expression, environment)?);
    }
    Ok(result)
}

fn eval_call_function(
    function: &crate::object::Function,
    arguments: &[Expression],
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let arguments = eval_expressions(arguments, environment)?;
    if function.parameters.len() != arguments.len() {
        return Err(QuickReturn::Error(EvaluationError::WrongArgumentCount {
            expected: function.parameters.len(),
            actual: arguments.len(),
        }));
    }

    // The call frame encloses the captured environment, not the caller's.
    let mut call_environment = Environment::new_enclosed(function.env.clone());
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        call_environment.set(parameter.name.clone(), argument);
    }

    match eval_block_statement(&function.body, &mut call_environment) {
        Ok(object) => Ok(object),
        // The call boundary is where a `return` stops unwinding.
        Err(QuickReturn::Return(value)) => Ok(value),
        Err(QuickReturn::Error(error)) => Err(QuickReturn::Error(error)),
    }
}

fn eval_prefix_operation(
    kind: &ast::PrefixOperationKind,
    right: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    match (kind, right.as_ref()) {
        (ast::PrefixOperationKind::Bang, _) => Ok(Object::boolean(!right.is_truthy())),
        (ast::PrefixOperationKind::Minus, Object::Integer(value)) => value
            .checked_neg()
            .map(Object::integer)
            .ok_or(QuickReturn::Error(EvaluationError::IntegerOverflow)),
        _ => Err(QuickReturn::Error(EvaluationError::UnknownPrefixOperator {
            right,
            operation: kind.clone(),
        })),
    }
}

fn checked_arithmetic(result: Option<i64>) -> Result<Rc<Object>, QuickReturn> {
    result
        .map(Object::integer)
        .ok_or(QuickReturn::Error(EvaluationError::IntegerOverflow))
}

fn eval_infix_operation(
    kind: &ast::InfixOperationKind,
    left: Rc<Object>,
    right: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    use ast::InfixOperationKind;

    match (kind, left.as_ref(), right.as_ref()) {
        (InfixOperationKind::Plus, Object::Integer(left), Object::Integer(right)) => {
            checked_arithmetic(left.checked_add(*right))
        }
        (InfixOperationKind::Minus, Object::Integer(left), Object::Integer(right)) => {
            checked_arithmetic(left.checked_sub(*right))
        }
        (InfixOperationKind::Multiply, Object::Integer(left), Object::Integer(right)) => {
            checked_arithmetic(left.checked_mul(*right))
        }
        (InfixOperationKind::Divide, Object::Integer(left), Object::Integer(right)) => {
            if *right == 0 {
                Err(QuickReturn::Error(EvaluationError::DivisionByZero))
            } else {
                // `checked_div` also guards i64::MIN / -1.
                checked_arithmetic(left.checked_div(*right))
            }
        }
        (InfixOperationKind::LessThan, Object::Integer(left), Object::Integer(right)) => {
            Ok(Object::boolean(left < right))
        }
        (InfixOperationKind::GreaterThan, Object::Integer(left), Object::Integer(right)) => {
            Ok(Object::boolean(left > right))
        }
        (InfixOperationKind::Equal, Object::Integer(left), Object::Integer(right)) => {
            Ok(Object::boolean(left == right))
        }
        (InfixOperationKind::NotEqual, Object::Integer(left), Object::Integer(right)) => {
            Ok(Object::boolean(left != right))
        }
        (InfixOperationKind::Equal, Object::Boolean(left), Object::Boolean(right)) => {
            Ok(Object::boolean(left == right))
        }
        (InfixOperationKind::NotEqual, Object::Boolean(left), Object::Boolean(right)) => {
            Ok(Object::boolean(left != right))
        }
        (InfixOperationKind::Plus, Object::Str(left), Object::Str(right)) => {
            Ok(Object::string(format!("{}{}", left, right)))
        }
        (InfixOperationKind::Equal, Object::Str(left), Object::Str(right)) => {
            Ok(Object::boolean(left == right))
        }
        (InfixOperationKind::NotEqual, Object::Str(left), Object::Str(right)) => {
            Ok(Object::boolean(left != right))
        }
        (kind, left_object, right_object) => {
            let error = if left_object.type_name() != right_object.type_name() {
                EvaluationError::TypeMismatch {
                    left,
                    right,
                    operation: kind.clone(),
                }
            } else {
                EvaluationError::UnknownInfixOperator {
                    left,
                    right,
                    operation: kind.clone(),
                }
            };
            Err(QuickReturn::Error(error))
        }
    }
}

fn eval_index_operation(left: Rc<Object>, index: Rc<Object>) -> Result<Rc<Object>, QuickReturn> {
    match (left.as_ref(), index.as_ref()) {
        (Object::Array(array), Object::Integer(index)) => Ok(usize::try_from(*index)
            .ok()
            .and_then(|index| array.get(index))
            .cloned()
            .unwrap_or_else(Object::null)),
        (Object::Array(_), _) => Err(QuickReturn::Error(EvaluationError::IndexNotSupported(
            index,
        ))),
        (Object::Hash(hash), _) => {
            let hashed_index = object_to_key(&index)?;
            Ok(hash
                .get(&hashed_index)
                .map(|(_, value)| value.clone())
                .unwrap_or_else(Object::null))
        }
        _ => Err(QuickReturn::Error(EvaluationError::IndexNotSupported(left))),
    }
}
