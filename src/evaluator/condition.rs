//! The condition evaluator.
//!
//! Evaluates boolean gate expressions against an [`ExecutionContext`].
//! Exactly three variables are addressable: `input`, `stage` and
//! `computed`. An omitted namespace is an empty mapping, never a missing
//! variable. The empty expression is defined as always-true and never
//! touches the script engine.
//!
//! Evaluation is a pure function of (expression text, context snapshot);
//! compiled ASTs are cached by expression text as an internal optimization
//! with no observable effect.

use std::collections::HashMap;

use parking_lot::RwLock;
use rhai::{Dynamic, Engine, Scope, AST};

use crate::context::ExecutionContext;
use crate::error::EvalError;
use crate::evaluator::value;

pub struct ConditionEvaluator {
    engine: Engine,
    cache: RwLock<HashMap<String, AST>>,
}

impl ConditionEvaluator {
    pub fn new() -> Self {
        let mut engine = Engine::new();
        // Reading a key that is not present must surface as an evaluation
        // error, not a silent unit value.
        engine.set_fail_on_invalid_map_property(true);
        ConditionEvaluator {
            engine,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Evaluate `expression` against `context`.
    ///
    /// An empty (or blank) expression short-circuits to `true` without
    /// compiling. A non-boolean result is an error, not a coercion.
    pub fn evaluate(
        &self,
        expression: &str,
        context: &ExecutionContext,
    ) -> Result<bool, EvalError> {
        if expression.trim().is_empty() {
            return Ok(true);
        }

        let ast = self.compiled(expression)?;
        let mut scope = build_scope(context);
        let result = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut scope, &ast)
            .map_err(|e| EvalError::Eval(e.to_string()))?;

        result
            .as_bool()
            .map_err(|found| EvalError::NotBoolean {
                found: found.to_string(),
            })
    }

    fn compiled(&self, expression: &str) -> Result<AST, EvalError> {
        if let Some(ast) = self.cache.read().get(expression) {
            return Ok(ast.clone());
        }
        let ast = self
            .engine
            .compile(expression)
            .map_err(|e| EvalError::Compile(e.to_string()))?;
        self.cache
            .write()
            .insert(expression.to_string(), ast.clone());
        Ok(ast)
    }

    #[cfg(test)]
    fn cached_expressions(&self) -> usize {
        self.cache.read().len()
    }
}

impl Default for ConditionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the three-variable scope. `stage` is rendered as an array of
/// `#{ status, activity: [ #{ status, output } ] }` so positional
/// expressions like `stage[0].activity[0].output.x` resolve naturally and
/// skipped slots read as present-but-empty.
fn build_scope(context: &ExecutionContext) -> Scope<'static> {
    let mut scope = Scope::new();
    scope.push_dynamic(
        "input",
        Dynamic::from(value::namespace_to_map(context.input.as_ref())),
    );
    scope.push_dynamic("stage", Dynamic::from(stage_array(context)));
    scope.push_dynamic(
        "computed",
        Dynamic::from(value::namespace_to_map(context.computed.as_ref())),
    );
    scope
}

fn stage_array(context: &ExecutionContext) -> rhai::Array {
    context
        .stage
        .iter()
        .map(|stage| {
            let activities: rhai::Array = stage
                .activities
                .iter()
                .map(|activity| {
                    let mut slot = rhai::Map::new();
                    slot.insert(
                        "status".into(),
                        Dynamic::from(activity.state.as_str().to_string()),
                    );
                    slot.insert(
                        "output".into(),
                        Dynamic::from(value::object_to_map(&activity.output)),
                    );
                    Dynamic::from(slot)
                })
                .collect();

            let mut record = rhai::Map::new();
            record.insert(
                "status".into(),
                Dynamic::from(stage.state.as_str().to_string()),
            );
            record.insert("activity".into(), Dynamic::from(activities));
            Dynamic::from(record)
        })
        .collect()
}
