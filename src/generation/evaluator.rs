//! Directive Evaluator
//!
//! Executes a parsed directive expression against the capability vocabulary.
//! The only state a directive can touch is the evaluator's random generator and
//! the caller's sequential cursors.

use crate::error::EvalError;
use crate::generation::cursors::{CallerId, CursorStore};
use crate::generation::expression::{self, Expr};
use crate::generation::fixtures::{FakeFixtures, Fixture, FixtureSource};
use crate::generation::vocabulary::{self, Capability, MAX_COUNT};
use crate::value::Value;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::trace;

/// Everything a capability may use while producing one value.
pub struct GenerationContext<'a> {
    rng: &'a mut StdRng,
    fixtures: &'a dyn FixtureSource,
    cursors: &'a CursorStore,
    caller: &'a CallerId,
    today: NaiveDate,
}

impl<'a> GenerationContext<'a> {
    pub fn rng(&mut self) -> &mut StdRng {
        &mut *self.rng
    }

    pub fn fixture(&mut self, fixture: &Fixture) -> String {
        self.fixtures.produce(fixture, &mut *self.rng)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn caller(&self) -> &CallerId {
        self.caller
    }

    /// Advance this caller's round-robin cursor over `items`.
    pub fn next_in_sequence(&mut self, items: &[Value]) -> Option<Value> {
        self.cursors.next(self.caller, items)
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::List(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            Expr::Range(lo, hi) => expand_range(*lo, *hi),
            Expr::Call { name, args } => self.call(name, None, args),
            Expr::Method {
                receiver,
                name,
                args,
            } => self.call(name, Some(*receiver), args),
            Expr::Concat(parts) => {
                let mut parts = parts.iter();
                let mut acc = match parts.next() {
                    Some(first) => self.eval(first)?,
                    None => return Ok(Value::Null),
                };
                for part in parts {
                    let next = self.eval(part)?;
                    acc = concat(acc, next)?;
                }
                Ok(acc)
            }
        }
    }

    fn call(&mut self, name: &str, receiver: Option<i64>, args: &[Expr]) -> Result<Value, EvalError> {
        let spec = vocabulary::lookup(name)
            .ok_or_else(|| EvalError::UnknownCapability(name.to_string()))?;

        let range = match (spec.capability, args) {
            (Capability::Randomize, [Expr::Range(lo, hi)]) => Some((*lo, *hi)),
            _ => None,
        };
        let values = if range.is_some() {
            Vec::new()
        } else {
            args.iter()
                .map(|arg| self.eval(arg))
                .collect::<Result<Vec<_>, _>>()?
        };

        trace!(capability = spec.name, ?receiver, "Invoking capability");
        spec.invoke(self, receiver, values, range)
    }
}

/// A range used as a plain value becomes the sequence of its integers.
fn expand_range(lo: i64, hi: i64) -> Result<Value, EvalError> {
    if lo > hi {
        return Ok(Value::Sequence(Vec::new()));
    }
    let len = hi.abs_diff(lo);
    if len >= MAX_COUNT as u64 {
        return Err(EvalError::invalid_arguments(
            "range",
            format!("{}..{} has more than {} elements", lo, hi, MAX_COUNT),
        ));
    }
    Ok(Value::Sequence((lo..=hi).map(Value::Integer).collect()))
}

/// `+`: strings concatenate, numbers add, a string and a number concatenate.
fn concat(left: Value, right: Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::String(mut a), Value::String(b)) => {
            a.push_str(&b);
            Ok(Value::String(a))
        }
        (Value::Integer(a), Value::Integer(b)) => a
            .checked_add(b)
            .map(Value::Integer)
            .ok_or_else(|| EvalError::invalid_arguments("+", format!("{} + {} overflows", a, b))),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(a as f64 + b)),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a + b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (Value::String(a), n @ (Value::Integer(_) | Value::Float(_))) => {
            Ok(Value::String(format!("{}{}", a, n)))
        }
        (n @ (Value::Integer(_) | Value::Float(_)), Value::String(b)) => {
            Ok(Value::String(format!("{}{}", n, b)))
        }
        (left, right) => Err(EvalError::Concatenation {
            left: left.kind(),
            right: right.kind(),
        }),
    }
}

/// Evaluates directive expressions for any number of callers.
///
/// Holds the random generator (seedable for repeatable runs), the fixture source
/// and the cursor store backing `sequential`.
pub struct DirectiveEvaluator {
    fixtures: Arc<dyn FixtureSource>,
    cursors: Arc<CursorStore>,
    rng: Mutex<StdRng>,
    fixed_date: Option<NaiveDate>,
}

impl DirectiveEvaluator {
    /// Evaluator over `fake` fixtures and the process-wide cursor store.
    ///
    /// Without a seed the generator is seeded from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            fixtures: Arc::new(FakeFixtures),
            cursors: CursorStore::global(),
            rng: Mutex::new(seeded_rng(seed)),
            fixed_date: None,
        }
    }

    pub fn with_fixtures(mut self, fixtures: Arc<dyn FixtureSource>) -> Self {
        self.fixtures = fixtures;
        self
    }

    pub fn with_cursor_store(mut self, cursors: Arc<CursorStore>) -> Self {
        self.cursors = cursors;
        self
    }

    /// Pin "today" for date capabilities.
    pub fn with_fixed_date(mut self, date: NaiveDate) -> Self {
        self.fixed_date = Some(date);
        self
    }

    /// Restart the random sequence from `seed`.
    pub fn reseed(&self, seed: u64) {
        *self.rng.lock() = StdRng::seed_from_u64(seed);
    }

    pub fn cursors(&self) -> &Arc<CursorStore> {
        &self.cursors
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Parse and evaluate one directive body (without the `~` marker).
    pub fn evaluate(&self, expression: &str, caller: &CallerId) -> Result<Value, EvalError> {
        let expr = expression::parse(expression)?;
        self.evaluate_expr(&expr, caller)
    }

    pub fn evaluate_expr(&self, expr: &Expr, caller: &CallerId) -> Result<Value, EvalError> {
        let today = self.today();
        let mut rng = self.rng.lock();
        let mut ctx = GenerationContext {
            rng: &mut *rng,
            fixtures: self.fixtures.as_ref(),
            cursors: &self.cursors,
            caller,
            today,
        };
        ctx.eval(expr)
    }
}

impl Default for DirectiveEvaluator {
    fn default() -> Self {
        Self::new(None)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
