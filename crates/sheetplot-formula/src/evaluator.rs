//! Formula evaluator
//!
//! Evaluates formula ASTs against a workbook. Before the requested cell is
//! resolved, its formula dependencies are walked iteratively in post-order
//! and each result is memoized, so long reference chains never nest deeply.
//! The chain of cells currently being evaluated is tracked so a cycle yields
//! `#REF!` instead of recursing forever.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use std::rc::Rc;
use std::sync::OnceLock;

use log::debug;
use sheetplot_core::number_format::format_general;
use sheetplot_core::{CellAddress, CellError, CellValue, Workbook, Worksheet};

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use crate::parser::parse_formula;

static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

fn function_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Value types during formula evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Error(CellError),
    /// Range or array constant, row-major
    Array(Vec<Vec<FormulaValue>>),
    Empty,
}

impl FormulaValue {
    /// Coerce to a number the way arithmetic operators do
    ///
    /// Blank is 0, booleans are 0/1, numeric text is parsed; anything else
    /// is `#VALUE!` and errors pass through.
    pub fn to_number(&self) -> Result<f64, CellError> {
        match self {
            FormulaValue::Number(n) => Ok(*n),
            FormulaValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            FormulaValue::Empty => Ok(0.0),
            FormulaValue::String(s) => s.trim().parse().map_err(|_| CellError::Value),
            FormulaValue::Error(e) => Err(*e),
            FormulaValue::Array(_) => Err(CellError::Value),
        }
    }

    /// Coerce to a boolean the way logical functions do
    pub fn to_bool(&self) -> Result<bool, CellError> {
        match self {
            FormulaValue::Boolean(b) => Ok(*b),
            FormulaValue::Number(n) => Ok(*n != 0.0),
            FormulaValue::Empty => Ok(false),
            FormulaValue::String(s) if s.eq_ignore_ascii_case("TRUE") => Ok(true),
            FormulaValue::String(s) if s.eq_ignore_ascii_case("FALSE") => Ok(false),
            FormulaValue::Error(e) => Err(*e),
            _ => Err(CellError::Value),
        }
    }

    /// Text form used by `&` and text functions
    pub fn as_text(&self) -> String {
        match self {
            FormulaValue::Number(n) => format_general(*n),
            FormulaValue::String(s) => s.clone(),
            FormulaValue::Boolean(true) => "TRUE".to_string(),
            FormulaValue::Boolean(false) => "FALSE".to_string(),
            FormulaValue::Error(e) => e.as_str().to_string(),
            FormulaValue::Empty => String::new(),
            FormulaValue::Array(_) => CellError::Value.as_str().to_string(),
        }
    }

    /// Get the error if this is one
    pub fn error(&self) -> Option<CellError> {
        match self {
            FormulaValue::Error(e) => Some(*e),
            _ => None,
        }
    }
}

impl From<FormulaValue> for CellValue {
    /// Arrays cannot be stored in one cell and become `#VALUE!`
    fn from(value: FormulaValue) -> Self {
        match value {
            FormulaValue::Empty => CellValue::Empty,
            FormulaValue::Number(n) => CellValue::Number(n),
            FormulaValue::String(s) => CellValue::String(s),
            FormulaValue::Boolean(b) => CellValue::Boolean(b),
            FormulaValue::Error(e) => CellValue::Error(e),
            FormulaValue::Array(_) => CellValue::Error(CellError::Value),
        }
    }
}

type CellKey = (usize, u32, u16);

/// Nesting limit for formula cells resolved through direct recursion
const MAX_DEPTH: usize = 256;

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    /// Workbook used for cell lookups; without one every reference is blank
    pub workbook: Option<&'a Workbook>,
    /// Sheet of the cell being evaluated
    pub current_sheet: usize,
    /// Row of the cell being evaluated
    pub current_row: u32,
    /// Column of the cell being evaluated
    pub current_col: u16,
    in_progress: Rc<RefCell<Vec<CellKey>>>,
    resolved: Rc<RefCell<HashMap<CellKey, CellValue>>>,
    depth: Rc<Cell<usize>>,
    truncations: Rc<Cell<usize>>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context for the formula stored at (sheet, row, col)
    pub fn new(workbook: Option<&'a Workbook>, sheet: usize, row: u32, col: u16) -> Self {
        Self {
            workbook,
            current_sheet: sheet,
            current_row: row,
            current_col: col,
            in_progress: Rc::new(RefCell::new(vec![(sheet, row, col)])),
            resolved: Rc::default(),
            depth: Rc::default(),
            truncations: Rc::default(),
        }
    }

    /// Create a context without a workbook
    pub fn simple() -> Self {
        Self {
            workbook: None,
            current_sheet: 0,
            current_row: 0,
            current_col: 0,
            in_progress: Rc::new(RefCell::new(Vec::new())),
            resolved: Rc::default(),
            depth: Rc::default(),
            truncations: Rc::default(),
        }
    }

    fn for_cell(&self, sheet: usize, row: u32, col: u16) -> EvaluationContext<'a> {
        EvaluationContext {
            workbook: self.workbook,
            current_sheet: sheet,
            current_row: row,
            current_col: col,
            in_progress: Rc::clone(&self.in_progress),
            resolved: Rc::clone(&self.resolved),
            depth: Rc::clone(&self.depth),
            truncations: Rc::clone(&self.truncations),
        }
    }

    fn sheet(&self, name: Option<&str>) -> Option<(usize, &'a Worksheet)> {
        let workbook = self.workbook?;
        let index = match name {
            None => self.current_sheet,
            Some(name) => workbook.sheet_index(name).or_else(|| {
                workbook
                    .worksheets()
                    .position(|ws| ws.name().eq_ignore_ascii_case(name))
            })?,
        };
        workbook.worksheet(index).map(|ws| (index, ws))
    }

    /// Get the evaluated value of a cell
    pub fn cell_value(&self, sheet: Option<&str>, row: u32, col: u16) -> FormulaValue {
        if self.workbook.is_none() {
            return FormulaValue::Empty;
        }
        match self.sheet(sheet) {
            Some((index, worksheet)) => self.stored_value(index, worksheet, row, col),
            None => FormulaValue::Error(CellError::Ref),
        }
    }

    /// Get the evaluated values of the stored cells in a rectangular range
    ///
    /// Only stored cells are visited. The result holds one entry per stored
    /// row, each listing that row's stored cells in column order; absent
    /// cells are blank and every range consumer skips blanks.
    pub fn range_values(
        &self,
        sheet: Option<&str>,
        start: CellAddress,
        end: CellAddress,
    ) -> FormulaValue {
        if self.workbook.is_none() {
            return FormulaValue::Array(Vec::new());
        }
        let Some((index, worksheet)) = self.sheet(sheet) else {
            return FormulaValue::Error(CellError::Ref);
        };
        let (rows, cols) = span(start, end);
        let values = worksheet
            .rows_in(rows)
            .map(|(row, cells)| {
                cells
                    .cells_in(cols.clone())
                    .map(|(col, _)| self.stored_value(index, worksheet, row, col))
                    .collect()
            })
            .collect();
        FormulaValue::Array(values)
    }

    fn stored_value(&self, index: usize, worksheet: &Worksheet, row: u32, col: u16) -> FormulaValue {
        match worksheet.cell_at(row, col).map(|c| &c.value) {
            None | Some(CellValue::Empty) => FormulaValue::Empty,
            Some(CellValue::Number(n)) => FormulaValue::Number(*n),
            Some(CellValue::String(s)) => FormulaValue::String(s.clone()),
            Some(CellValue::Boolean(b)) => FormulaValue::Boolean(*b),
            Some(CellValue::Error(e)) => FormulaValue::Error(*e),
            Some(formula @ CellValue::Formula { .. }) => {
                match self.evaluate_formula_cell(index, row, col, formula) {
                    CellValue::Number(n) => FormulaValue::Number(n),
                    CellValue::String(s) => FormulaValue::String(s),
                    CellValue::Boolean(b) => FormulaValue::Boolean(b),
                    CellValue::Error(e) => FormulaValue::Error(e),
                    _ => FormulaValue::Empty,
                }
            }
        }
    }

    fn evaluate_formula_cell(&self, sheet: usize, row: u32, col: u16, cell: &CellValue) -> CellValue {
        let key = (sheet, row, col);
        if let Some(value) = self.resolved.borrow().get(&key) {
            return value.clone();
        }
        if self.in_progress.borrow().contains(&key) {
            debug!(
                "circular reference through sheet {} {}",
                sheet,
                CellAddress::new(row, col)
            );
            return CellValue::Error(CellError::Ref);
        }
        if self.depth.get() >= MAX_DEPTH {
            debug!(
                "formula nesting deeper than {} at sheet {} {}",
                MAX_DEPTH,
                sheet,
                CellAddress::new(row, col)
            );
            self.truncations.set(self.truncations.get() + 1);
            return match cell {
                CellValue::Formula {
                    cached_value: Some(cached),
                    ..
                } if !cached.is_formula() => (**cached).clone(),
                _ => CellValue::Error(CellError::Ref),
            };
        }

        let truncations = self.truncations.get();
        self.in_progress.borrow_mut().push(key);
        self.depth.set(self.depth.get() + 1);
        let result = resolve_formula(&self.for_cell(sheet, row, col), cell);
        self.depth.set(self.depth.get() - 1);
        self.in_progress.borrow_mut().pop();
        // a value built on a truncated lookup is not reused
        if self.truncations.get() == truncations {
            self.resolved.borrow_mut().insert(key, result.clone());
        }
        result
    }

    fn stored_formula(&self, (sheet, row, col): CellKey) -> Option<&'a CellValue> {
        self.workbook?
            .worksheet(sheet)?
            .cell_at(row, col)
            .map(|c| &c.value)
            .filter(|v| v.is_formula())
    }

    /// Formula cells referenced directly by the formula stored at `key`
    fn formula_dependencies(&self, key: CellKey) -> Vec<CellKey> {
        let Some(CellValue::Formula { text, .. }) = self.stored_formula(key) else {
            return Vec::new();
        };
        let Ok(ast) = parse_formula(text) else {
            return Vec::new();
        };

        let owner = self.for_cell(key.0, key.1, key.2);
        let mut deps = Vec::new();
        let mut pending = vec![&ast];
        while let Some(expr) = pending.pop() {
            match expr {
                FormulaExpr::CellRef(r) => {
                    if let Some((index, ws)) = owner.sheet(r.sheet.as_deref()) {
                        let (row, col) = (r.address.row, r.address.col);
                        if ws.cell_at(row, col).is_some_and(|c| c.value.is_formula()) {
                            deps.push((index, row, col));
                        }
                    }
                }
                FormulaExpr::RangeRef(r) => {
                    if let Some((index, ws)) = owner.sheet(r.sheet.as_deref()) {
                        let (rows, cols) = span(r.range.start, r.range.end);
                        for (row, cells) in ws.rows_in(rows) {
                            deps.extend(
                                cells
                                    .cells_in(cols.clone())
                                    .filter(|(_, c)| c.value.is_formula())
                                    .map(|(col, _)| (index, row, col)),
                            );
                        }
                    }
                }
                FormulaExpr::BinaryOp { left, right, .. } => {
                    pending.push(left);
                    pending.push(right);
                }
                FormulaExpr::UnaryOp { operand, .. } => pending.push(operand),
                FormulaExpr::Function { args, .. } => pending.extend(args.iter()),
                FormulaExpr::Array(rows) => pending.extend(rows.iter().flatten()),
                _ => {}
            }
        }
        deps
    }

    /// Resolve the formula dependencies of `root` leaves first
    ///
    /// The depth-first path is mirrored in `in_progress`, so a back edge
    /// reports `#REF!` exactly as direct recursion would, while every
    /// finished cell lands in the memo before its dependents need it.
    fn resolve_dependencies(&self, root: CellKey) {
        enum Step {
            Visit(CellKey),
            Finish(CellKey),
        }

        let mut seen = HashSet::from([root]);
        let mut stack: Vec<Step> = self
            .formula_dependencies(root)
            .into_iter()
            .map(Step::Visit)
            .collect();
        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(key) => {
                    if !seen.insert(key) {
                        continue;
                    }
                    self.in_progress.borrow_mut().push(key);
                    stack.push(Step::Finish(key));
                    stack.extend(
                        self.formula_dependencies(key)
                            .into_iter()
                            .filter(|dep| !seen.contains(dep))
                            .map(Step::Visit),
                    );
                }
                Step::Finish(key) => {
                    self.in_progress.borrow_mut().pop();
                    if let Some(cell) = self.stored_formula(key) {
                        self.evaluate_formula_cell(key.0, key.1, key.2, cell);
                    }
                }
            }
        }
    }
}

/// Row and column spans of the rectangle between two corners
fn span(start: CellAddress, end: CellAddress) -> (RangeInclusive<u32>, RangeInclusive<u16>) {
    (
        start.row.min(end.row)..=start.row.max(end.row),
        start.col.min(end.col)..=start.col.max(end.col),
    )
}

/// Evaluate a stored formula cell into a plain value
///
/// Failures map onto spreadsheet values: an unknown function falls back to
/// the cached result (or `#NAME?`), parse failures are `#NAME?`, argument
/// count mismatches and array results are `#VALUE!`, cycles are `#REF!`.
fn resolve_formula(ctx: &EvaluationContext, cell: &CellValue) -> CellValue {
    let CellValue::Formula { text, cached_value } = cell else {
        return cell.clone();
    };

    let outcome = parse_formula(text).and_then(|ast| evaluate(&ast, ctx));
    match outcome {
        Ok(value) => value.into(),
        Err(FormulaError::UnknownFunction(name)) => match cached_value.as_deref() {
            Some(cached) if !cached.is_formula() => {
                debug!("unknown function {} in {}, using cached result", name, text);
                cached.clone()
            }
            _ => CellValue::Error(CellError::Name),
        },
        Err(FormulaError::Parse(reason)) => {
            debug!("cannot parse {}: {}", text, reason);
            CellValue::Error(CellError::Name)
        }
        Err(FormulaError::ArgumentCount { .. }) => CellValue::Error(CellError::Value),
        Err(FormulaError::CircularReference(_)) => CellValue::Error(CellError::Ref),
    }
}

/// Evaluate the cell at (sheet, row, col) into a value that is never a formula
///
/// Non-formula cells are returned as stored and absent cells as
/// [`CellValue::Empty`].
pub fn evaluate_cell(workbook: &Workbook, sheet: usize, row: u32, col: u16) -> CellValue {
    let Some(stored) = workbook
        .worksheet(sheet)
        .and_then(|ws| ws.cell_at(row, col))
        .map(|c| &c.value)
    else {
        return CellValue::Empty;
    };
    if !stored.is_formula() {
        return stored.clone();
    }
    let ctx = EvaluationContext::new(Some(workbook), sheet, row, col);
    ctx.resolve_dependencies((sheet, row, col));
    resolve_formula(&ctx, stored)
}

/// Evaluate an expression
pub fn evaluate(expr: &FormulaExpr, ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    Ok(match expr {
        FormulaExpr::Number(n) => FormulaValue::Number(*n),
        FormulaExpr::String(s) => FormulaValue::String(s.clone()),
        FormulaExpr::Boolean(b) => FormulaValue::Boolean(*b),
        FormulaExpr::Error(e) => FormulaValue::Error(*e),

        FormulaExpr::CellRef(r) => ctx.cell_value(r.sheet.as_deref(), r.address.row, r.address.col),
        FormulaExpr::RangeRef(r) => ctx.range_values(r.sheet.as_deref(), r.range.start, r.range.end),
        FormulaExpr::NameRef(_) => FormulaValue::Error(CellError::Name),

        FormulaExpr::BinaryOp { op, left, right } => {
            let left = evaluate(left, ctx)?;
            let right = evaluate(right, ctx)?;
            binary(*op, &left, &right)
        }
        FormulaExpr::UnaryOp { op, operand } => {
            let value = evaluate(operand, ctx)?;
            match value.to_number() {
                Ok(n) => FormulaValue::Number(match op {
                    UnaryOperator::Negate => -n,
                    UnaryOperator::Percent => n / 100.0,
                }),
                Err(e) => FormulaValue::Error(e),
            }
        }

        FormulaExpr::Function { name, args } => call(name, args, ctx)?,

        FormulaExpr::Array(rows) => FormulaValue::Array(
            rows.iter()
                .map(|row| row.iter().map(|e| evaluate(e, ctx)).collect::<FormulaResult<Vec<_>>>())
                .collect::<FormulaResult<Vec<_>>>()?,
        ),
    })
}

fn binary(op: BinaryOperator, left: &FormulaValue, right: &FormulaValue) -> FormulaValue {
    if let Some(e) = left.error().or_else(|| right.error()) {
        return FormulaValue::Error(e);
    }
    if matches!(left, FormulaValue::Array(_)) || matches!(right, FormulaValue::Array(_)) {
        return FormulaValue::Error(CellError::Value);
    }

    let numbers = || -> Result<(f64, f64), CellError> { Ok((left.to_number()?, right.to_number()?)) };
    let arithmetic = |f: fn(f64, f64) -> f64| match numbers() {
        Ok((l, r)) => {
            let n = f(l, r);
            if n.is_finite() {
                FormulaValue::Number(n)
            } else {
                FormulaValue::Error(CellError::Num)
            }
        }
        Err(e) => FormulaValue::Error(e),
    };

    match op {
        BinaryOperator::Add => arithmetic(|l, r| l + r),
        BinaryOperator::Subtract => arithmetic(|l, r| l - r),
        BinaryOperator::Multiply => arithmetic(|l, r| l * r),
        BinaryOperator::Divide => match numbers() {
            Ok((_, r)) if r == 0.0 => FormulaValue::Error(CellError::Div0),
            Ok((l, r)) => FormulaValue::Number(l / r),
            Err(e) => FormulaValue::Error(e),
        },
        BinaryOperator::Power => arithmetic(f64::powf),
        BinaryOperator::Concat => FormulaValue::String(left.as_text() + &right.as_text()),
        BinaryOperator::Equal => FormulaValue::Boolean(compare(left, right).is_eq()),
        BinaryOperator::NotEqual => FormulaValue::Boolean(compare(left, right).is_ne()),
        BinaryOperator::LessThan => FormulaValue::Boolean(compare(left, right).is_lt()),
        BinaryOperator::LessEqual => FormulaValue::Boolean(compare(left, right).is_le()),
        BinaryOperator::GreaterThan => FormulaValue::Boolean(compare(left, right).is_gt()),
        BinaryOperator::GreaterEqual => FormulaValue::Boolean(compare(left, right).is_ge()),
    }
}

/// Spreadsheet ordering: numbers < text < booleans, text case-insensitive,
/// blank compares as 0, "" or FALSE depending on the other side
fn compare(left: &FormulaValue, right: &FormulaValue) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    use FormulaValue as V;

    let blank_like = |other: &FormulaValue| match other {
        V::String(_) => V::String(String::new()),
        V::Boolean(_) => V::Boolean(false),
        _ => V::Number(0.0),
    };
    let left = match left {
        V::Empty => blank_like(right),
        v => v.clone(),
    };
    let right = match right {
        V::Empty => blank_like(&left),
        v => v.clone(),
    };

    let rank = |v: &FormulaValue| match v {
        V::Number(_) => 0,
        V::String(_) => 1,
        V::Boolean(_) => 2,
        _ => 3,
    };
    match (&left, &right) {
        (V::Number(l), V::Number(r)) => l.partial_cmp(r).unwrap_or(Ordering::Equal),
        (V::String(l), V::String(r)) => l.to_lowercase().cmp(&r.to_lowercase()),
        (V::Boolean(l), V::Boolean(r)) => l.cmp(r),
        (l, r) => rank(l).cmp(&rank(r)),
    }
}

fn call(name: &str, args: &[FormulaExpr], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let func = function_registry()
        .get(name)
        .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;

    if args.len() < func.min_args || func.max_args.map_or(false, |max| args.len() > max) {
        return Err(FormulaError::ArgumentCount {
            function: name.to_string(),
            expected: match func.max_args {
                Some(max) if max == func.min_args => format!("{}", max),
                Some(max) => format!("{} to {}", func.min_args, max),
                None => format!("at least {}", func.min_args),
            },
            actual: args.len(),
        });
    }

    let values = args
        .iter()
        .map(|arg| evaluate(arg, ctx))
        .collect::<FormulaResult<Vec<_>>>()?;
    Ok((func.implementation)(&values))
}
