//! # sheetplot-formula
//!
//! Formula parser and evaluator for sheetplot.
//!
//! Formula cells are never exposed as text: before a cell's value is handed
//! to a chart builder it is evaluated here. This crate provides:
//! - Formula parsing (text → AST)
//! - Formula evaluation (AST → value) with recursive evaluation of referenced
//!   formula cells and circular-reference detection
//! - A small set of built-in functions
//!
//! ## Example
//!
//! ```rust
//! use sheetplot_core::{CellValue, Workbook};
//! use sheetplot_formula::evaluate_cell;
//!
//! let mut wb = Workbook::new();
//! let sheet = wb.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", 2.0).unwrap();
//! sheet.set_cell_formula("A2", "=A1*21").unwrap();
//!
//! assert_eq!(evaluate_cell(&wb, 0, 1, 0), CellValue::Number(42.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;

pub use ast::{BinaryOperator, CellReference, FormulaExpr, RangeReference, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, evaluate_cell, EvaluationContext, FormulaValue};
pub use parser::parse_formula;
