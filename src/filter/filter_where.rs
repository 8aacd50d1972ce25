use serde_json::Value;

use super::error::FilterError;
use super::types::{is_valid_identifier, FilterOp};

/// Recursive compiler from the JSON where document to SQL with `$n` placeholders
pub struct FilterWhere {
    param_values: Vec<Value>,
}

impl FilterWhere {
    pub fn generate(where_data: &Value) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self { param_values: vec![] };
        let sql = filter_where.build_node(where_data)?;
        Ok((sql, filter_where.param_values))
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        match where_data {
            Value::Object(_) | Value::Null => Ok(()),
            _ => Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        }
    }

    fn build_node(&mut self, node: &Value) -> Result<String, FilterError> {
        let obj = match node {
            Value::Object(obj) => obj,
            Value::Null => return Ok("1=1".to_string()),
            _ => return Err(FilterError::InvalidWhereClause(format!("expected object, got {}", node))),
        };

        let mut parts = Vec::with_capacity(obj.len());
        for (key, value) in obj {
            let sql = if key.starts_with('$') {
                self.build_logical(key, value)?
            } else {
                self.build_field(key, value)?
            };
            parts.push(sql);
        }

        // Sibling keys are ANDed; each is parenthesized so an inner OR keeps its precedence
        Ok(match parts.len() {
            0 => "1=1".to_string(),
            1 => parts.remove(0),
            _ => parts.iter().map(|p| format!("({})", p)).collect::<Vec<_>>().join(" AND "),
        })
    }

    fn build_logical(&mut self, op: &str, value: &Value) -> Result<String, FilterError> {
        match op {
            "$and" | "$or" => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| FilterError::InvalidOperatorData(format!("{} requires array", op)))?;
                // Empty conjunction is true, empty disjunction is false
                if arr.is_empty() {
                    return Ok(if op == "$and" { "1=1" } else { "1=0" }.to_string());
                }
                let mut sql_parts = Vec::with_capacity(arr.len());
                for v in arr {
                    sql_parts.push(format!("({})", self.build_node(v)?));
                }
                let joiner = if op == "$and" { " AND " } else { " OR " };
                Ok(sql_parts.join(joiner))
            }
            _ => Err(FilterError::UnsupportedOperator(op.to_string())),
        }
    }

    fn build_field(&mut self, field: &str, value: &Value) -> Result<String, FilterError> {
        if !is_valid_identifier(field) {
            return Err(FilterError::InvalidColumn(field.to_string()));
        }

        match value {
            Value::Object(obj) => {
                let mut parts = Vec::with_capacity(obj.len());
                for (op_key, op_val) in obj {
                    let operator = FilterOp::from_key(op_key)
                        .ok_or_else(|| FilterError::UnsupportedOperator(op_key.clone()))?;
                    parts.push(self.build_condition(field, operator, op_val)?);
                }
                if parts.is_empty() {
                    return Err(FilterError::InvalidOperatorData(format!("no operator given for {}", field)));
                }
                Ok(parts.join(" AND "))
            }
            // Implicit equality: { field: value }
            _ => self.build_condition(field, FilterOp::Eq, value),
        }
    }

    fn build_condition(&mut self, field: &str, operator: FilterOp, data: &Value) -> Result<String, FilterError> {
        let quoted_column = format!("\"{}\"", field);
        match operator {
            FilterOp::Eq if data.is_null() => Ok(format!("{} IS NULL", quoted_column)),
            _ => {
                Self::ensure_scalar(data)?;
                Ok(format!("{} {} {}", quoted_column, operator.to_sql(), self.param(data.clone())))
            }
        }
    }

    fn ensure_scalar(v: &Value) -> Result<(), FilterError> {
        match v {
            Value::Array(_) | Value::Object(_) => {
                Err(FilterError::InvalidOperatorData(format!("expected scalar value, got {}", v)))
            }
            _ => Ok(()),
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        format!("${}", self.param_values.len())
    }
}
