//! Stored procedure execution.
//!
//! Parameters arrive from the CLI as comma-separated lists: inputs as
//! `name:type:value`, outputs as `name:type`. The procedure name is
//! interpolated into the call text, so it is validated against an identifier
//! allowlist first — bind variables cannot protect SQL identifiers.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use oracle::sql_type::OracleType;
use oracle::Connection;
use regex::Regex;

/// Allowlist for procedure names: identifiers, optionally schema-qualified.
static VALID_PROCEDURE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("invalid procedure name pattern")
});

/// Recognized parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Varchar2,
    Integer,
    Double,
    Boolean,
    Date,
    Timestamp,
}

impl ParamType {
    fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "STRING" | "VARCHAR" | "VARCHAR2" => Ok(ParamType::Varchar2),
            "INTEGER" | "INT" => Ok(ParamType::Integer),
            "NUMBER" | "DOUBLE" => Ok(ParamType::Double),
            "BOOLEAN" => Ok(ParamType::Boolean),
            "DATE" => Ok(ParamType::Date),
            "TIMESTAMP" => Ok(ParamType::Timestamp),
            other => Err(Error::UnknownParameterType(other.to_string())),
        }
    }
}

/// Typed input value, coerced from its CLI string form.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// One procedure parameter; `value` is `None` for output parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureParam {
    pub name: String,
    pub ptype: ParamType,
    pub value: Option<String>,
}

impl ProcedureParam {
    /// Parse `name:type:value`.
    pub fn parse_input(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.splitn(3, ':').collect();
        if parts.len() != 3 {
            return Err(Error::InvalidParameter {
                expected: "name:type:value".to_string(),
                actual: raw.to_string(),
            });
        }
        Ok(Self {
            name: parts[0].to_string(),
            ptype: ParamType::parse(parts[1])?,
            value: Some(parts[2].to_string()),
        })
    }

    /// Parse `name:type`.
    pub fn parse_output(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() != 2 {
            return Err(Error::InvalidParameter {
                expected: "name:type".to_string(),
                actual: raw.to_string(),
            });
        }
        Ok(Self {
            name: parts[0].to_string(),
            ptype: ParamType::parse(parts[1])?,
            value: None,
        })
    }

    /// Coerce the raw value to its declared type.
    pub fn typed_value(&self) -> Result<ParamValue> {
        let raw = self.value.as_deref().unwrap_or("");
        let coerced = match self.ptype {
            ParamType::Integer => ParamValue::Int(raw.parse().map_err(|_| invalid_value(raw))?),
            ParamType::Double => ParamValue::Float(raw.parse().map_err(|_| invalid_value(raw))?),
            ParamType::Boolean => ParamValue::Bool(raw.parse().map_err(|_| invalid_value(raw))?),
            ParamType::Varchar2 | ParamType::Date | ParamType::Timestamp => {
                ParamValue::Text(raw.to_string())
            }
        };
        Ok(coerced)
    }
}

fn invalid_value(raw: &str) -> Error {
    Error::InvalidParameter {
        expected: "a value matching the declared type".to_string(),
        actual: raw.to_string(),
    }
}

/// Parse a comma-separated input parameter list; entries without `:` are
/// silently skipped, as in the original tool.
pub fn parse_input_params(raw: Option<&str>) -> Result<Vec<ProcedureParam>> {
    split_param_list(raw)
        .map(ProcedureParam::parse_input)
        .collect()
}

/// Parse a comma-separated output parameter list.
pub fn parse_output_params(raw: Option<&str>) -> Result<Vec<ProcedureParam>> {
    split_param_list(raw)
        .map(ProcedureParam::parse_output)
        .collect()
}

fn split_param_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|entry| entry.contains(':'))
}

fn validate_procedure_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || !VALID_PROCEDURE_NAME.is_match(name) {
        return Err(Error::InvalidProcedureName(name.to_string()));
    }
    Ok(())
}

/// Build the anonymous block calling the procedure with positional binds.
fn build_call_text(procedure: &str, param_count: usize) -> Result<String> {
    validate_procedure_name(procedure)?;

    let placeholders: Vec<String> = (1..=param_count).map(|i| format!(":{i}")).collect();
    Ok(format!(
        "BEGIN {}({}); END;",
        procedure,
        placeholders.join(", ")
    ))
}

/// Execute a stored procedure: bind inputs by position, register outputs as
/// text buffers, and return `(name, value)` pairs in declaration order.
pub fn execute_procedure(
    conn: &Connection,
    procedure: &str,
    inputs: &[ProcedureParam],
    outputs: &[ProcedureParam],
) -> Result<Vec<(String, String)>> {
    let call_text = build_call_text(procedure, inputs.len() + outputs.len())?;
    tracing::debug!("Calling: {}", call_text);

    let mut stmt = conn.statement(&call_text).build()?;

    let mut index: usize = 1;
    for input in inputs {
        match input.typed_value()? {
            ParamValue::Int(v) => stmt.bind(index, &v)?,
            ParamValue::Float(v) => stmt.bind(index, &v)?,
            ParamValue::Bool(v) => stmt.bind(index, &v)?,
            ParamValue::Text(v) => stmt.bind(index, &v)?,
        }
        index += 1;
    }

    // Output values are fetched back as text for display, whatever their
    // declared type; Oracle applies its implicit conversions on assignment.
    let out_start = index;
    for _ in outputs {
        stmt.bind(index, &OracleType::Varchar2(4000))?;
        index += 1;
    }

    stmt.execute(&[])?;

    let mut results = Vec::with_capacity(outputs.len());
    for (offset, output) in outputs.iter().enumerate() {
        let value: Option<String> = stmt.bind_value(out_start + offset)?;
        results.push((
            output.name.clone(),
            value.unwrap_or_else(|| "null".to_string()),
        ));
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_param() {
        let param = ProcedureParam::parse_input("emp_id:integer:42").unwrap();
        assert_eq!(param.name, "emp_id");
        assert_eq!(param.ptype, ParamType::Integer);
        assert_eq!(param.typed_value().unwrap(), ParamValue::Int(42));
    }

    #[test]
    fn test_parse_input_value_may_contain_colons() {
        let param = ProcedureParam::parse_input("ts:string:2024-01-01 10:30:00").unwrap();
        assert_eq!(param.value.as_deref(), Some("2024-01-01 10:30:00"));
    }

    #[test]
    fn test_parse_input_rejects_missing_parts() {
        assert!(ProcedureParam::parse_input("only_name").is_err());
        assert!(ProcedureParam::parse_input("name:integer").is_err());
    }

    #[test]
    fn test_parse_output_param() {
        let param = ProcedureParam::parse_output("result:varchar2").unwrap();
        assert_eq!(param.name, "result");
        assert_eq!(param.ptype, ParamType::Varchar2);
        assert!(param.value.is_none());
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(matches!(
            ProcedureParam::parse_output("x:blob"),
            Err(Error::UnknownParameterType(_))
        ));
    }

    #[test]
    fn test_param_list_skips_entries_without_colon() {
        let params = parse_input_params(Some("a:int:1, junk , b:string:two")).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "a");
        assert_eq!(params[1].name, "b");
    }

    #[test]
    fn test_empty_param_lists() {
        assert!(parse_input_params(None).unwrap().is_empty());
        assert!(parse_output_params(Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn test_typed_value_coercion() {
        let double = ProcedureParam::parse_input("x:number:3.5").unwrap();
        assert_eq!(double.typed_value().unwrap(), ParamValue::Float(3.5));

        let flag = ProcedureParam::parse_input("x:boolean:true").unwrap();
        assert_eq!(flag.typed_value().unwrap(), ParamValue::Bool(true));

        let bad = ProcedureParam::parse_input("x:integer:abc").unwrap();
        assert!(bad.typed_value().is_err());
    }

    #[test]
    fn test_build_call_text() {
        assert_eq!(
            build_call_text("hr.update_salary", 2).unwrap(),
            "BEGIN hr.update_salary(:1, :2); END;"
        );
        assert_eq!(build_call_text("p", 0).unwrap(), "BEGIN p(); END;");
    }

    #[test]
    fn test_procedure_name_allowlist() {
        assert!(build_call_text("my_proc", 1).is_ok());
        assert!(build_call_text("schema.my_proc", 1).is_ok());
        assert!(build_call_text("PROC123", 1).is_ok());

        assert!(build_call_text("p; DROP TABLE t", 1).is_err());
        assert!(build_call_text("p()", 1).is_err());
        assert!(build_call_text("1starts_with_digit", 1).is_err());
        assert!(build_call_text("", 1).is_err());
        assert!(build_call_text("a..b", 1).is_err());
    }
}
